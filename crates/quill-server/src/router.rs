use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all article endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/article", post(handler::create_article))
        .route("/articles/", get(handler::list_articles))
        .route("/articles", get(handler::list_articles))
        .route(
            "/article/:id",
            get(handler::read_article)
                .put(handler::update_article)
                .delete(handler::delete_article),
        )
        .route("/health", get(handler::health_handler))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
