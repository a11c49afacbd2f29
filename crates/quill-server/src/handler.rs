use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Json;
use quill_store::{StoreError, StoreResult};
use quill_types::{Article, ArticleId};
use serde_json::json;

use crate::error::{ApiError, ARTICLE_DELETED};
use crate::state::AppState;

/// Parse the `:id` path segment.
///
/// Keys are always the decimal form of an integer, so a segment that does not
/// parse cannot name a stored article and is reported as not found.
fn parse_id(raw: &str) -> StoreResult<ArticleId> {
    raw.parse()
        .map_err(|_| StoreError::NotFound(raw.to_string()))
}

/// Decode an article body. The `Content-Type` header is not consulted.
fn parse_body(body: &[u8]) -> Result<Article, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "rejected article body");
        ApiError::bad_request(e.to_string())
    })
}

/// `POST /article`
pub async fn create_article(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Article>, ApiError> {
    let article = parse_body(&body)?;
    let stored = article.clone();
    state
        .run(move |store| store.put(stored.id, &stored))
        .await
        .map_err(|e| ApiError::from_store(&e, state.policy()))?;
    tracing::info!(id = article.id, "created article");
    Ok(Json(article))
}

/// `GET /articles/`
pub async fn list_articles(State(state): State<AppState>) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state
        .run(|store| store.get_all())
        .await
        .map_err(|e| ApiError::from_store(&e, state.policy()))?;
    Ok(Json(articles))
}

/// `GET /article/:id`
pub async fn read_article(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let article = state
        .run(move |store| store.get(parse_id(&raw)?))
        .await
        .map_err(|e| ApiError::record_not_found(&e, state.policy()))?;
    Ok(Json(article))
}

/// `PUT /article/:id`
///
/// The path id is the storage key; the body is stored unchanged, including
/// its own `id` field.
pub async fn update_article(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> Result<Json<Article>, ApiError> {
    let article = parse_body(&body)?;
    let stored = article.clone();
    state
        .run(move |store| store.replace(parse_id(&raw)?, &stored))
        .await
        .map_err(|e| ApiError::missing_or_store(&e, state.policy()))?;
    tracing::info!(id = article.id, "updated article");
    Ok(Json(article))
}

/// `DELETE /article/:id`
pub async fn delete_article(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    state
        .run(move |store| store.delete(parse_id(&raw)?))
        .await
        .map_err(|e| ApiError::from_store(&e, state.policy()))?;
    Ok(Json(ARTICLE_DELETED))
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": "quill",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-7").unwrap(), -7);
    }

    #[test]
    fn parse_body_decodes_json() {
        assert_eq!(parse_body(br#"{"id":3,"name":"c"}"#).unwrap(), Article::new(3, "c"));
    }

    #[test]
    fn parse_body_rejects_malformed_json() {
        let err = parse_body(b"{not json").unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parse_id_rejects_non_integers_as_not_found() {
        let err = parse_id("abc").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "article not found: abc");
    }
}
