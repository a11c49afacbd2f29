//! HTTP server for Quill.
//!
//! Exposes create, list, read, update, and delete for articles over JSON,
//! backed by an [`ArticleStore`](quill_store::ArticleStore) injected through
//! [`AppState`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ServerConfig, StatusPolicy, StorageBackend, StorageConfig};
pub use error::{ApiError, ServerError, ServerResult, ARTICLE_DELETED, RECORD_NOT_FOUND};
pub use router::build_router;
pub use server::QuillServer;
pub use state::AppState;
