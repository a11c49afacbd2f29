use quill_types::{Article, ArticleId};

use crate::error::StoreResult;

/// Name of the bucket holding every article.
pub const ARTICLE_BUCKET: &str = "article";

/// Storage gateway for articles.
///
/// Every operation is scoped to [`ARTICLE_BUCKET`] and keyed by the decimal
/// string of the article id. Implementations must satisfy:
/// - Each call runs in its own transaction: read-only for `get`/`get_all`,
///   read-write for `put`/`delete`/`replace`. A failed write leaves no trace.
/// - `replace` checks existence and writes in the same transaction.
/// - An empty bucket lists as an empty `Vec`, never as an error.
pub trait ArticleStore: Send + Sync {
    /// Write `article` under `id`, overwriting any previous value.
    fn put(&self, id: ArticleId, article: &Article) -> StoreResult<()>;

    /// Read the article stored under `id`.
    ///
    /// Returns `StoreError::NotFound` if absent and `StoreError::Codec` if
    /// the stored bytes do not decode.
    fn get(&self, id: ArticleId) -> StoreResult<Article>;

    /// Read every article, in the backend's enumeration order.
    fn get_all(&self) -> StoreResult<Vec<Article>>;

    /// Remove the article stored under `id`.
    ///
    /// Returns `StoreError::NotFound` if nothing was stored there.
    fn delete(&self, id: ArticleId) -> StoreResult<()>;

    /// Replace the article stored under `id` with `article`.
    ///
    /// The key is `id`, whatever `article.id` says. Returns
    /// `StoreError::NotFound` without writing if `id` is absent.
    fn replace(&self, id: ArticleId, article: &Article) -> StoreResult<()>;
}
