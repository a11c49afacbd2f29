//! Article storage for Quill.
//!
//! This crate is the storage gateway between the HTTP handlers and the
//! embedded key-value engine. Every article lives in one bucket,
//! [`ARTICLE_BUCKET`], keyed by the decimal string of its id, and is stored
//! as bytes produced by [`ArticleCodec`].
//!
//! # Storage Backends
//!
//! All backends implement the [`ArticleStore`] trait:
//!
//! - [`RedbArticleStore`] -- durable store on a `redb` database file
//! - [`InMemoryArticleStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. One transaction per operation; a failed write commits nothing.
//! 2. `replace` checks existence and writes inside the same transaction.
//! 3. An empty bucket lists as an empty `Vec`.
//! 4. All engine errors are propagated, never silently ignored.

pub mod codec;
pub mod disk;
pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use codec::ArticleCodec;
pub use disk::{RedbArticleStore, DATABASE_FILE};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryArticleStore;
pub use traits::{ArticleStore, ARTICLE_BUCKET};
