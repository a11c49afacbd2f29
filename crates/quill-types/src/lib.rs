//! Foundation types for Quill.
//!
//! Every other Quill crate depends on `quill-types`. The service manages a
//! single resource, the [`Article`], addressed by its client-supplied
//! [`ArticleId`].

pub mod article;

pub use article::{key_for, Article, ArticleId};
