use serde::{Deserialize, Serialize};

/// Client-supplied article identifier.
pub type ArticleId = i64;

/// The sole entity managed by the service.
///
/// No invariants are enforced: ids may be negative, names may be empty, and a
/// second write with the same id replaces the first. Fields missing from a
/// JSON body take their zero value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: ArticleId,
    pub name: String,
}

impl Article {
    pub fn new(id: ArticleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Storage key for an article id.
pub fn key_for(id: ArticleId) -> String {
    id.to_string()
}

impl std::fmt::Display for Article {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "article#{} ({})", self.id, self.name)
    }
}
