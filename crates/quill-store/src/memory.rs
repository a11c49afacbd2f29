use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use quill_types::{key_for, Article, ArticleId};

use crate::codec::ArticleCodec;
use crate::error::{StoreError, StoreResult};
use crate::traits::ArticleStore;

/// In-memory article store.
///
/// Holds codec bytes in a `BTreeMap` behind a `RwLock`, so listing order
/// matches the on-disk backend (lexicographic by key). Nothing survives the
/// process. Intended for tests and throwaway instances.
pub struct InMemoryArticleStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryArticleStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of articles currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store raw bytes under `key`, bypassing the codec.
    #[cfg(test)]
    pub(crate) fn insert_raw(&self, key: &str, bytes: Vec<u8>) {
        if let Ok(mut map) = self.write() {
            map.insert(key.to_string(), bytes);
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))
    }
}

impl Default for InMemoryArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleStore for InMemoryArticleStore {
    fn put(&self, id: ArticleId, article: &Article) -> StoreResult<()> {
        let bytes = ArticleCodec::encode(article)?;
        self.write()?.insert(key_for(id), bytes);
        Ok(())
    }

    fn get(&self, id: ArticleId) -> StoreResult<Article> {
        let key = key_for(id);
        let map = self.read()?;
        let bytes = map.get(&key).ok_or(StoreError::NotFound(key))?;
        ArticleCodec::decode(bytes)
    }

    fn get_all(&self) -> StoreResult<Vec<Article>> {
        self.read()?
            .values()
            .map(|bytes| ArticleCodec::decode(bytes))
            .collect()
    }

    fn delete(&self, id: ArticleId) -> StoreResult<()> {
        let key = key_for(id);
        match self.write()?.remove(&key) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(key)),
        }
    }

    fn replace(&self, id: ArticleId, article: &Article) -> StoreResult<()> {
        let key = key_for(id);
        let bytes = ArticleCodec::encode(article)?;
        // Single write guard: the existence check and the write cannot interleave
        // with another writer.
        let mut map = self.write()?;
        match map.get_mut(&key) {
            Some(slot) => {
                *slot = bytes;
                Ok(())
            }
            None => Err(StoreError::NotFound(key)),
        }
    }
}

impl std::fmt::Debug for InMemoryArticleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read().map(|map| map.len()).ok();
        f.debug_struct("InMemoryArticleStore")
            .field("article_count", &count)
            .finish()
    }
}
