use std::fs;
use std::path::{Path, PathBuf};

use quill_types::{key_for, Article, ArticleId};
use redb::{Database, ReadableTable, TableDefinition, TableError};
use tracing::{debug, info};

use crate::codec::ArticleCodec;
use crate::error::{StoreError, StoreResult};
use crate::traits::{ArticleStore, ARTICLE_BUCKET};

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "quill.redb";

const ARTICLES: TableDefinition<&str, &[u8]> = TableDefinition::new(ARTICLE_BUCKET);

/// Durable article store backed by a `redb` database file.
///
/// redb allows one write transaction at a time and gives readers an MVCC
/// snapshot, so concurrent handlers need no extra locking here. The database
/// is closed when the store is dropped.
pub struct RedbArticleStore {
    db: Database,
    path: PathBuf,
}

impl RedbArticleStore {
    /// Open (or create) the store inside `dir`.
    ///
    /// Creates the directory and the article table if they do not exist yet.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(DATABASE_FILE);
        let db = Database::create(&path)?;

        let txn = db.begin_write()?;
        txn.open_table(ARTICLES)?;
        txn.commit()?;

        info!(path = %path.display(), "opened article store");
        Ok(Self { db, path })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArticleStore for RedbArticleStore {
    fn put(&self, id: ArticleId, article: &Article) -> StoreResult<()> {
        let key = key_for(id);
        let bytes = ArticleCodec::encode(article)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ARTICLES)?;
            table.insert(key.as_str(), bytes.as_slice())?;
        }
        txn.commit()?;
        debug!(%key, "put article");
        Ok(())
    }

    fn get(&self, id: ArticleId) -> StoreResult<Article> {
        let key = key_for(id);
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(ARTICLES) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Err(StoreError::NotFound(key)),
            Err(e) => return Err(e.into()),
        };
        let Some(guard) = table.get(key.as_str())? else {
            return Err(StoreError::NotFound(key));
        };
        ArticleCodec::decode(guard.value())
    }

    fn get_all(&self) -> StoreResult<Vec<Article>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(ARTICLES) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut articles = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            articles.push(ArticleCodec::decode(value.value())?);
        }
        debug!(count = articles.len(), "listed articles");
        Ok(articles)
    }

    fn delete(&self, id: ArticleId) -> StoreResult<()> {
        let key = key_for(id);
        let txn = self.db.begin_write()?;
        let existed = {
            let mut table = txn.open_table(ARTICLES)?;
            let removed = table.remove(key.as_str())?;
            removed.is_some()
        };
        if !existed {
            txn.abort()?;
            return Err(StoreError::NotFound(key));
        }
        txn.commit()?;
        debug!(%key, "deleted article");
        Ok(())
    }

    fn replace(&self, id: ArticleId, article: &Article) -> StoreResult<()> {
        let key = key_for(id);
        let bytes = ArticleCodec::encode(article)?;
        let txn = self.db.begin_write()?;
        let existed = {
            let mut table = txn.open_table(ARTICLES)?;
            let removed = table.remove(key.as_str())?.is_some();
            if removed {
                table.insert(key.as_str(), bytes.as_slice())?;
            }
            removed
        };
        if !existed {
            txn.abort()?;
            return Err(StoreError::NotFound(key));
        }
        txn.commit()?;
        debug!(%key, "replaced article");
        Ok(())
    }
}

impl std::fmt::Debug for RedbArticleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbArticleStore")
            .field("path", &self.path)
            .finish()
    }
}
