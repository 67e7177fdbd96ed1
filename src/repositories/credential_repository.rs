// src/repositories/credential_repository.rs
//
// Credential persistence
//
// The token and the serialized user are two independent entries. They are
// written together inside one transaction, so a failed write never leaves
// something that looks like a valid session. They are removed one entry at
// a time; an interrupted clear leaves at most one half behind.
// A load that finds only one half reports "no session".

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::db::{self, ConnectionPool};
use crate::domain::User;
use crate::error::{AppError, AppResult};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// One of the two persisted entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialEntry {
    Token,
    User,
}

impl CredentialEntry {
    pub fn key(self) -> &'static str {
        match self {
            CredentialEntry::Token => TOKEN_KEY,
            CredentialEntry::User => USER_KEY,
        }
    }
}

/// Both halves of a persisted session.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRecord {
    pub token: String,
    pub user: User,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn save(&self, token: &str, user: &User) -> AppResult<()>;

    /// `None` when either entry is absent.
    async fn load(&self) -> AppResult<Option<CredentialRecord>>;

    /// Delete one entry. Removing an absent entry is not an error.
    async fn remove(&self, entry: CredentialEntry) -> AppResult<()>;

    /// Remove both entries, token first. Both removals are attempted and
    /// the first failure is returned.
    async fn clear(&self) -> AppResult<()> {
        let token = self.remove(CredentialEntry::Token).await;
        let user = self.remove(CredentialEntry::User).await;
        token.and(user)
    }
}

pub struct SqliteCredentialStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteCredentialStore {
    /// Wrap an existing pool. The schema must already be initialized.
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Open (or create) the credential database at `path`.
    pub fn open(path: &Path) -> AppResult<Self> {
        let pool = db::create_connection_pool(path)?;
        db::initialize_database(&*db::get_connection(&pool)?)?;
        Ok(Self::new(Arc::new(pool)))
    }

    /// Volatile store, used when no database path is available and in tests.
    pub fn in_memory() -> AppResult<Self> {
        let pool = db::create_memory_pool()?;
        db::initialize_database(&*db::get_connection(&pool)?)?;
        Ok(Self::new(Arc::new(pool)))
    }

    /// Run blocking SQLite work off the async executor.
    async fn with_pool<T, F>(&self, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&ConnectionPool) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || work(&pool)).await?
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn save(&self, token: &str, user: &User) -> AppResult<()> {
        let token = token.to_string();
        let user_json = serde_json::to_string(user)?;

        self.with_pool(move |pool| {
            let mut conn = db::get_connection(pool)?;
            // Dropping an uncommitted transaction rolls it back
            let tx = conn.transaction()?;
            let now = chrono::Utc::now().to_rfc3339();
            tx.execute(
                "INSERT OR REPLACE INTO credentials (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![TOKEN_KEY, token, now],
            )?;
            tx.execute(
                "INSERT OR REPLACE INTO credentials (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![USER_KEY, user_json, now],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn load(&self) -> AppResult<Option<CredentialRecord>> {
        let (token, user_json) = self
            .with_pool(|pool| {
                let conn = db::get_connection(pool)?;
                let read = |key: &str| -> AppResult<Option<String>> {
                    Ok(conn
                        .query_row(
                            "SELECT value FROM credentials WHERE key = ?1",
                            [key],
                            |row| row.get(0),
                        )
                        .optional()?)
                };
                Ok((read(TOKEN_KEY)?, read(USER_KEY)?))
            })
            .await?;

        match (token, user_json) {
            (Some(token), Some(user_json)) => {
                let user: User = serde_json::from_str(&user_json).map_err(|e| {
                    AppError::PartialStorage(format!("Stored user is unreadable: {}", e))
                })?;
                Ok(Some(CredentialRecord { token, user }))
            }
            (None, None) => Ok(None),
            (token, _) => {
                log::warn!(
                    "credential store holds a partial session (token present: {})",
                    token.is_some()
                );
                Ok(None)
            }
        }
    }

    async fn remove(&self, entry: CredentialEntry) -> AppResult<()> {
        self.with_pool(move |pool| {
            let conn = db::get_connection(pool)?;
            conn.execute("DELETE FROM credentials WHERE key = ?1", [entry.key()])?;
            Ok(())
        })
        .await
    }
}
