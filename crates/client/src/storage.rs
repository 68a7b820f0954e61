//! Durable key-value storage for client state (tokens, selected branch).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;

use crate::error::{ClientError, ClientResult};

/// Well-known storage keys.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const SELECTED_BRANCH: &str = "selectedBranch";
}

#[async_trait]
pub trait ClientStorage: Send + Sync {
    async fn get(&self, key: &str) -> ClientResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ClientResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| ClientError::Storage("memory storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl ClientStorage for MemoryStorage {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// SQLite-backed storage.
///
/// Cheap to clone; the pool is created on first use.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
    pool: Arc<tokio::sync::Mutex<Option<SqlitePool>>>,
}

impl SqliteStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pool: Arc::new(tokio::sync::Mutex::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the pool, initializing the database if necessary.
    async fn pool(&self) -> anyhow::Result<SqlitePool> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create storage directory at {:?}", parent))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("failed to open client storage at {:?}", self.path))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS client_state (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create client_state table")?;

        *guard = Some(pool.clone());
        Ok(pool)
    }
}

#[async_trait]
impl ClientStorage for SqliteStorage {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let result: anyhow::Result<Option<String>> = async {
            let pool = self.pool().await?;
            let row = sqlx::query("SELECT value FROM client_state WHERE key = ?1")
                .bind(key)
                .fetch_optional(&pool)
                .await
                .with_context(|| format!("failed to read '{key}'"))?;
            match row {
                Some(row) => Ok(Some(row.try_get("value")?)),
                None => Ok(None),
            }
        }
        .await;
        result.map_err(ClientError::storage)
    }

    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let result: anyhow::Result<()> = async {
            let pool = self.pool().await?;
            sqlx::query(
                r#"
                INSERT INTO client_state (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key)
                DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key)
            .bind(value)
            .bind(Utc::now().to_rfc3339())
            .execute(&pool)
            .await
            .with_context(|| format!("failed to write '{key}'"))?;
            Ok(())
        }
        .await;
        result.map_err(ClientError::storage)
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        let result: anyhow::Result<()> = async {
            let pool = self.pool().await?;
            sqlx::query("DELETE FROM client_state WHERE key = ?1")
                .bind(key)
                .execute(&pool)
                .await
                .with_context(|| format!("failed to remove '{key}'"))?;
            Ok(())
        }
        .await;
        result.map_err(ClientError::storage)
    }
}
