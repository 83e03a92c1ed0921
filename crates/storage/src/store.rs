//! ChatStore - SQLite pool and schema provisioning

use std::str::FromStr;

use contracts::ContractError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{info, instrument};

/// Idempotent, safe to run on every startup
const CREATE_MESSAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    origin      TEXT NOT NULL,
    text        TEXT NOT NULL,
    occurred_at TEXT NOT NULL
)
"#;

/// Handle to the SQLite store
#[derive(Debug, Clone)]
pub struct ChatStore {
    pool: SqlitePool,
}

impl ChatStore {
    /// Connect to the store and verify the connection
    ///
    /// Creates the database file when it does not exist yet. The pool is
    /// capped at one connection: the sink is the only writer.
    ///
    /// # Errors
    /// Returns a connection error when the URL is invalid or the database
    /// is unreachable.
    #[instrument(name = "chat_store_connect", skip(url))]
    pub async fn connect(url: &str) -> Result<Self, ContractError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| ContractError::store_connection(format!("invalid URL '{url}': {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| ContractError::store_connection(format!("connect failed: {e}")))?;

        // Equivalent of a ping - fail fast before the pipeline starts
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| ContractError::store_connection(format!("ping failed: {e}")))?;

        info!("Connected to store");
        Ok(Self { pool })
    }

    /// Create the messages table when absent
    ///
    /// Performed once at startup before the pipeline begins; running it
    /// again is a no-op.
    #[instrument(name = "chat_store_ensure_schema", skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), ContractError> {
        sqlx::query(CREATE_MESSAGES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| ContractError::store_schema(format!("create table failed: {e}")))?;

        info!("Ensured messages table exists");
        Ok(())
    }

    /// Underlying pool, for building a sink
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of persisted messages
    pub async fn count_messages(&self) -> Result<i64, ContractError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ContractError::store_connection(format!("count failed: {e}")))
    }

    /// Origins of persisted messages in insertion order
    pub async fn origins_in_order(&self) -> Result<Vec<String>, ContractError> {
        sqlx::query_scalar("SELECT origin FROM messages ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ContractError::store_connection(format!("query failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = ChatStore::connect("sqlite::memory:").await.unwrap();
        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();
        assert_eq!(store.count_messages().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn connect_rejects_invalid_url() {
        let result = ChatStore::connect("not-a-url").await;
        assert!(matches!(
            result,
            Err(ContractError::StoreConnection { .. })
        ));
    }
}
