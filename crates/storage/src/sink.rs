//! SqlSink - transactional batch writes

use contracts::{ChatEvent, ContractError, EventSink};
use observability::record_record_insert_failures;
use sqlx::SqlitePool;
use tracing::{instrument, warn};

const INSERT_MESSAGE: &str =
    "INSERT INTO messages (origin, text, occurred_at) VALUES (?1, ?2, ?3)";

/// Sink that persists each batch in one transaction
///
/// Failure semantics, in order:
/// - transaction cannot be opened: the whole batch is abandoned (Err);
/// - an individual insert fails: logged and counted, the remaining records
///   in the same transaction are still attempted;
/// - commit fails: Err, executed inserts are not guaranteed persisted.
///
/// A batch with per-record failures still commits and still counts as a
/// successful flush upstream.
pub struct SqlSink {
    name: String,
    pool: SqlitePool,
}

impl SqlSink {
    /// Create a sink writing through the given pool
    pub fn new(name: impl Into<String>, pool: SqlitePool) -> Self {
        Self {
            name: name.into(),
            pool,
        }
    }
}

impl EventSink for SqlSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "sql_sink_write_batch",
        skip(self, batch),
        fields(sink = %self.name, batch_len = batch.len())
    )]
    async fn write_batch(&mut self, batch: &[ChatEvent]) -> Result<(), ContractError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            ContractError::store_write(batch.len(), format!("begin transaction failed: {e}"))
        })?;

        let mut failed = 0u64;
        for event in batch {
            let result = sqlx::query(INSERT_MESSAGE)
                .bind(&event.origin)
                .bind(&event.text)
                .bind(event.occurred_at)
                .execute(&mut *tx)
                .await;

            if let Err(e) = result {
                failed += 1;
                warn!(
                    sink = %self.name,
                    origin = %event.origin,
                    error = %e,
                    "Record insert failed, continuing batch"
                );
            }
        }

        record_record_insert_failures(failed);

        tx.commit().await.map_err(|e| {
            ContractError::store_write(batch.len(), format!("commit failed: {e}"))
        })?;

        Ok(())
    }
}
