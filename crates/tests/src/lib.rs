//! # Integration Tests
//!
//! End-to-end tests wiring the real pipeline stages together: scripted
//! chat transport into the reader, reader into the bounded queue, batch
//! processor into an in-memory SQLite store.

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use batcher::BatchProcessor;
    use contracts::{ChatEvent, RuntimeState};
    use ingestion::{ChatLogin, IrcReader, ScriptedTransport};
    use storage::{ChatStore, SqlSink};
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    fn test_login() -> ChatLogin {
        ChatLogin {
            nickname: "bot".into(),
            token: Some("oauth:secret".into()),
            channel: "general".into(),
        }
    }

    async fn memory_store() -> ChatStore {
        let store = ChatStore::connect("sqlite::memory:").await.unwrap();
        store.ensure_schema().await.unwrap();
        store
    }

    /// Full path: ScriptedTransport -> IrcReader -> queue -> BatchProcessor
    /// -> SqlSink -> SQLite rows, in arrival order.
    #[tokio::test]
    async fn scripted_stream_lands_in_store_in_order() {
        let store = memory_store().await;
        let state = Arc::new(RuntimeState::new(5).unwrap());
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(100);

        let processor = BatchProcessor::new(
            rx,
            SqlSink::new("sqlite", store.pool().clone()),
            Arc::clone(&state),
            Duration::from_secs(10),
            cancel.clone(),
        );
        let processor_task = processor.spawn();

        let transport = ScriptedTransport::new(vec![
            ":tmi.twitch.tv 001 bot :Welcome",
            ":alice!alice@host PRIVMSG #general :one",
            ":bob!bob@host PRIVMSG #general :two",
            "PING :tmi.twitch.tv",
            ":carol!carol@host PRIVMSG #general :three",
            ":dave!dave@host PRIVMSG #general :four",
            ":erin!erin@host PRIVMSG #general :five",
        ]);
        let reader = IrcReader::new(transport, test_login(), tx, cancel.clone());

        reader.run().await.unwrap();
        processor_task.await.unwrap();

        assert_eq!(store.count_messages().await.unwrap(), 5);
        assert_eq!(
            store.origins_in_order().await.unwrap(),
            vec!["alice", "bob", "carol", "dave", "erin"]
        );

        // Health counters track the committed batch
        let health = state.health();
        assert_eq!(health.processed_count, 5);
        assert!(health.last_processed.is_some());

        // Stream end tears the whole pipeline down
        assert!(cancel.is_cancelled());
    }

    /// PINGs are answered on the transport and never reach the store.
    #[tokio::test]
    async fn ping_is_answered_but_not_persisted() {
        let store = memory_store().await;
        let state = Arc::new(RuntimeState::new(1).unwrap());
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(100);

        let processor = BatchProcessor::new(
            rx,
            SqlSink::new("sqlite", store.pool().clone()),
            Arc::clone(&state),
            Duration::from_secs(10),
            cancel.clone(),
        );
        let processor_task = processor.spawn();

        let transport = ScriptedTransport::new(vec![
            "PING :tmi.twitch.tv",
            ":alice!alice@host PRIVMSG #general :hello",
        ]);
        let sent = transport.sent();
        let reader = IrcReader::new(transport, test_login(), tx, cancel);

        reader.run().await.unwrap();
        processor_task.await.unwrap();

        assert_eq!(store.count_messages().await.unwrap(), 1);
        assert_eq!(store.origins_in_order().await.unwrap(), vec!["alice"]);

        let sent = sent.lock().unwrap();
        assert!(sent.contains(&"PONG :tmi.twitch.tv".to_string()));
    }

    /// A transport failure is fatal to the reader, but events already
    /// queued are still flushed before the processor exits.
    #[tokio::test]
    async fn transport_failure_still_flushes_queued_events() {
        let store = memory_store().await;
        let state = Arc::new(RuntimeState::new(10).unwrap());
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(100);

        let processor = BatchProcessor::new(
            rx,
            SqlSink::new("sqlite", store.pool().clone()),
            Arc::clone(&state),
            Duration::from_secs(10),
            cancel.clone(),
        );
        let processor_task = processor.spawn();

        let transport = ScriptedTransport::failing_after(vec![
            ":alice!alice@host PRIVMSG #general :one",
            ":bob!bob@host PRIVMSG #general :two",
        ]);
        let reader = IrcReader::new(transport, test_login(), tx, cancel.clone());

        let result = reader.run().await;
        assert!(result.is_err());
        assert!(cancel.is_cancelled());

        processor_task.await.unwrap();

        assert_eq!(store.count_messages().await.unwrap(), 2);
        assert_eq!(
            store.origins_in_order().await.unwrap(),
            vec!["alice", "bob"]
        );
    }

    /// Runtime threshold change regroups subsequent batches.
    #[tokio::test]
    async fn threshold_change_regroups_batches() {
        let store = memory_store().await;
        let state = Arc::new(RuntimeState::new(10).unwrap());
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(100);

        let processor = BatchProcessor::new(
            rx,
            SqlSink::new("sqlite", store.pool().clone()),
            Arc::clone(&state),
            Duration::from_secs(60),
            cancel,
        );
        let metrics = processor.metrics();
        let processor_task = processor.spawn();

        for origin in ["a", "b"] {
            tx.send(ChatEvent::now(origin, "msg")).await.unwrap();
        }
        tokio::task::yield_now().await;
        assert_eq!(metrics.batches_flushed(), 0);

        // Lowering the threshold takes effect on the next append
        state.set_batch_size(3).unwrap();
        tx.send(ChatEvent::now("c", "msg")).await.unwrap();

        drop(tx);
        processor_task.await.unwrap();

        assert_eq!(metrics.batches_flushed(), 1);
        assert_eq!(store.origins_in_order().await.unwrap(), vec!["a", "b", "c"]);
        assert_eq!(state.health().processed_count, 3);
    }
}

#[cfg(test)]
mod config_e2e_tests {
    use std::sync::Arc;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::RuntimeState;

    /// A loaded config seeds the shared runtime state.
    #[test]
    fn loaded_config_seeds_runtime_state() {
        let toml = r#"
            [chat]
            nickname = "bot"
            channel = "general"

            [batch]
            size = 7
        "#;
        let blueprint = ConfigLoader::load_from_str(toml, ConfigFormat::Toml).unwrap();
        let state = Arc::new(RuntimeState::new(blueprint.batch.size).unwrap());
        assert_eq!(state.batch_size(), 7);
    }

    /// A rejected config never reaches the pipeline.
    #[test]
    fn zero_batch_size_is_rejected_before_wiring() {
        let toml = r#"
            [chat]
            nickname = "bot"
            channel = "general"

            [batch]
            size = 0
        "#;
        assert!(ConfigLoader::load_from_str(toml, ConfigFormat::Toml).is_err());
    }
}
