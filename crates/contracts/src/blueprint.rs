//! ServiceBlueprint - Config Loader output
//!
//! Describes the complete service configuration: chat server, storage,
//! batching behavior, and the control surface.

use serde::{Deserialize, Serialize};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete service configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Chat server settings
    pub chat: ChatConfig,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Batching settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Control surface settings
    #[serde(default)]
    pub control: ControlConfig,
}

/// Chat server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Chat server host
    #[serde(default = "default_chat_host")]
    pub host: String,

    /// Chat server port
    #[serde(default = "default_chat_port")]
    pub port: u16,

    /// Login nickname
    pub nickname: String,

    /// OAuth token sent as PASS (optional for anonymous logins)
    #[serde(default)]
    pub token: Option<String>,

    /// Channel to join, without the leading '#'
    pub channel: String,
}

fn default_chat_host() -> String {
    "irc.chat.twitch.tv".to_string()
}

fn default_chat_port() -> u16 {
    6667
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// sqlx connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://chat.db".to_string()
}

/// Batching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Batch-size threshold that triggers an immediate flush
    #[serde(default = "default_batch_size")]
    pub size: usize,

    /// Interval of the periodic flush timer, in seconds
    #[serde(default = "default_flush_interval_secs")]
    pub flush_interval_secs: u64,

    /// Capacity of the bounded queue between reader and batcher
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            size: default_batch_size(),
            flush_interval_secs: default_flush_interval_secs(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_batch_size() -> usize {
    5
}

fn default_flush_interval_secs() -> u64 {
    10
}

fn default_queue_capacity() -> usize {
    1000
}

/// Control surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Listen address for the admin HTTP server
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Prometheus exporter port (None = disabled)
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            metrics_port: None,
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let content = r#"
[chat]
nickname = "loader_bot"
channel = "somechannel"
"#;
        let blueprint: ServiceBlueprint = toml::from_str(content).unwrap();

        assert_eq!(blueprint.version, ConfigVersion::V1);
        assert_eq!(blueprint.chat.host, "irc.chat.twitch.tv");
        assert_eq!(blueprint.chat.port, 6667);
        assert_eq!(blueprint.batch.size, 5);
        assert_eq!(blueprint.batch.flush_interval_secs, 10);
        assert_eq!(blueprint.batch.queue_capacity, 1000);
        assert_eq!(blueprint.storage.database_url, "sqlite://chat.db");
        assert_eq!(blueprint.control.listen_addr, "127.0.0.1:8080");
        assert_eq!(blueprint.control.metrics_port, None);
    }

    #[test]
    fn full_toml_overrides_defaults() {
        let content = r#"
version = "v1"

[chat]
host = "localhost"
port = 7000
nickname = "bot"
token = "oauth:secret"
channel = "test"

[storage]
database_url = "sqlite://test.db"

[batch]
size = 20
flush_interval_secs = 2
queue_capacity = 64

[control]
listen_addr = "0.0.0.0:9090"
metrics_port = 9000
"#;
        let blueprint: ServiceBlueprint = toml::from_str(content).unwrap();

        assert_eq!(blueprint.chat.port, 7000);
        assert_eq!(blueprint.chat.token.as_deref(), Some("oauth:secret"));
        assert_eq!(blueprint.batch.size, 20);
        assert_eq!(blueprint.batch.queue_capacity, 64);
        assert_eq!(blueprint.control.metrics_port, Some(9000));
    }

    #[test]
    fn blueprint_roundtrips_through_json() {
        let content = r#"{"chat": {"nickname": "bot", "channel": "test"}}"#;
        let blueprint: ServiceBlueprint = serde_json::from_str(content).unwrap();
        let json = serde_json::to_string(&blueprint).unwrap();
        let back: ServiceBlueprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chat.channel, "test");
    }
}
