//! Layered error definitions
//!
//! Categorized by source: config / chat transport / parse / store

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Chat Transport Errors =====
    /// Chat server connection error
    #[error("chat connection error: {message}")]
    ChatConnection { message: String },

    /// Chat stream read/write error
    #[error("chat stream error: {message}")]
    ChatStream { message: String },

    /// Protocol line parse error
    #[error("protocol parse error: {message}")]
    ProtocolParse { message: String },

    // ===== Store Errors =====
    /// Store connection error
    #[error("store connection error: {message}")]
    StoreConnection { message: String },

    /// Batch write error (transaction open or commit failed)
    #[error("store write error for batch of {batch_len}: {message}")]
    StoreWrite { batch_len: usize, message: String },

    /// Schema provisioning error
    #[error("store schema error: {message}")]
    StoreSchema { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create chat connection error
    pub fn chat_connection(message: impl Into<String>) -> Self {
        Self::ChatConnection {
            message: message.into(),
        }
    }

    /// Create chat stream error
    pub fn chat_stream(message: impl Into<String>) -> Self {
        Self::ChatStream {
            message: message.into(),
        }
    }

    /// Create store connection error
    pub fn store_connection(message: impl Into<String>) -> Self {
        Self::StoreConnection {
            message: message.into(),
        }
    }

    /// Create batch write error
    pub fn store_write(batch_len: usize, message: impl Into<String>) -> Self {
        Self::StoreWrite {
            batch_len,
            message: message.into(),
        }
    }

    /// Create schema provisioning error
    pub fn store_schema(message: impl Into<String>) -> Self {
        Self::StoreSchema {
            message: message.into(),
        }
    }
}
