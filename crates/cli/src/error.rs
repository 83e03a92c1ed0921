//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Control server listen address is not a valid socket address
    #[error("Invalid control listen address '{addr}': {message}")]
    ControlAddr { addr: String, message: String },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn control_addr(addr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ControlAddr {
            addr: addr.into(),
            message: message.into(),
        }
    }
}
