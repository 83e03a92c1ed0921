//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Chat Loader - chat event ingestion and batch persistence pipeline
#[derive(Parser, Debug)]
#[command(
    name = "chat-loader",
    author,
    version,
    about = "Chat event ingestion and batch persistence pipeline",
    long_about = "Connects to a chat server over IRC, filters message events out of \n\
                  the protocol stream, accumulates them into batches, and writes \n\
                  each batch to a relational store in one transaction.\n\n\
                  Batch size is adjustable at runtime through the HTTP control \n\
                  surface; health counters are exposed alongside it."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "CHAT_LOADER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "CHAT_LOADER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the ingestion pipeline
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "CHAT_LOADER_CONFIG")]
    pub config: PathBuf,

    /// Override chat server host from configuration
    #[arg(long, env = "CHAT_HOST")]
    pub host: Option<String>,

    /// Override chat server port from configuration
    #[arg(long, env = "CHAT_PORT")]
    pub port: Option<u16>,

    /// Override chat channel from configuration
    #[arg(long, env = "CHAT_CHANNEL")]
    pub channel: Option<String>,

    /// Override database URL from configuration
    #[arg(long, env = "CHAT_LOADER_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Override control server listen address from configuration
    #[arg(long, env = "CHAT_LOADER_CONTROL_ADDR")]
    pub control_addr: Option<String>,

    /// Override flush interval in seconds from configuration
    #[arg(long, env = "CHAT_LOADER_FLUSH_INTERVAL")]
    pub flush_interval: Option<u64>,

    /// Override event queue capacity from configuration
    #[arg(long, env = "CHAT_LOADER_QUEUE_CAPACITY")]
    pub queue_capacity: Option<usize>,

    /// Validate configuration and exit without running pipeline
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
