//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineStats};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref host) = args.host {
        info!(host = %host, "Overriding chat host from CLI");
        blueprint.chat.host = host.clone();
    }
    if let Some(port) = args.port {
        info!(port, "Overriding chat port from CLI");
        blueprint.chat.port = port;
    }
    if let Some(ref channel) = args.channel {
        info!(channel = %channel, "Overriding chat channel from CLI");
        blueprint.chat.channel = channel.clone();
    }
    if let Some(ref url) = args.database_url {
        info!("Overriding database URL from CLI");
        blueprint.storage.database_url = url.clone();
    }
    if let Some(ref addr) = args.control_addr {
        info!(addr = %addr, "Overriding control listen address from CLI");
        blueprint.control.listen_addr = addr.clone();
    }
    if let Some(secs) = args.flush_interval {
        info!(secs, "Overriding flush interval from CLI");
        blueprint.batch.flush_interval_secs = secs;
    }
    if let Some(capacity) = args.queue_capacity {
        info!(capacity, "Overriding queue capacity from CLI");
        blueprint.batch.queue_capacity = capacity;
    }

    info!(
        host = %blueprint.chat.host,
        port = blueprint.chat.port,
        channel = %blueprint.chat.channel,
        batch_size = blueprint.batch.size,
        flush_interval_secs = blueprint.batch.flush_interval_secs,
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    let pipeline = Pipeline::new(blueprint);
    let cancel = pipeline.cancel_token();

    info!("Starting pipeline...");

    let mut run_task = tokio::spawn(pipeline.run());

    tokio::select! {
        result = &mut run_task => {
            report(result.context("Pipeline task panicked")?)?;
        }
        _ = shutdown_signal() => {
            warn!("Received shutdown signal, stopping pipeline...");
            cancel.cancel();
            match tokio::time::timeout(Duration::from_secs(5), &mut run_task).await {
                Ok(result) => report(result.context("Pipeline task panicked")?)?,
                Err(_) => warn!("Pipeline did not stop within 5s, abandoning"),
            }
        }
    }

    info!("Chat Loader finished");
    Ok(())
}

fn report(result: Result<PipelineStats>) -> Result<()> {
    match result {
        Ok(stats) => {
            info!(
                events_ingested = stats.events_ingested,
                events_flushed = stats.events_flushed,
                batches_flushed = stats.batches_flushed,
                duration_secs = stats.duration.as_secs_f64(),
                "Pipeline completed"
            );
            stats.print_summary();
            Ok(())
        }
        Err(e) => Err(e).context("Pipeline execution failed"),
    }
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::ServiceBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Chat:");
    println!(
        "  Server: {}:{}",
        blueprint.chat.host, blueprint.chat.port
    );
    println!("  Nickname: {}", blueprint.chat.nickname);
    println!("  Channel: #{}", blueprint.chat.channel);
    println!(
        "  Token: {}",
        if blueprint.chat.token.is_some() {
            "configured"
        } else {
            "none (anonymous)"
        }
    );
    println!("\nStorage:");
    println!("  Database: {}", blueprint.storage.database_url);
    println!("\nBatching:");
    println!("  Batch size: {}", blueprint.batch.size);
    println!(
        "  Flush interval: {}s",
        blueprint.batch.flush_interval_secs
    );
    println!("  Queue capacity: {}", blueprint.batch.queue_capacity);
    println!("\nControl:");
    println!("  Listen address: {}", blueprint.control.listen_addr);
    match blueprint.control.metrics_port {
        Some(port) => println!("  Metrics port: {}", port),
        None => println!("  Metrics: disabled"),
    }
    println!();
}
