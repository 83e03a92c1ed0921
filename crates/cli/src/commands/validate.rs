//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    chat_server: String,
    channel: String,
    database_url: String,
    batch_size: usize,
    flush_interval_secs: u64,
    queue_capacity: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    chat_server: format!("{}:{}", blueprint.chat.host, blueprint.chat.port),
                    channel: blueprint.chat.channel.clone(),
                    database_url: blueprint.storage.database_url.clone(),
                    batch_size: blueprint.batch.size,
                    flush_interval_secs: blueprint.batch.flush_interval_secs,
                    queue_capacity: blueprint.batch.queue_capacity,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &contracts::ServiceBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.chat.token.is_none() {
        warnings.push(
            "No chat token configured - connecting anonymously, most servers reject writes"
                .to_string(),
        );
    }

    if blueprint.batch.size == 1 {
        warnings.push("batch.size is 1 - every event commits its own transaction".to_string());
    }

    if blueprint.control.metrics_port.is_none() {
        warnings.push("No metrics port configured - Prometheus endpoint disabled".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Chat server: {}", summary.chat_server);
            println!("  Channel: #{}", summary.channel);
            println!("  Database: {}", summary.database_url);
            println!("  Batch size: {}", summary.batch_size);
            println!("  Flush interval: {}s", summary.flush_interval_secs);
            println!("  Queue capacity: {}", summary.queue_capacity);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args_for(path: &std::path::Path, json: bool) -> ValidateArgs {
        ValidateArgs {
            config: path.to_path_buf(),
            json,
        }
    }

    #[test]
    fn missing_file_is_invalid() {
        let args = args_for(std::path::Path::new("/nonexistent/config.toml"), false);
        let result = validate_config(&args);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("File not found"));
    }

    #[test]
    fn minimal_config_validates_with_warnings() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[chat]\nnickname = \"bot\"\nchannel = \"general\"\n"
        )
        .unwrap();

        let args = args_for(file.path(), false);
        let result = validate_config(&args);
        assert!(result.valid);

        let summary = result.summary.unwrap();
        assert_eq!(summary.batch_size, 5);
        assert_eq!(summary.flush_interval_secs, 10);

        // Anonymous token and missing metrics port both warn
        let warnings = result.warnings.unwrap();
        assert!(warnings.iter().any(|w| w.contains("anonymously")));
    }

    #[test]
    fn invalid_config_reports_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[chat]\nnickname = \"\"\nchannel = \"general\"\n"
        )
        .unwrap();

        let args = args_for(file.path(), false);
        let result = validate_config(&args);
        assert!(!result.valid);
        assert!(result.error.is_some());
    }
}
