//! Configuration validation module
//!
//! Validation rules:
//! - chat.nickname and chat.channel non-empty
//! - batch.size >= 1
//! - batch.flush_interval_secs >= 1
//! - batch.queue_capacity >= 1
//! - storage.database_url non-empty
//! - control.listen_addr parses as a socket address

use std::net::SocketAddr;

use contracts::{ContractError, ServiceBlueprint};

/// Validate a ServiceBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    validate_chat(blueprint)?;
    validate_batch(blueprint)?;
    validate_storage(blueprint)?;
    validate_control(blueprint)?;
    Ok(())
}

fn validate_chat(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    if blueprint.chat.nickname.trim().is_empty() {
        return Err(ContractError::config_validation(
            "chat.nickname",
            "nickname must not be empty",
        ));
    }
    if blueprint.chat.channel.trim().is_empty() {
        return Err(ContractError::config_validation(
            "chat.channel",
            "channel must not be empty",
        ));
    }
    if blueprint.chat.channel.starts_with('#') {
        return Err(ContractError::config_validation(
            "chat.channel",
            "channel is given without the leading '#'",
        ));
    }
    Ok(())
}

fn validate_batch(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    let batch = &blueprint.batch;

    if batch.size < 1 {
        return Err(ContractError::config_validation(
            "batch.size",
            format!("batch size must be >= 1, got {}", batch.size),
        ));
    }
    if batch.flush_interval_secs < 1 {
        return Err(ContractError::config_validation(
            "batch.flush_interval_secs",
            format!(
                "flush interval must be >= 1 second, got {}",
                batch.flush_interval_secs
            ),
        ));
    }
    if batch.queue_capacity < 1 {
        return Err(ContractError::config_validation(
            "batch.queue_capacity",
            format!("queue capacity must be >= 1, got {}", batch.queue_capacity),
        ));
    }
    Ok(())
}

fn validate_storage(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    if blueprint.storage.database_url.trim().is_empty() {
        return Err(ContractError::config_validation(
            "storage.database_url",
            "database URL must not be empty",
        ));
    }
    Ok(())
}

fn validate_control(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    blueprint
        .control
        .listen_addr
        .parse::<SocketAddr>()
        .map_err(|e| {
            ContractError::config_validation(
                "control.listen_addr",
                format!(
                    "'{}' is not a valid socket address: {e}",
                    blueprint.control.listen_addr
                ),
            )
        })?;
    Ok(())
}
