//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Constant names unique and non-empty
//! - Scan entries unique and non-empty
//! - Log level recognized
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("constant #{0} has an empty name")]
    EmptyConstantName(usize),

    #[error("constant `{0}` is defined more than once")]
    DuplicateConstant(String),

    #[error("scan entry #{0} names no controller set")]
    EmptyScan(usize),

    #[error("controller set `{0}` is scanned more than once")]
    DuplicateScan(String),

    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for (index, constant) in config.constants.iter().enumerate() {
        if constant.name.trim().is_empty() {
            errors.push(ValidationError::EmptyConstantName(index));
        } else if !names.insert(constant.name.as_str()) {
            errors.push(ValidationError::DuplicateConstant(constant.name.clone()));
        }
    }

    let mut sets = HashSet::new();
    for (index, scan) in config.scan.iter().enumerate() {
        if scan.controllers.trim().is_empty() {
            errors.push(ValidationError::EmptyScan(index));
        } else if !sets.insert(scan.controllers.as_str()) {
            errors.push(ValidationError::DuplicateScan(scan.controllers.clone()));
        }
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
