//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Smallest accepted `limits.max_line_length`.
const MIN_LINE_LENGTH: usize = 16;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.max_users must be at least 1")]
    NoCapacity,
    #[error("listen.address is required")]
    MissingAddress,
    #[error("limits.send_queue must be at least 1")]
    EmptySendQueue,
    #[error("limits.max_line_length must be at least 16, got {0}")]
    LineLengthTooSmall(usize),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.max_users == 0 {
        errors.push(ValidationError::NoCapacity);
    }
    if config.listen.address.trim().is_empty() {
        errors.push(ValidationError::MissingAddress);
    }
    if config.limits.send_queue == 0 {
        errors.push(ValidationError::EmptySendQueue);
    }
    if config.limits.max_line_length < MIN_LINE_LENGTH {
        errors.push(ValidationError::LineLengthTooSmall(
            config.limits.max_line_length,
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate(&Config::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = Config::default();
        config.server.max_users = 0;
        config.listen.address = String::new();
        config.limits.send_queue = 0;
        config.limits.max_line_length = 4;

        let errors = validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::NoCapacity,
                ValidationError::MissingAddress,
                ValidationError::EmptySendQueue,
                ValidationError::LineLengthTooSmall(4),
            ]
        );
    }
}
