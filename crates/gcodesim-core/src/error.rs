//! Error handling for gcodesim
//!
//! Provides the error types for all layers of the workspace:
//! - G-Code errors (interpretation/modal state)
//! - Configuration errors (loading/validation)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// G-Code error type
///
/// Represents errors raised while interpreting G-Code. The virtualizer never
/// aborts a stream on these; they are logged and the offending command is
/// dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// Unknown G-Code command
    #[error("Unknown G-Code at line {line_number}: {code}")]
    UnknownCode {
        /// The line number where the unknown code was found.
        line_number: u64,
        /// The unknown G-Code command.
        code: String,
    },

    /// Invalid modal state
    #[error("Invalid modal state: {reason}")]
    InvalidModalState {
        /// The reason for the invalid modal state.
        reason: String,
    },

    /// Travel time could not be computed for a move
    #[error("Invalid travel time at line {line_number}: {reason}")]
    InvalidTravelTime {
        /// The line number of the move.
        line_number: u64,
        /// Why the contribution was rejected.
        reason: String,
    },
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The configuration file is corrupted or malformed.
    #[error("Corrupted configuration: {0}")]
    Corrupted(String),

    /// A configuration value is out of valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },
}

/// Main error type for gcodesim
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcode_error_display() {
        let err = GcodeError::InvalidModalState {
            reason: "plane G16 is not supported".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid modal state: plane G16 is not supported"
        );
    }

    #[test]
    fn test_unknown_code_display() {
        let err: Error = GcodeError::UnknownCode {
            line_number: 7,
            code: "G28".to_string(),
        }
        .into();
        assert!(err.is_gcode_error());
        assert_eq!(err.to_string(), "Unknown G-Code at line 7: G28");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ConfigError::UnsupportedFormat("yaml".to_string()).into();
        assert!(err.is_config_error());
        assert!(!err.is_gcode_error());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
