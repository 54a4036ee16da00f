//! Error types for the retequiv library.

use std::path::PathBuf;

use thiserror::Error;

use crate::bytecode::Location;

/// Result type alias using retequiv's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while filtering mutants.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A mutation names a method that does not exist in the class being filtered.
    #[error("Unresolved location: no method {location} in the current class")]
    UnresolvedLocation { location: Location },

    /// A mutation points past the end of its method's instruction list.
    #[error("Instruction index {index} out of range for {location} ({len} instructions)")]
    InstructionOutOfRange {
        location: Location,
        index: usize,
        len: usize,
    },

    /// A mutation targets an instruction with no executable instruction before it.
    #[error("No real instruction precedes index {index} in {location}")]
    NoPrecedingInstruction { location: Location, index: usize },

    /// A sequence pattern was built incorrectly.
    #[error("Malformed pattern: {0}")]
    MalformedPattern(String),

    /// A method descriptor could not be parsed.
    #[error("Invalid method descriptor: {0}")]
    InvalidDescriptor(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML rendering error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new malformed pattern error.
    pub fn malformed_pattern(message: impl Into<String>) -> Self {
        Self::MalformedPattern(message.into())
    }

    /// Create a new invalid descriptor error.
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("missing [features] table");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing [features] table"
        );

        let err = Error::FileNotFound {
            path: PathBuf::from("unit.json"),
        };
        assert_eq!(err.to_string(), "File not found: unit.json");
    }

    #[test]
    fn test_unresolved_location_names_the_method() {
        let err = Error::UnresolvedLocation {
            location: Location::new("com/example/Foo", "bar", "()I"),
        };
        let message = err.to_string();
        assert!(message.contains("com/example/Foo.bar()I"), "got: {message}");
        assert!(message.starts_with("Unresolved location"));
    }

    #[test]
    fn test_malformed_pattern() {
        let err = Error::malformed_pattern("slot `x` is read before it is written");
        match err {
            Error::MalformedPattern(message) => assert!(message.contains("slot `x`")),
            _ => panic!("Expected MalformedPattern"),
        }
    }
}
