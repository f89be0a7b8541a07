/// Error types for ROS2 message parsing
use thiserror::Error;

/// Main error type for ROS2 message parsing
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error("Invalid resource name: {name} - {reason}")]
    InvalidResourceName { name: String, reason: String },

    #[error("Invalid type definition: {type_string} - {reason}")]
    InvalidType { type_string: String, reason: String },

    #[error("Invalid value: {value} for type {type_info} - {reason}")]
    InvalidValue {
        value: String,
        type_info: String,
        reason: String,
    },

    #[error("Invalid service specification: {reason}")]
    InvalidServiceSpecification { reason: String },

    #[error("Invalid action specification: {reason}")]
    InvalidActionSpecification { reason: String },

    #[error("Parse error at line {line}: {message}")]
    LineParseError { line: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid array definition: {reason}")]
    InvalidArray { reason: String },

    #[error("Invalid constant definition: {reason}")]
    InvalidConstant { reason: String },

    #[error("Invalid field definition: {reason}")]
    InvalidField { reason: String },

    #[error("Invalid annotation: {annotation} - {reason}")]
    InvalidAnnotation { annotation: String, reason: String },

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Helper function to create `InvalidResourceName` errors
#[must_use]
pub fn invalid_resource_name(name: &str, pattern: &str) -> ParseError {
    ParseError::InvalidResourceName {
        name: name.to_string(),
        reason: format!("should match pattern: {pattern}"),
    }
}

/// Helper function to create `InvalidValue` errors
#[must_use]
pub fn invalid_value(value: &str, type_info: &str, reason: &str) -> ParseError {
    ParseError::InvalidValue {
        value: value.to_string(),
        type_info: type_info.to_string(),
        reason: reason.to_string(),
    }
}

/// Helper function to create `InvalidType` errors
#[must_use]
pub fn invalid_type(type_string: &str, reason: &str) -> ParseError {
    ParseError::InvalidType {
        type_string: type_string.to_string(),
        reason: reason.to_string(),
    }
}
