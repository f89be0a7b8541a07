//! Error types for ros2z-zenoh.

use thiserror::Error;

/// Result type for ros2z-zenoh operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ros2z-zenoh.
#[derive(Debug, Error)]
pub enum Error {
    /// Zenoh session error
    #[error("Zenoh error: {0}")]
    Zenoh(#[from] zenoh::Error),

    /// CDR serialization error
    #[error("CDR serialization error: {0}")]
    Cdr(#[from] ros2_types::Error),

    /// Invalid name (topic, node, namespace)
    #[error("Invalid name: {0}")]
    InvalidName(#[from] ros2args::Ros2ArgsError),

    /// Context not initialized
    #[error("Context not initialized")]
    ContextNotInitialized,

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Service not available
    #[error("Service not available: {0}")]
    ServiceNotAvailable(String),

    /// Timeout waiting for response
    #[error("Timeout")]
    Timeout,

    /// Channel closed
    #[error("Channel closed")]
    ChannelClosed,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A service reply carried no attachment (protocol violation).
    #[error("service reply is missing its attachment")]
    MissingAttachment,

    /// A query reply resolved to an error sample.
    #[error("service reply error: {0}")]
    ReplyError(String),

    /// A type's `.msg`/`.srv` definition could not be located, locally or
    /// via the schema repository's fetch-on-miss path.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// A located `.msg`/`.srv` definition failed to parse.
    #[error("schema parse error: {0}")]
    SchemaParseError(String),

    /// A message attachment was too short or carried a malformed GID length.
    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),
}

/// Adapts [`ros2args::Ros2ArgsResult`] into this crate's [`Result`].
pub trait Ros2ArgsResultExt<T> {
    /// Maps a `Ros2ArgsError` into [`Error::InvalidName`].
    fn map_name_err(self) -> Result<T>;
}

impl<T> Ros2ArgsResultExt<T> for ros2args::Ros2ArgsResult<T> {
    fn map_name_err(self) -> Result<T> {
        self.map_err(Error::InvalidName)
    }
}
