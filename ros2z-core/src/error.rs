//! Error types shared by every `ros2z` backend.
//!
//! This crate is backend-agnostic: the `zenoh` backend (`ros2z-zenoh`) has its
//! own richer, transport-specific [`Error`](https://docs.rs/ros2z-zenoh) type
//! and converts into this one only at the trait boundary defined in [`crate::api`].

use thiserror::Error;

/// Result type threaded through the [`crate::api`] traits.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the backend-agnostic [`crate::api`] traits.
#[derive(Debug, Error)]
pub enum Error {
    /// The operation is recognized but this backend does not implement it
    /// (for example, ROS2 actions on the Zenoh backend; see the crate's Non-goals).
    #[error("{feature} is not implemented: {reason}")]
    NotImplemented {
        /// Name of the unimplemented feature.
        feature: String,
        /// Why it isn't implemented (or not yet).
        reason: String,
    },

    /// A ROS2 name (node, topic, service, or namespace) failed validation.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Catch-all for backend errors that don't need their own variant here.
    #[error("{0}")]
    Other(String),
}

/// Alias kept for readability at action-related call sites.
pub type ActionError = Error;

/// Alias kept for readability at name/argument-related call sites.
pub type RclError = Error;
