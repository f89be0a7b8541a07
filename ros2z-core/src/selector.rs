//! Shared selector types.
//!
//! The selector itself (event multiplexing over subscribers, servers, and
//! timers) lives in `ros2z-zenoh::Selector`. This module only holds the
//! small vocabulary type shared by its callback signatures.

/// Result of a selector callback, letting a callback ask to be deregistered.
#[derive(Debug, Eq, PartialEq)]
pub enum CallbackResult {
    /// Callback executed successfully, keep it registered.
    Ok,

    /// Remove this callback from the selector.
    Remove,
}
