//! Native ROS2 implementation using Zenoh middleware.
//!
//! This crate provides a pure Rust ROS2 implementation that communicates over Zenoh,
//! compatible with `rmw_zenoh_cpp`. This allows ROS2 nodes built with this crate to
//! interoperate with standard ROS2 nodes using the Zenoh RMW.
//!
//! # Architecture
//!
//! The implementation follows the [rmw_zenoh design](https://github.com/ros2/rmw_zenoh/blob/rolling/docs/design.md):
//!
//! - Each [`Context`] maps to a Zenoh session
//! - [`Node`]s are logical groupings with liveliness tokens
//! - [`Publisher`]/[`Subscriber`] use Zenoh pub/sub
//! - [`Client`]/[`Server`] use Zenoh queryables
//! - Graph discovery via Zenoh liveliness tokens
//!
//! # Example
//!
//! ```ignore
//! use ros2z_zenoh::{Context, Node};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = Context::new()?;
//!     let node = ctx.create_node("my_node", None)?;
//!
//!     // Create publisher, subscriber, etc.
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod attachment;
mod clock;
mod context;
mod error;
mod graph_cache;
mod keyexpr;
mod node;
mod qos;
mod selector;
mod type_registry;

pub mod logger;
pub mod service;
pub mod topic;

pub mod parameter;

// Re-exports
pub use clock::Clock;
pub use context::Context;
pub use error::{Error, Result};
pub use graph_cache::GraphCache;
pub use node::Node;
pub use qos::QosMapping;
pub use selector::Selector;
pub use service::ServiceRequest;
pub use type_registry::TypeRegistry;

// Re-export core types
pub use ros2z_core::{
    Descriptor, DurabilityPolicy, FloatingPointRange, HistoryPolicy, IntegerRange,
    LivelinessPolicy, Parameter, Profile, ReliabilityPolicy, TypeSupport, Value,
};

// Re-export error types for compatibility
pub use ros2z_core::error::{ActionError, RclError};

// Re-export selector callback result
pub use ros2z_core::selector::CallbackResult;

// Re-export parameter storage
pub use ros2z_core::parameter::Parameters;
