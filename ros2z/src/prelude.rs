//! Convenience re-exports for application code.
//!
//! ```ignore
//! use ros2z::prelude::*;
//!
//! let ctx = Context::new()?;
//! let node = ctx.create_node("my_node", None)?;
//! let publisher = node.create_publisher::<MyMessage>("topic", None)?;
//! publisher.send(&msg)?;
//! ```

pub use crate::error::{Error, Result};
pub use ros2z_core::{Profile, ServiceMsg, TypeSupport};
pub use ros2z_zenoh::{
    Context, Node, Selector,
    logger::init_ros_logging,
    parameter::ParameterStore,
    service::{Client, ClientResponse, Server, ServiceRequest},
    topic::{Publisher, ReceivedMessage, Subscriber},
};
