//! # ros2z - a ROS2-over-Zenoh SDK
//!
//! `ros2z` talks to stock ROS2 nodes over their `rmw_zenoh` wire protocol
//! without linking against ROS2 or DDS. It's a pure-Rust implementation:
//! key expressions, liveliness tokens, CDR encoding, and QoS mapping are
//! all reimplemented against the public [rmw_zenoh design
//! docs](https://github.com/ros2/rmw_zenoh/blob/rolling/docs/design.md).
//!
//! # Quick Start
//!
//! ```toml
//! [dependencies]
//! ros2z = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! # Usage Patterns
//!
//! ## Async/Await Pattern
//!
//! ```ignore
//! use ros2z::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_ros_logging("my_node");
//!
//!     let ctx = Context::new()?;
//!     let node = ctx.create_node("my_node", None)?;
//!
//!     let publisher = node.create_publisher::<MyMsg>("chatter", None)?;
//!     let mut subscriber = node.create_subscriber::<MyMsg>("chatter", None)?;
//!
//!     publisher.send(&MyMsg::default())?;
//!     let received = subscriber.recv().await?;
//!     tracing::info!("Received: {:?}", received.data);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Selector Pattern (Callback-based)
//!
//! ```ignore
//! use ros2z::prelude::*;
//! use std::time::Duration;
//!
//! fn main() -> ros2z::error::Result<()> {
//!     let ctx = Context::new()?;
//!     let node = ctx.create_node("my_node", None)?;
//!     let mut selector = ctx.create_selector();
//!
//!     let subscriber = node.create_subscriber::<MyMsg>("chatter", None)?;
//!     selector.add_subscriber(subscriber, Box::new(|msg| {
//!         tracing::info!("Received: {:?}", msg.data);
//!     }));
//!
//!     selector.add_wall_timer("timer", Duration::from_secs(1), Box::new(|| {
//!         tracing::info!("Timer fired!");
//!     }));
//!
//!     loop {
//!         selector.wait()?;
//!     }
//! }
//! ```
//!
//! # Services
//!
//! ```ignore
//! use ros2z::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = Context::new()?;
//!     let node = ctx.create_node("my_node", None)?;
//!
//!     let client = node.create_client::<AddTwoInts>("add_two_ints", None)?;
//!     let response = client.call(&AddTwoIntsRequest { a: 1, b: 2 }).await?;
//!     println!("Sum: {}", response.response.sum);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! `ros2z` uses the `tracing` ecosystem:
//!
//! ```ignore
//! use ros2z::prelude::*;
//!
//! fn main() {
//!     init_ros_logging("my_node");
//!     tracing::info!("Node started");
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`ros2z`](crate) - This facade crate (use in applications)
//! - `ros2z-zenoh` - The Zenoh transport backend
//! - `ros2z-core` - Shared traits, QoS profiles, and parameter storage
//! - `ros2-types` - Type descriptions, RIHS01 hashing, and CDR codec
//! - `ros2msg` - `.msg`/`.srv`/`.action` parsing and Rust codegen
//! - `ros2args` - `--ros-args` command-line parsing

pub mod error;
pub mod prelude;

pub use ros2z_zenoh;

// Re-export the Zenoh backend's entity types directly at the crate root,
// mirroring how applications actually use this crate.
pub use ros2z_zenoh::{
    Context, GraphCache, Node, QosMapping, Selector,
    logger::init_ros_logging,
    parameter::ParameterStore,
    service::{Client, ClientResponse, Server, ServiceRequest},
    topic::{Publisher, ReceivedMessage, Subscriber},
};

// Re-export core traits, QoS, and parameter types shared across backends.
pub use ros2z_core::{
    self, Descriptor, DurabilityPolicy, FloatingPointRange, HistoryPolicy, IntegerRange,
    LivelinessPolicy, Parameter, Parameters, Profile, ReliabilityPolicy, ServiceMsg, TypeSupport,
    Value,
};

pub mod qos {
    //! QoS profile types.
    pub use ros2z_core::qos::*;
}
