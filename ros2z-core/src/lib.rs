//! Core traits and types for the `ros2z` ROS2 client library.
//!
//! This crate provides the foundational types shared by every backend crate
//! (currently only `ros2z-zenoh`): message/service/action traits, parameter
//! storage, QoS profiles, and the error type threaded through them.

pub mod action;
pub mod error;
pub mod helper;
pub mod message;
pub mod msg;
pub mod parameter;
pub mod qos;
pub mod selector;

// Re-export commonly used error types
pub use error::{ActionError, Error, RclError, Result};

// Re-export message traits (the real, CDR-capable definitions live in ros2-types)
pub use msg::{
    ActionGoal, ActionMsg, ActionResult, GetUUID, GoalResponse, ResultResponse, ServiceMsg,
    TryClone, TypeSupport,
};
pub use message::{MessageInfo, TakenMsg};
pub use parameter::{Descriptor, FloatingPointRange, IntegerRange, Parameter, Parameters, Value};
pub use qos::{DurabilityPolicy, HistoryPolicy, LivelinessPolicy, Profile, ReliabilityPolicy};
pub use ros2_types::traits::{CdrSerde, UnsafeDuration, UnsafeTime};
