//! Message, service, and action traits for ROS2 messages.
//!
//! The real trait definitions (including CDR `to_bytes`/`from_bytes` and
//! `type_hash`) live in `ros2-types`, which owns message schemas and the
//! RIHS01 hash engine. This module re-exports them so backend crates can
//! write `ros2z_core::TypeSupport` without depending on `ros2-types` by name.

pub use ros2_types::traits::{
    ActionGoal, ActionMsg, ActionResult, GetUUID, GoalResponse, ResultResponse, ServiceMsg,
    TryClone, TypeSupport,
};
