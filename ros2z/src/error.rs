//! Error type re-exported from the Zenoh backend.
//!
//! Kept as its own module (rather than a bare re-export at the crate root)
//! so that `ros2z::error::Result` reads the same way across the `ros2z-*`
//! family of crates.

pub use ros2z_zenoh::error::{Error, Result};
