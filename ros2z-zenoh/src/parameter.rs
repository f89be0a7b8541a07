//! Local parameter storage for a node.
//!
//! ROS2's full parameter protocol (`~/list_parameters`, `~/get_parameters`,
//! `~/set_parameters`, `~/set_parameters_atomically`, `~/describe_parameters`,
//! `~/get_parameter_types` as `rcl_interfaces` services) is out of scope for
//! this SDK. What's provided here is the part of that picture that's actually
//! load-bearing for the rest of the crate: a node's parameters are seeded from
//! `--ros-args -p name:=value` / `--params-file`, held in memory, and readable
//! by the application. A node wanting to expose those over the wire can layer
//! a [`crate::service::server::Server`] on top of [`Parameters`] itself.
//!
//! # Example
//!
//! ```ignore
//! use ros2z_zenoh::{Context, Node, parameter::ParameterStore};
//!
//! let ctx = Context::new()?;
//! let node = ctx.create_node("my_node", None)?;
//! let params = ParameterStore::from_node(&node)?;
//! tracing::info!("rate = {:?}", params.read().get_parameter("rate"));
//! ```

use crate::{error::Result, node::Node};
use parking_lot::RwLock;
use ros2z_core::parameter::{Parameters, Value};
use std::sync::Arc;

/// A node-scoped, shared [`Parameters`] store seeded from ROS2 CLI arguments.
#[derive(Clone)]
pub struct ParameterStore {
    params: Arc<RwLock<Parameters>>,
}

impl ParameterStore {
    /// Build a store pre-populated from `--ros-args -p` / `--params-file`
    /// assignments that target this node (matched by name or fully-qualified name).
    pub fn from_node(node: &Arc<Node>) -> Result<Self> {
        let mut params = Parameters::new();

        let ros2_args = node.context().ros2_args();
        let name = node.name();
        let fqn = node.fully_qualified_name();

        for node_name in [name, fqn.as_str()] {
            if let Ok(assignments) = ros2_args.get_params_for_node(node_name) {
                for param in assignments {
                    if let Some(value) = yaml_to_value(&param.value) {
                        let _ = params.set_parameter(param.name.clone(), value, false, None);
                    }
                }
            }
        }

        Ok(Self {
            params: Arc::new(RwLock::new(params)),
        })
    }

    /// Start from an empty store (no CLI-provided parameters).
    pub fn new() -> Self {
        Self {
            params: Arc::new(RwLock::new(Parameters::new())),
        }
    }

    /// Borrow the underlying store for reading.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, Parameters> {
        self.params.read()
    }

    /// Borrow the underlying store for writing.
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, Parameters> {
        self.params.write()
    }

    /// Clone the shared handle (cheap: an `Arc` bump).
    pub fn handle(&self) -> Arc<RwLock<Parameters>> {
        Arc::clone(&self.params)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a YAML scalar or homogeneous array (as found in a `--params-file`
/// or a `-p name:=value` assignment) into a [`Value`].
fn yaml_to_value(yaml: &yaml_rust2::Yaml) -> Option<Value> {
    use yaml_rust2::Yaml;
    match yaml {
        Yaml::Boolean(b) => Some(Value::Bool(*b)),
        Yaml::Integer(i) => Some(Value::I64(*i)),
        Yaml::Real(s) => s.parse::<f64>().ok().map(Value::F64),
        Yaml::String(s) => Some(Value::String(s.clone())),
        Yaml::Array(arr) => {
            let first = arr.first()?;
            match first {
                Yaml::Boolean(_) => arr.iter().map(Yaml::as_bool).collect::<Option<Vec<_>>>().map(Value::VecBool),
                Yaml::Integer(_) => arr.iter().map(Yaml::as_i64).collect::<Option<Vec<_>>>().map(Value::VecI64),
                Yaml::Real(_) => arr.iter().map(Yaml::as_f64).collect::<Option<Vec<_>>>().map(Value::VecF64),
                Yaml::String(_) => arr
                    .iter()
                    .map(|v| v.as_str().map(String::from))
                    .collect::<Option<Vec<_>>>()
                    .map(Value::VecString),
                _ => None,
            }
        }
        _ => None,
    }
}
