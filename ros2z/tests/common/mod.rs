#![allow(dead_code)]

//! Hand-written test fixtures standing in for derive-macro-generated messages.
//!
//! These mirror `example_interfaces/msg/Int64` and
//! `example_interfaces/srv/AddTwoInts` closely enough to exercise the
//! pub/sub and service code paths end to end.

use ros2_types::types::{Field, FieldType, IndividualTypeDescription, TypeDescriptionMsg};
use ros2_types::{CdrSerde, FIELD_TYPE_INT64, MessageTypeName, Result as Ros2Result, TypeDescription};
use ros2z::error::Result;
use ros2z::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Int64 {
    pub data: i64,
}

impl TypeSupport for Int64 {
    fn to_bytes(&self) -> Ros2Result<Vec<u8>> {
        CdrSerde::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Ros2Result<Self> {
        CdrSerde::deserialize(bytes)
    }

    fn type_name() -> &'static str {
        "example_interfaces::msg::dds_::Int64_"
    }

    fn type_hash() -> Ros2Result<String> {
        Int64::compute_hash()
    }
}

impl TypeDescription for Int64 {
    fn type_description() -> TypeDescriptionMsg {
        TypeDescriptionMsg {
            type_description: IndividualTypeDescription {
                type_name: "example_interfaces/msg/Int64".to_string(),
                fields: vec![Field {
                    name: "data".to_string(),
                    field_type: FieldType::primitive(FIELD_TYPE_INT64),
                    default_value: String::new(),
                }],
            },
            referenced_type_descriptions: Vec::new(),
        }
    }

    fn message_type_name() -> MessageTypeName {
        MessageTypeName::new("msg", "example_interfaces", "Int64")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTwoIntsRequest {
    pub a: i64,
    pub b: i64,
}

impl TypeSupport for AddTwoIntsRequest {
    fn to_bytes(&self) -> Ros2Result<Vec<u8>> {
        CdrSerde::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Ros2Result<Self> {
        CdrSerde::deserialize(bytes)
    }

    fn type_name() -> &'static str {
        "example_interfaces::srv::dds_::AddTwoInts_Request_"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTwoIntsResponse {
    pub sum: i64,
}

impl TypeSupport for AddTwoIntsResponse {
    fn to_bytes(&self) -> Ros2Result<Vec<u8>> {
        CdrSerde::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Ros2Result<Self> {
        CdrSerde::deserialize(bytes)
    }

    fn type_name() -> &'static str {
        "example_interfaces::srv::dds_::AddTwoInts_Response_"
    }
}

pub struct AddTwoInts;

impl ServiceMsg for AddTwoInts {
    type Request = AddTwoIntsRequest;
    type Response = AddTwoIntsResponse;

    fn type_name() -> &'static str {
        "example_interfaces::srv::dds_::AddTwoInts_"
    }
}

pub fn create_publisher(node: Arc<Node>, topic_name: &str) -> Result<Publisher<Int64>> {
    node.create_publisher(topic_name, None)
}

pub fn create_subscriber(node: Arc<Node>, topic_name: &str) -> Result<Subscriber<Int64>> {
    node.create_subscriber(topic_name, None)
}

pub fn create_server(node: Arc<Node>, service_name: &str) -> Result<Server<AddTwoInts>> {
    node.create_server(service_name, None)
}

pub fn create_client(node: Arc<Node>, service_name: &str) -> Result<Client<AddTwoInts>> {
    node.create_client(service_name, None)
}
