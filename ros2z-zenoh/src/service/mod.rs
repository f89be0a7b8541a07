//! Service client and server.

pub mod client;
pub mod server;

pub use client::{Client, ClientResponse};
pub use server::{Server, ServiceRequest};
