//! Topic publisher and subscriber.

pub mod publisher;
pub mod subscriber;

pub use publisher::Publisher;
pub use subscriber::{ReceivedMessage, Subscriber};
