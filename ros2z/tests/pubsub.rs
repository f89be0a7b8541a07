//! Publish/subscribe integration test driven through the [`Selector`].

mod common;

use ros2z::prelude::*;
use std::error::Error;
use std::time::Duration;

const TOPIC_NAME: &str = "test_pubsub";

#[test]
fn test_pubsub() -> Result<(), Box<dyn Error + Send + Sync>> {
    let ctx = Context::new()?;

    let node_pub = ctx.create_node("test_pub_node", None)?;
    let node_sub = ctx.create_node("test_sub_node", None)?;

    let publisher = common::create_publisher(node_pub.clone(), TOPIC_NAME)?;
    let subscriber = common::create_subscriber(node_sub.clone(), TOPIC_NAME)?;

    let n = 42i64;
    let msg = common::Int64 { data: n };
    publisher.send(&msg)?;

    let mut selector = ctx.create_selector();
    static COUNT: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

    selector.add_subscriber(
        subscriber,
        Box::new(move |received: ReceivedMessage<common::Int64>| {
            assert_eq!(received.data.data, n);
            COUNT.fetch_add(1, std::sync::atomic::Ordering::AcqRel);
        }),
    );

    selector.wait_timeout(Duration::from_secs(2))?;

    assert_ne!(COUNT.load(std::sync::atomic::Ordering::Relaxed), 0);
    Ok(())
}

#[test]
fn test_pubsub_multiple_messages() -> Result<(), Box<dyn Error + Send + Sync>> {
    let ctx = Context::new()?;

    let node_pub = ctx.create_node("test_multi_pub_node", None)?;
    let node_sub = ctx.create_node("test_multi_sub_node", None)?;

    let publisher: Publisher<common::Int64> = node_pub.create_publisher("test_multi_pubsub", None)?;
    let subscriber: Subscriber<common::Int64> = node_sub.create_subscriber("test_multi_pubsub", None)?;

    for i in 0..3 {
        let msg = common::Int64 { data: i };
        publisher.send(&msg)?;
    }

    let mut selector = ctx.create_selector();
    static COUNT: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);
    selector.add_subscriber(
        subscriber,
        Box::new(|_received: ReceivedMessage<common::Int64>| {
            COUNT.fetch_add(1, std::sync::atomic::Ordering::AcqRel);
        }),
    );
    for _ in 0..3 {
        let _ = selector.wait_timeout(Duration::from_millis(500));
    }
    assert_ne!(COUNT.load(std::sync::atomic::Ordering::Relaxed), 0);
    Ok(())
}
