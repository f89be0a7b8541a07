//! Async publish/subscribe integration test.

mod common;

use ros2z::prelude::*;
use std::error::Error;
use std::time::Duration;

const TOPIC_NAME: &str = "test_async_pubsub";

#[tokio::test(flavor = "multi_thread")]
async fn test_async_pubsub() -> Result<(), Box<dyn Error + Send + Sync>> {
    let ctx = Context::new()?;
    let node_pub = ctx.create_node("test_async_pub", None)?;
    let node_sub = ctx.create_node("test_async_sub", None)?;

    let publisher = common::create_publisher(node_pub.clone(), TOPIC_NAME)?;
    let mut subscriber = common::create_subscriber(node_sub.clone(), TOPIC_NAME)?;

    let pub_handle = tokio::spawn(async move {
        for n in 0..3i64 {
            let msg = common::Int64 { data: n };
            if let Err(e) = publisher.send(&msg) {
                eprintln!("Publish error: {e}");
                return;
            }
            println!("Published: {n}");
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    let sub_handle = tokio::spawn(async move {
        let timeout = Duration::from_millis(500);
        for expected in 0..3i64 {
            match tokio::time::timeout(timeout, subscriber.recv()).await {
                Ok(Ok(received)) => {
                    println!("Received: {}", received.data.data);
                    assert_eq!(received.data.data, expected);
                }
                Ok(Err(e)) => {
                    eprintln!("Receive error: {e}");
                    break;
                }
                Err(_) => {
                    println!("Timeout waiting for message");
                    break;
                }
            }
        }
    });

    pub_handle.await?;
    sub_handle.await?;

    Ok(())
}
