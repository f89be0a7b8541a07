//! Async service client/server integration test, matching the
//! AddTwoInts callback scenario: the server computes `a + b` and the
//! client observes the matching sum for each call.

mod common;

use ros2z::prelude::*;
use std::error::Error;
use std::time::Duration;

const SERVICE_NAME: &str = "test_async_service";

#[tokio::test(flavor = "multi_thread")]
async fn test_async_service() -> Result<(), Box<dyn Error + Send + Sync>> {
    let ctx = Context::new()?;
    let node_server = ctx.create_node("test_async_server", None)?;
    let node_client = ctx.create_node("test_async_client", None)?;

    let mut server = common::create_server(node_server.clone(), SERVICE_NAME)?;
    let client = common::create_client(node_client.clone(), SERVICE_NAME)?;

    let server_handle = tokio::spawn(async move {
        let timeout = Duration::from_secs(3);
        for _ in 0..3 {
            match tokio::time::timeout(timeout, server.recv()).await {
                Ok(Ok(request)) => {
                    let (req, sender) = request.split();
                    println!("Server received: a={}, b={}", req.a, req.b);
                    let response = common::AddTwoIntsResponse { sum: req.a + req.b };
                    if let Err(e) = sender.send(response) {
                        eprintln!("Server respond error: {e}");
                    }
                }
                Ok(Err(e)) => {
                    eprintln!("Server recv error: {e}");
                    break;
                }
                Err(_) => {
                    println!("Server timeout");
                    break;
                }
            }
        }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let client_handle = tokio::spawn(async move {
        for n in 0..3i64 {
            let request = common::AddTwoIntsRequest { a: n, b: n * 10 };
            println!("Client sending: a={}, b={}", request.a, request.b);

            match tokio::time::timeout(Duration::from_secs(2), client.call(&request)).await {
                Ok(Ok(reply)) => {
                    println!("Client received: sum={}", reply.response.sum);
                    assert_eq!(reply.response.sum, n + n * 10);
                }
                Ok(Err(e)) => {
                    eprintln!("Client call error: {e}");
                    break;
                }
                Err(_) => {
                    eprintln!("Client timeout");
                    break;
                }
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    let _ = tokio::time::timeout(Duration::from_secs(5), server_handle).await;
    client_handle.await?;

    Ok(())
}
