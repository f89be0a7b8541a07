//! Service client call against a server driven through the poll-based
//! [`Selector`] (as opposed to the `Server::recv` async path exercised by
//! `async_service.rs`).

mod common;

use ros2z::prelude::*;
use std::error::Error;
use std::time::Duration;

const SERVICE_NAME: &str = "test_client_wait_service";

#[tokio::test(flavor = "multi_thread")]
async fn test_client_wait() -> Result<(), Box<dyn Error + Send + Sync>> {
    let ctx = Context::new()?;

    let node_server = ctx.create_node("test_client_wait_server_node", None)?;
    let node_client = ctx.create_node("test_client_wait_client_node", None)?;

    let server = common::create_server(node_server, SERVICE_NAME)?;
    let client = common::create_client(node_client, SERVICE_NAME)?;

    let server_ctx = ctx.clone();
    let server_thread = std::thread::spawn(move || {
        let mut selector = server_ctx.create_selector();
        selector.add_server(
            server,
            Box::new(|request: common::AddTwoIntsRequest| common::AddTwoIntsResponse {
                sum: request.a + request.b,
            }),
        );
        let deadline = std::time::Instant::now() + Duration::from_secs(3);
        while std::time::Instant::now() < deadline {
            let _ = selector.wait_timeout(Duration::from_millis(100));
        }
    });

    let request = common::AddTwoIntsRequest { a: 1, b: 7 };
    let reply = tokio::time::timeout(Duration::from_secs(2), client.call(&request)).await??;
    assert_eq!(reply.response.sum, 8);

    server_thread.join().expect("server thread panicked");
    Ok(())
}
