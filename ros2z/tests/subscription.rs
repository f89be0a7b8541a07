mod common;

use ros2z::prelude::*;
use std::error::Error;

#[test]
fn test_subscription() -> Result<(), Box<dyn Error + Sync + Send + 'static>> {
    let ctx = Context::new()?;
    let node = ctx.create_node("test_subscription_node", None)?;

    let mut subscription = node.create_subscriber::<common::Int64>("test_subscription", None)?;

    // No publisher exists yet, so there is nothing to receive.
    assert!(subscription.try_recv()?.is_none());
    Ok(())
}
