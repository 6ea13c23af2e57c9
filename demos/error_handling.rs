//! Example demonstrating comprehensive error handling.
//!
//! This example shows how to:
//! - Handle HTTP error statuses while keeping the decoded body
//! - Distinguish network failures from timeouts
//! - Check whether an error is worth retrying
//! - Tune per-request timeout and retry overrides
//!
//! Run with: `cargo run --example error_handling`

use std::time::Duration;

use palisade::{Client, Error, Method, RequestSpec};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("palisade=info")
        .init();

    let client = Client::new()?;

    println!("=== Example 1: HTTP errors keep the response ===");
    match client
        .get("https://jsonplaceholder.typicode.com/posts/999999")
        .await
    {
        Ok(response) => println!("Success: {:?}", response.data),
        Err(Error::Http { status, response }) => {
            println!("HTTP Error!");
            println!("  Status: {}", status);
            println!("  Is client error (4xx): {}", status.is_client_error());
            println!("  Decoded body: {:?}", response.data);
            println!("  Content-Type: {:?}", response.header("content-type"));
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Network errors have no status ===");
    let spec = RequestSpec::new(Method::Get, "https://this-domain-does-not-exist-12345.com/")
        .with_retries(0);
    match client.execute(&spec).await {
        Ok(_) => println!("Unexpected success"),
        Err(Error::Network(e)) => {
            println!("Network Error!");
            println!("  Error: {}", e);
            println!("  Is connect error: {}", e.is_connect());
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Checking retryability ===");
    let spec = RequestSpec::new(Method::Get, "https://httpbin.org/status/503").with_retries(0);
    match client.execute(&spec).await {
        Ok(_) => println!("Unexpected success"),
        Err(e) => {
            println!("Error: {}", e);
            println!("  Is retryable: {}", e.is_retryable());
            println!("  Status: {:?}", e.status());
        }
    }
    println!();

    println!("=== Example 4: Tight timeout ===");
    let spec = RequestSpec::new(Method::Get, "https://httpbin.org/delay/10")
        .with_timeout(Duration::from_millis(500))
        .with_retries(0);
    match client.execute(&spec).await {
        Ok(_) => println!("Unexpected success"),
        Err(e @ Error::Timeout { .. }) => {
            println!("{}", e);
            println!("  Reported status: {:?}", e.status());
        }
        Err(e) => println!("Other error: {}", e),
    }

    Ok(())
}
