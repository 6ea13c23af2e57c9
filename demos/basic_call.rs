//! Basic example demonstrating simple GET and POST requests.
//!
//! This example shows how to:
//! - Create a client with default configuration
//! - Make GET and POST requests
//! - Access decoded response data and metadata
//!
//! Run with: `cargo run --example basic_call`

use palisade::{Client, Error};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("palisade=debug,basic_call=info")
        .init();

    let client = Client::new()?;

    println!("=== GET Request Example ===");
    let response = client
        .get("https://jsonplaceholder.typicode.com/posts/1")
        .await?;

    println!(
        "Status: {} {}",
        response.status.as_u16(),
        response.status_text
    );
    println!("Elapsed: {:?}", response.elapsed);
    if let Some(post) = response.data.as_json() {
        println!("Title: {}", post["title"]);
    }
    println!();

    println!("=== POST Request Example ===");
    let created = client
        .post(
            "https://jsonplaceholder.typicode.com/posts",
            json!({
                "title": "Hello from palisade",
                "body": "A new post",
                "userId": 1
            }),
        )
        .await?;

    println!("Status: {}", created.status.as_u16());
    if let Some(post) = created.data.as_json() {
        println!("Created post ID: {}", post["id"]);
    }

    Ok(())
}
