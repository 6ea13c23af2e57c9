//! Example demonstrating pre-flight URL validation.
//!
//! This example shows how to:
//! - Check URLs before handing them to the client
//! - See which private and loopback targets are rejected
//! - Confirm that the client applies the same checks on every request
//!
//! Run with: `cargo run --example url_validation`

use palisade::{validate_url, Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("palisade=info")
        .init();

    let candidates = [
        "https://api.example.com/v1/users",
        "http://localhost:8080/admin",
        "http://127.0.0.1/status",
        "http://10.0.0.5/internal",
        "http://172.16.3.1/console",
        "http://192.168.1.1/router",
        "http://169.254.169.254/latest/meta-data",
        "http://0x7f.0.0.1/obfuscated",
        "https://8.8.8.8/dns-query",
        "ftp://example.com/file",
        "not a url",
    ];

    println!("=== Pre-flight validation ===");
    for candidate in candidates {
        match validate_url(candidate) {
            Ok(url) => println!("  allowed   {url}"),
            Err(e) => println!("  rejected  {candidate}: {e}"),
        }
    }
    println!();

    println!("=== The client runs the same checks ===");
    let client = Client::new()?;
    match client.get("http://169.254.169.254/latest/meta-data").await {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Blocked before any network activity: {e}"),
    }

    Ok(())
}
