//! Simple SDK Example
//!
//! Demonstrates basic usage of the Stage Tracker SDK.
//!
//! # Usage
//!
//! 1. Start the daemon with a token:
//!    ```bash
//!    STAGE_TRACKER_TOKENS=demo-token=demo cargo run --package stage-tracker-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    STAGE_TRACKER_TOKEN=demo-token cargo run --example simple
//!    ```

use stage_tracker_sdk::{CreateRequest, StageTrackerClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stage Tracker SDK - Simple Example");
    println!("==================================\n");

    let token = std::env::var("STAGE_TRACKER_TOKEN").unwrap_or_else(|_| "demo-token".to_string());

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = StageTrackerClient::connect("http://127.0.0.1:9640")
        .await?
        .with_token(token);
    println!("   ✓ Connected\n");

    // Live list; the first item is the current snapshot
    let mut live = client.subscribe().await?;
    if let Some(snapshot) = live.next().await {
        println!("   ✓ Subscribed ({} applications so far)\n", snapshot?.applications.len());
    }

    // 2. Record an application
    println!("2. Recording an application...");
    let created = client
        .create(CreateRequest::new("Acme Corp", "Backend Intern").notes("found on the careers page"))
        .await?;
    println!("   ✓ Created {} ({})", created.id, created.status);
    if let Some(refreshed) = live.next().await {
        println!("   ✓ Live list now has {} entries\n", refreshed?.applications.len());
    }

    // 3. Move it along
    println!("3. Moving to interview...");
    let updated = client.update_status(&created.id, "interview").await?;
    println!("   ✓ Status is now {}\n", updated.status);

    // 4. List and count
    println!("4. Listing applications...");
    let listed = client.list().await?;
    for app in &listed.applications {
        println!("     | {} - {} [{}]", app.company, app.role, app.status);
    }
    let stats = client.stats().await?;
    println!(
        "   ✓ {} total, {} interviewing\n",
        stats.total, stats.interview
    );

    // 5. Export
    println!("5. Exporting CSV...");
    let export = client.export().await?;
    println!("   ✓ {} ({} lines)\n", export.filename, export.csv.lines().count());

    // 6. Clean up
    println!("6. Deleting the application...");
    let deleted = client.delete(&created.id).await?;
    if deleted.deleted {
        println!("   ✓ Deleted");
    }

    live.unsubscribe().await?;
    println!("\n✓ Example completed successfully!");

    Ok(())
}
