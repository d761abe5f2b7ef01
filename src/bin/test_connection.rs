//! Check connectivity and credentials against a Home Assistant instance
//!
//! Read-only: calls `GET /api/` and `GET /api/automation`.

use ha_automation_mcp::{
    automation::summarize_listing,
    client::{HomeAssistantClient, HttpMethod},
    HaConfig, HaHttpClient, Result,
};
use serde_json::Value;

const SAMPLE_SIZE: usize = 3;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter("warn")
        .init();

    println!("\n🧪 Testing Home Assistant Connection");
    println!("========================================\n");

    let config = HaConfig::from_env()?;
    config.validate()?;

    println!("🔗 Testing connection to:");
    println!("   URL:   {}", config.url);
    println!("   Token: ***");
    println!();

    let client = HaHttpClient::new(config)?;

    println!("1️⃣  Checking API status...");
    let status = client.call(HttpMethod::Get, "/", None).await.map_err(|e| {
        println!("   ❌ API check failed: {e}");
        e
    })?;
    let status = status.into_value();
    let message = status
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("reachable");
    println!("   ✅ {message}");

    println!("\n2️⃣  Listing automations...");
    let listing = client
        .call(HttpMethod::Get, "/automation", None)
        .await
        .map_err(|e| {
            println!("   ❌ Listing failed: {e}");
            e
        })?
        .into_value();

    let automations = summarize_listing(&listing);
    println!("   ✅ Found {} automations", automations.len());

    for summary in automations.iter().take(SAMPLE_SIZE) {
        let label = summary
            .alias
            .as_str()
            .or_else(|| summary.id.as_str())
            .unwrap_or("<unnamed>");
        println!(
            "   - {label} (id: {}, enabled: {})",
            summary.id, summary.enabled
        );
    }

    println!("\n🎉 Connection test complete");
    Ok(())
}
