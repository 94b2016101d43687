//! Basic bridge usage example
//!
//! Wires a front-end logger into an in-memory realm backend, logs a few
//! entries with typed fields, and prints what the backend received.
//!
//! Run with: cargo run --example basic_usage

use realm_bridge::prelude::*;
use realm_bridge::{debug, info};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Realm Bridge - Basic Usage Example ===\n");

    let ctx = Arc::new(MemoryContext::new(BackendLevel::Info));

    // Debug for everything below the bridge root realm
    ctx.add_rule(Realm::new("bridge"), BackendLevel::Debug);

    let log = Logger::new_static(ctx.clone(), "test");
    println!("1. Logger '{}' starts at level {}", log.name(), log.level());

    log.info("a bridged test message", &[]);
    log.info(
        "a second message with fields",
        &[Field::string("ctx", "first"), Field::duration("elapsed", Duration::from_millis(12))],
    );
    debug!(log, "a debug message from {}", "a macro");

    println!("\n2. Context fields and nested objects:");
    let request = log.named("http").with(&[Field::string("request_id", "r-17")]);
    request.info(
        "request served",
        &[
            Field::namespace("response"),
            Field::u16("status", 200),
            Field::object(
                "headers",
                object_fn(|o| {
                    o.add_string("content-type", "application/json");
                    o.add_u64("content-length", 512);
                    Ok(())
                }),
            ),
        ],
    );
    info!(request, fields: [Field::bool("keep_alive", true)], "connection kept");

    println!("\n3. Standalone JSON encoding:");
    let config = BridgeConfig::builder().root_realm("demo").build()?;
    let mut enc = JsonEncoder::object();
    enc.add_reflected("config", &serde_json::to_value(&config)?)?;
    println!("   {}", enc.to_json_string()?);

    println!("\n4. Records received by the backend:");
    for record in ctx.records() {
        let fields: Vec<String> = record.fields.iter().map(ToString::to_string).collect();
        println!(
            "   [{}] {} {} {}",
            record.level,
            record.realm,
            record.message,
            fields.join(" ")
        );
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
