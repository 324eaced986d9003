//! Basic trace buffer usage example
//!
//! Demonstrates grouped writes, deduplication, eviction and snapshots.
//!
//! Run with: cargo run --example basic_usage

use trace_buffer::prelude::*;
use trace_buffer::{info, warn};

fn main() -> Result<()> {
    println!("=== Trace Buffer - Basic Usage Example ===\n");

    let config = TracerConfig::from_json(r#"{"max_groups": 3, "max_messages_per_span": 4}"#)?;
    config.validate()?;
    let tracer = Tracer::builder().config(config).build();

    println!("1. Writing to a few requests:");
    for request in 1..=4 {
        let logger = tracer.trace(format!("request-{}", request), "auth");
        info!(logger, "token checked for user {}", request * 10);
        logger.with_span("db").warn("slow query");
        logger.with_span("db").warn("slow query");
    }
    let mut groups = tracer.list_groups();
    groups.sort();
    println!("   retained groups (request-1 was evicted): {:?}", groups);

    println!("\n2. Runtime templates:");
    let logger = tracer.trace("request-4", "render");
    logger.error_args("template {} failed after {}ms", &[&"home", &42]);
    warn!(logger, "fallback page served");

    println!("\n3. Per-group logs, most recent first:");
    for span in tracer.logs("request-4") {
        for entry in span {
            println!("   [{}] {} {} (x{})", entry.span(), entry.level(), entry.message(), entry.count());
        }
    }

    println!("\n4. Snapshot JSON:");
    let snapshot = tracer.snapshot(
        &SnapshotOptions::new()
            .with_timezone("Europe/Berlin")
            .with_exact_time(true)
            .with_group_filter("request-4"),
    );
    println!("   {}", snapshot.as_json_str());

    println!("\n5. Disabling:");
    tracer.disable();
    tracer.trace("request-9", "auth").info("never stored");
    println!("   dropped while disabled: {}", tracer.metrics().dropped_disabled());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
