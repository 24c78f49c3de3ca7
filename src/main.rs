//! ipbatch - batch IP metadata lookup
//!
//! This is the composition root that wires together all the components.
//! Addresses come from the command line, or from stdin when none are given.

use ipbatch::{load_config, BatchQueryService, IpApiLookupService, LookupService, OutputFormat};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging (stderr, stdout carries the results)
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let addresses = read_addresses().await?;

    tracing::info!(
        "looking up {} addresses via {} (batch size {})",
        addresses.len(),
        cfg.endpoint_url,
        cfg.max_batch_size
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapter
    let lookup: Arc<dyn LookupService> = Arc::new(IpApiLookupService::new(cfg.lookup_config())?);

    // 2. Application service
    let service = BatchQueryService::new(lookup, cfg.query_options()?);

    // 3. Run and print
    let report = service.batch_query_with_report(&addresses).await;

    for result in &report.results {
        match cfg.output {
            OutputFormat::Text => println!("{}", result),
            OutputFormat::Json => println!("{}", serde_json::to_string(result)?),
        }
    }

    if report.is_complete() {
        tracing::info!(
            "resolved {} records for {} unique addresses",
            report.results.len(),
            report.unique_addresses
        );
    } else {
        tracing::warn!(
            "resolved {} records for {} unique addresses, {} of {} batches failed",
            report.results.len(),
            report.unique_addresses,
            report.failures.len(),
            report.batches
        );
    }

    Ok(())
}

/// Collect addresses from argv, falling back to whitespace-separated stdin.
async fn read_addresses() -> anyhow::Result<Vec<String>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args);
    }

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;

    Ok(input.split_whitespace().map(str::to_string).collect())
}
