//! # safari-ld - Structured Metadata Compiler
//!
//! The main binary for the safari-ld metadata engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 apps/safari-ld (THE BINARY)             │
//! │                                                         │
//! │  ┌─────────────┐   ┌──────────────┐   ┌─────────────┐   │
//! │  │    CLI      │   │   Settings   │   │  Page JSON  │   │
//! │  │   (clap)    │   │ (TOML + env) │   │   (serde)   │   │
//! │  └──────┬──────┘   └──────┬───────┘   └──────┬──────┘   │
//! │         └─────────────────┼──────────────────┘          │
//! │                           ▼                             │
//! │                  ┌────────────────┐                     │
//! │                  │ safari-ld-core │                     │
//! │                  │  (THE ENGINE)  │                     │
//! │                  └────────────────┘                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! safari-ld compose -i pages/tour.json -o public/tour.jsonld
//! safari-ld breadcrumbs --path /destinations/northern-serengeti
//! safari-ld check -i pages/faq.json
//! safari-ld hash -i pages/tour.json
//! SAFARI_LD_BASE_URL=https://staging.example.com safari-ld config
//! ```

use clap::Parser;
use safari_ld::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // SAFARI_LD_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SAFARI_LD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.quiet {
        "safari_ld=warn"
    } else {
        "safari_ld=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // stdout carries documents only.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
