//! Search Reindexer Main Entry Point
//!
//! Rebuilds the Meilisearch document index from MongoDB in one run and exits.

use dotenv::dotenv;
use search_reindexer::{Dependencies, ReindexConfig, ReindexError, ReindexSummary};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), ReindexError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("search_reindexer=info,search_reindexer_repository=info")
    });

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
            .map_err(|e| ReindexError::config(format!("Failed to initialize tracing: {}", e)))?;

        info!(
            service_name = "search-reindexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
            .map_err(|e| ReindexError::config(format!("Failed to initialize tracing: {}", e)))?;

        info!(
            service_name = "search-reindexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}

fn report(summary: &ReindexSummary, config: &ReindexConfig) {
    for warning in &summary.warnings {
        warn!(warning = %warning, "Reindex finished with a warning");
    }
    info!(
        fetched = summary.fetched,
        uploaded = summary.uploaded,
        task_uid = summary.task_uid,
        indexed = ?summary.indexed_count,
        mapping_issues = summary.mapping_issues,
        "Search index rebuilt"
    );

    let auth = match &config.meilisearch_api_key {
        Some(_) => " -H 'Authorization: Bearer <api-key>'",
        None => "",
    };
    info!(
        "Try a search: curl '{}/indexes/{}/search?q=guide'{}",
        config.meilisearch_url.trim_end_matches('/'),
        config.index_name,
        auth
    );
}

#[tokio::main]
async fn main() -> Result<(), ReindexError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    info!("Starting search reindex");

    let config = ReindexConfig::from_env();

    let deps = match Dependencies::new(&config).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.orchestrator.run().await {
        Ok(summary) => {
            report(&summary, &config);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Search reindex failed");
            Err(e.into())
        }
    }
}
