/*!
 * Structured Tracing
 * Subscriber setup for the shim's tracing events
 */

use crate::config::TracingConfig;
use crate::core::errors::ShimError;
use crate::core::types::ShimResult;
use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install the global subscriber described by `config`
///
/// Returns an error instead of panicking if a subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> ShimResult<()> {
    let env_filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| ShimError::Tracing(format!("bad filter {:?}: {}", config.filter, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json {
        // JSON output for production/parsing
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .map_err(|e| ShimError::Tracing(e.to_string()))?;
        info!("Structured tracing initialized with JSON output");
    } else {
        // Human-readable output for development
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .map_err(|e| ShimError::Tracing(e.to_string()))?;
        info!("Structured tracing initialized");
    }

    Ok(())
}
