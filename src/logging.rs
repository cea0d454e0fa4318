//! Logging configuration for the bus tracker
//!
//! Structured logging setup with appropriate levels and formatting.

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

/// Default filter directives for `log_level`
pub fn default_filter(log_level: &str) -> String {
    format!("bus_tracker={log_level},tower_http={log_level},axum::rejection=trace")
}

/// Initialize the application logging system.
///
/// `RUST_LOG` overrides the level passed in. Production emits JSON lines,
/// anything else a compact console format.
pub fn init_logging(log_level: &str, json: bool) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(json_layer()).try_init()?;
    } else {
        registry.with(console_layer()).try_init()?;
    }

    tracing::info!(json, "Logging system initialized");
    Ok(())
}

/// JSON logging layer for production
fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
}

/// Console logging layer for development
fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true)
}

/// Create a span for a call through the school bus client
#[macro_export]
macro_rules! client_span {
    ($operation:expr) => {
        tracing::info_span!(
            "client_call",
            operation = %$operation,
        )
    };
}

/// Create a span for a calendar computation
#[macro_export]
macro_rules! calendar_span {
    ($year:expr, $month:expr, $child:expr) => {
        tracing::debug_span!(
            "calendar_month",
            year = %$year,
            month = %$month,
            child = %$child,
        )
    };
}

/// Log application startup
pub fn log_startup() {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git_commit = option_env!("GIT_COMMIT").unwrap_or("unknown"),
        "Bus tracker starting up"
    );
}

/// Log application shutdown
pub fn log_shutdown(reason: &str) {
    tracing::info!(reason = %reason, "Bus tracker shutting down");
}

/// Log a novelty accepted from a parent
pub fn log_novelty_submitted(novelty_id: &str, date: &str, children: usize) {
    tracing::info!(
        novelty_id = %novelty_id,
        date = %date,
        children,
        "Novelty submitted"
    );
}

/// Log a rejected novelty submission
pub fn log_novelty_rejected(date: &str, reason: &str) {
    tracing::warn!(date = %date, reason = %reason, "Novelty rejected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_uses_level() {
        assert_eq!(
            default_filter("debug"),
            "bus_tracker=debug,tower_http=debug,axum::rejection=trace"
        );
    }

    #[test]
    fn test_logging_initialization() {
        // A second call in the same process fails instead of panicking
        let _ = init_logging("info", false);
        assert!(init_logging("info", false).is_err());
    }

    #[test]
    fn test_log_macros_compilation() {
        let _span = client_span!("get_children");
        let _span = calendar_span!(2026, 1, "all");
    }
}
