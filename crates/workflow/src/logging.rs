//! Logging initialization.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let subscriber = tracing_subscriber::registry().with(env_filter(&config.level));

    if config.format == "json" {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_current_span(true)
                    .with_target(true),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().pretty().with_target(true))
            .init();
    }
}

/// Routes logs through the test harness' captured output. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::registry()
        .with(env_filter("warn"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}
