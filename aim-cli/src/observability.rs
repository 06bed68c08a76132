//! Structured logging for the CLI.
//!
//! Logs go to stderr so stdout carries only the response JSON.

use std::io;

use clap::ValueEnum;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Log format configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable pretty format for development.
    #[default]
    Pretty,
    /// JSON format for log aggregation.
    Json,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when set.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_observability(format: LogFormat, default_level: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(io::stderr),
            )
            .try_init(),
    }
}
