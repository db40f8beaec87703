use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::log_tracer::SetLoggerError;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

use crate::helper::error_chain_fmt;

/// Builds the subscriber used by the service: an env filter, then bunyan JSON records.
///
/// # Arguments
/// - `name`: name of the app, written in every record
/// - `fallback_env_filter`: filter used when `RUST_LOG` is not set (ex: `"info"`)
/// - `sink`: where the records are written (`std::io::stdout`, `std::io::sink`, ...)
///
/// Returns `impl Subscriber` because the concrete layered type depends on `Sink`.
pub fn get_tracing_subscriber<Sink>(
    name: String,
    fallback_env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    // The sink must be able to hand out a writer for any lifetime
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_env_filter));

    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        // Stores span fields so that child events carry the fields of their parents
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Registers `subscriber` as the process-wide default and redirects `log` records to it.
///
/// Must be called once per process: a second call fails.
pub fn init_tracing_subscriber(
    subscriber: impl Subscriber + Send + Sync,
) -> Result<(), TelemetryError> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}

#[derive(thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to redirect log records to tracing: {0}")]
    LogTracerError(#[from] SetLoggerError),
    #[error("Failed to set the global tracing subscriber: {0}")]
    SubscriberError(#[from] SetGlobalDefaultError),
}

impl std::fmt::Debug for TelemetryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
