//! Logging initialization.

use std::io;

use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt,
};

use super::types::{FileLoggingConfig, LoggerConfig, LoggingResult, StdoutConfig};

pub(crate) type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initializes the logging subsystem with the provided config.
///
/// Fails if a directive doesn't parse or a global subscriber is already set.
pub fn init(config: LoggerConfig) -> LoggingResult<()> {
    let filt = build_filter(&config)?;

    let mut layers = vec![stdout_layer(&config.stdout_config, filt.clone())];
    if let Some(file_config) = &config.file_logging_config {
        layers.push(file_layer(file_config, filt));
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    info!(
        service_name = %config.service_name,
        service_version = ?config.service_version,
        "logging initialized"
    );
    Ok(())
}

/// Builds the filter from `RUST_LOG`, defaulting to INFO, with the config's
/// directives on top.
pub(crate) fn build_filter(config: &LoggerConfig) -> LoggingResult<EnvFilter> {
    let mut filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    for directive in &config.directives {
        filt = filt.add_directive(directive.parse()?);
    }

    Ok(filt)
}

/// Console logging with JSON or compact format.
pub(crate) fn stdout_layer(config: &StdoutConfig, filt: EnvFilter) -> BoxedLayer {
    let span_events = config.fmt_span.clone();
    match (config.json_format, config.use_stderr) {
        (true, false) => layer()
            .json()
            .with_span_events(span_events)
            .with_filter(filt)
            .boxed(),
        (true, true) => layer()
            .json()
            .with_span_events(span_events)
            .with_writer(io::stderr)
            .with_filter(filt)
            .boxed(),
        (false, false) => layer()
            .compact()
            .with_span_events(span_events)
            .with_filter(filt)
            .boxed(),
        (false, true) => layer()
            .compact()
            .with_span_events(span_events)
            .with_writer(io::stderr)
            .with_filter(filt)
            .boxed(),
    }
}

pub(crate) fn file_layer(file_config: &FileLoggingConfig, filt: EnvFilter) -> BoxedLayer {
    let file_appender = RollingFileAppender::new(
        file_config.rotation.clone(),
        &file_config.directory,
        &file_config.file_name_prefix,
    );

    if file_config.json_format {
        layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false) // No color codes in files
            .with_filter(filt)
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(file_appender)
            .with_ansi(false) // No color codes in files
            .with_filter(filt)
            .boxed()
    }
}
