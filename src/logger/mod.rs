//! Logging setup based on `tracing-subscriber`
//!
//! Console output (optionally colored) and an optional log file in full,
//! compact or JSON format, filtered by a single level.

pub mod config;
pub mod error;
mod writer;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber
///
/// `RUST_LOG`-style directives are accepted in `level`; anything the filter
/// cannot parse falls back to `info`.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // File layer goes first so console ANSI settings do not leak into the file
    // (tokio-rs/tracing#1817)
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;
    Ok(())
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = writer::open_log_file(config)?;
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    Ok(match config.format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    })
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stderr().is_terminal();
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}
