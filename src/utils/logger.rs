use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging system
///
/// `RUST_LOG` takes precedence over `level` when set. With `log_file` both
/// formats write to the file instead of stdout.
pub fn init_logger(level: &str, json_output: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let file = log_file.map(open_log_file).transpose()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(output_layer(json_output, file))
        .try_init()?;

    Ok(())
}

/// Formatting layer for the chosen output
fn output_layer<S>(json_output: bool, file: Option<File>) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match (json_output, file) {
        // JSON formatting for production
        (true, Some(file)) => fmt::layer().json().with_writer(file).boxed(),
        (true, None) => fmt::layer().json().boxed(),
        // Pretty formatting for development; no color codes in files
        (false, Some(file)) => fmt::layer().pretty().with_ansi(false).with_writer(file).boxed(),
        (false, None) => fmt::layer().pretty().boxed(),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Initialize logger from config
pub fn init_from_config(config: &crate::utils::config::LoggingConfig) -> Result<()> {
    let json = config.output == "json";
    let log_file = if !config.file_path.is_empty() {
        Some(Path::new(&config.file_path))
    } else {
        None
    };

    init_logger(&config.level, json, log_file)
}
