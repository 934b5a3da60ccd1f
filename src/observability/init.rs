//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFileWriter;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "event-explorer.log";

/// Initializes the tracing subscriber with a rotating file sink.
///
/// Level is taken from `RUST_LOG` if set, otherwise from `config.trace_level`.
/// Logs go to `<data_dir>/event-explorer.log`, never to stdout, which belongs to
/// command output.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently does nothing if directory creation fails (logging is optional)
/// - Idempotent: only the first call in a process takes effect
///
/// # Example
///
/// ```rust
/// use event_explorer::observability::init_tracing;
/// use event_explorer::Config;
///
/// let dir = tempfile::tempdir().expect("temp dir");
/// let config = Config {
///     data_dir: dir.path().to_path_buf(),
///     trace_level: "debug".to_string(),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.trace_level));

    let writer = Arc::new(RotatingFileWriter::new(data_dir.join(LOG_FILE_NAME)));
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
