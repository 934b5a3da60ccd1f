//! File-based structured logging.
//!
//! `tracing` spans and events from every layer are formatted by
//! `tracing-subscriber`'s fmt layer and appended to a rotating log file in the
//! data directory.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingFileWriter → event-explorer.log
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
pub mod init;

pub use file_writer::RotatingFileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
