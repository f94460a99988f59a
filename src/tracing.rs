//! Log output for the `inputmask` binary.
//!
//! The library only emits events; this module installs the subscriber.
//! Targets worth filtering on with `RUST_LOG`:
//!
//! - `inputmask::format::compiler` (debug): each compiled format, its
//!   sanitized form and state count
//! - `inputmask::cache` (debug): cache hits, misses and rejected formats
//! - `inputmask::affinity` (debug): the mask chosen among affine formats and its score
//! - `inputmask::field` (trace): one event per text change or focus
//!
//! Everything at debug and above also goes to
//! `~/.config/inputmask/logs/inputmask.log`, rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the console and log file layers.
///
/// Console output goes to stderr; stdout is reserved for command output.
/// Without a usable config directory only the console layer is installed.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "inputmask.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("inputmask: logging to console only ({e})");
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
