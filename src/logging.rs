//! File logging.
//!
//! Writes to `<cache dir>/nm-tui/log` (`~/.cache/nm-tui/log` on Linux). The
//! terminal belongs to the UI, so there is no stdout layer. The filter is
//! read from `NMTUI_LOG` (e.g. `NMTUI_LOG=nmtui=debug`), default `info`.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const FILTER_ENV: &str = "NMTUI_LOG";
const LOG_FILE: &str = "log";

pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|cache| cache.join("nm-tui"))
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines on drop and must live until
/// the program exits. Returns `None`, leaving logging disabled, when the
/// log directory cannot be created.
pub fn init() -> Option<WorkerGuard> {
    let log_dir = log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // no subscriber yet, and stdout is about to become the UI
        eprintln!("Failed to create log directory {:?}: {}", log_dir, e);
        return None;
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .try_init();
    if installed.is_err() {
        return None;
    }

    tracing::info!(log_file = ?log_dir.join(LOG_FILE), "nm-tui logging initialized");
    Some(guard)
}
