// File logging for the terminal viewer.
// - The TUI owns stdout, so events go to `<log dir>/vispanel.log` with daily rotation.
// - Filtering follows `RUST_LOG` and defaults to `info`; `RUST_LOG=vispanel::panel=debug` traces tab transitions.
use std::{fs, io, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "vispanel.log";

/// Installs the global subscriber. Keep the guard alive until exit so buffered lines flush.
pub fn init(logs_dir: &Path) -> io::Result<WorkerGuard> {
    fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    Ok(guard)
}
