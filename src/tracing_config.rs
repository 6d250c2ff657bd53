use std::{env, error::Error, io, path::Path};

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{Builder, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the console log format (`pretty` or `json`).
pub const LOG_FORMAT_VAR: &str = "INISTORE_LOG_FORMAT";

const DAYS_TO_KEEP: usize = 7;

/// Initialize tracing for the application
///
/// Console logs go to stderr so command output on stdout stays clean.
/// Uses RUST_LOG if set, otherwise `default_directive`. When `log_dir` is
/// given, logs are also written to daily-rotated files there.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole program.
///
/// # Errors
/// Returns error if the log directory cannot be used or a global subscriber
/// is already installed
pub fn init(
    default_directive: &str,
    log_dir: Option<&Path>,
) -> Result<Option<WorkerGuard>, Box<dyn Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let (file_writer, guard) = match log_dir {
        Some(dir) => {
            let file_appender = Builder::new()
                .rotation(Rotation::DAILY)
                .max_log_files(DAYS_TO_KEEP)
                .filename_prefix("inistore")
                .filename_suffix("log")
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(non_blocking), Some(guard))
        }
        None => (None, None),
    };

    let format = env::var(LOG_FORMAT_VAR).unwrap_or_else(|_| "pretty".to_string());

    let registry = tracing_subscriber::registry().with(env_filter);

    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .with(file_writer.map(|writer| {
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(writer)
                        .with_ansi(false)
                }))
                .try_init()?;
        }
        _ => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .with(file_writer.map(|writer| {
                    fmt::layer()
                        .compact()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(writer)
                        .with_ansi(false)
                }))
                .try_init()?;
        }
    }

    Ok(guard)
}
