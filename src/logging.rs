use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// Set up the global logger.
///
/// The TUI owns the terminal, so logs only go to stderr when `RUST_LOG` is
/// set explicitly; otherwise they are written to `log_file` or dropped.
pub fn init(log_file: Option<&Path>, verbose: bool) -> Result<()> {
    let default_filter = if verbose { "debug" } else { "info" };

    let mut builder = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
            builder.target(Target::Pipe(Box::new(file)));
            builder
        }
        None if std::env::var_os("RUST_LOG").is_some() => {
            let mut builder = Builder::from_default_env();
            builder.target(Target::Stderr);
            builder
        }
        None => return Ok(()),
    };

    builder
        .format_timestamp_millis()
        .try_init()
        .context("Failed to initialise logger")
}
