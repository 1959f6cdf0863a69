use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Environment variable holding an env_logger filter, e.g. `daybook=debug`
pub const LOG_ENV: &str = "DAYBOOK_LOG";

/// File name of the TUI log, created next to the task file
pub const LOG_FILE_NAME: &str = "daybook.log";

/// Where log records are written
#[derive(Debug, Clone, Copy)]
pub enum LogSink<'a> {
    Stderr,
    /// Append to `daybook.log` in this directory
    File(&'a Path),
}

/// Install the `env_logger` backend, filtered by `DAYBOOK_LOG` when set and
/// by `default_level` otherwise. Calling it again is a no-op.
pub fn init_logging(default_level: &str, sink: LogSink<'_>) -> Result<(), String> {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, default_level));
    builder.format_timestamp_secs();

    if let LogSink::File(dir) = sink {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("could not create log directory {}: {}", dir.display(), e))?;
        let path = dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| format!("could not open log file {}: {}", path.display(), e))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // A logger installed earlier (tests, repeated init) wins
    let _ = builder.try_init();
    Ok(())
}
