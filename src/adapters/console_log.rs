//! Console logger for the host binary.
//!
//! A minimal [`log::Log`] backend: `warn` and `error` go to stderr,
//! everything else to stdout, each line prefixed with the level and
//! elapsed time since [`init`].

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct ConsoleLogger {
    level: LevelFilter,
    start: Instant,
}

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.start.elapsed();
        let line = format!(
            "[{:>4}.{:03}] {:<5} {}",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
            record.level(),
            record.args()
        );
        // A closed pipe must not take the process down with it.
        if record.level() <= Level::Warn {
            let _ = writeln!(std::io::stderr(), "{line}");
        } else {
            let _ = writeln!(std::io::stdout(), "{line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Install the console logger at `level`. Fails if a logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger {
        level,
        start: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
