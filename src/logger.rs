//! Minimal stderr backend for the `log` facade.
//!
//! Diagnostics go to stderr so the text protocol on stdout is never interleaved
//! with log lines.

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Level used for a given verbosity flag
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Warn }
}

/// Install the stderr logger. Only the first call in a process takes effect.
pub fn init(verbose: bool) {
    let level = level_for(verbose);
    let logger = Box::new(StderrLogger { level });
    if log::set_boxed_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}
