// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;

static LOGGER: ConsoleLogger = ConsoleLogger;

struct ConsoleLogger;

/// Installs the stderr logger. `level` is a `log` level name ("info", "debug", ...);
/// unknown names fall back to Info.
pub fn init(level: &str) -> Result<(), SetLoggerError> {
  let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
  log::set_logger(&LOGGER).map(|()| log::set_max_level(filter))
}

fn prefix(level: Level) -> &'static str {
  match level {
    Level::Error => "🔴",
    Level::Warn => "🟠",
    Level::Info => "🔵",
    Level::Debug => "⚪",
    Level::Trace => "▫️",
  }
}

impl log::Log for ConsoleLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      // Format: "🔴  Atom index 9 is out of bounds"
      let stderr = std::io::stderr();
      let mut handle = stderr.lock();
      let _ = writeln!(handle, "{}  {}", prefix(record.level()), record.args());
    }
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}
