#![deny(missing_docs)]
//! Shared logging utilities for the quiz chat workspace.
//!
//! This crate provides the `quiz_*` logging macros used across the codebase,
//! a file logger for the terminal UI and a minimal test initializer for the
//! global logger.

use std::fs::File;
use std::io;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, TermLogger, TerminalMode, WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! quiz_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! quiz_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! quiz_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! quiz_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! quiz_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Parses a level name such as `"debug"` or `"WARN"`.
///
/// Unknown names fall back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Installs a logger that writes to `path`, truncating any previous log.
///
/// The terminal UI owns stdout/stderr, so this is the only destination used
/// at runtime. Returns an error if the file cannot be created; a logger that
/// was already installed is left in place.
pub fn initialize_file(path: &Path, level: LevelFilter) -> io::Result<()> {
    let file = File::create(path)?;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();
    let _ = CombinedLogger::init(vec![WriteLogger::new(level, config, file)]);
    Ok(())
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_any_case_and_falls_back() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn initialize_file_fails_for_missing_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("missing").join("quizchat.log");
        assert!(initialize_file(&path, LevelFilter::Info).is_err());
    }
}
