use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Debug topics understood by `--debug-filter`
pub const TOPICS: [&str; 5] = ["sim", "bomb", "blast", "enemy", "input"];

// Custom logger structure
#[derive(Debug)]
struct BlastGridLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl log::Log for BlastGridLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Debug filters only narrow Debug and Trace output
        match &self.debug_filters {
            Some(filters)
                if metadata.level() == log::Level::Debug
                    || metadata.level() == log::Level::Trace =>
            {
                filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()))
            }
            _ => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let context = message_context(&message);

        let output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );

        // Losing a log line is not worth aborting the simulation over
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

/// Builds the `[T0040][E01] ` prefix from "Tick N" and "Enemy N" mentions
fn message_context(message: &str) -> String {
    let mut context = String::new();
    if let Some(tick) = number_after(message, "Tick ") {
        context.push_str(&format!("[T{:04}]", tick));
    }
    if let Some(enemy) = number_after(message, "Enemy ") {
        context.push_str(&format!("[E{:02}]", enemy));
    }
    if !context.is_empty() {
        context.push(' ');
    }
    context
}

fn number_after(message: &str, label: &str) -> Option<u64> {
    let start = message.find(label)? + label.len();
    let digits: String = message[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

static LOGGER: OnceLock<BlastGridLogger> = OnceLock::new();

/// Parses a `--log-level` value, falling back to Info
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Initialize the logger with optional debug filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let debug_filters = debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    });

    let logger = LOGGER.get_or_init(|| BlastGridLogger {
        level,
        debug_filters,
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_sim {
    (tick: $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "sim", "Tick {} {}", $tick, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "sim", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_bomb {
    ($($arg:tt)*) => {
        log::debug!(target: "bomb", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_blast {
    ($($arg:tt)*) => {
        log::debug!(target: "blast", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_enemy {
    ($($arg:tt)*) => {
        log::debug!(target: "enemy", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_input {
    ($($arg:tt)*) => {
        log::debug!(target: "input", $($arg)*)
    };
}
