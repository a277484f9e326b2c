// Structured logger shared by the stores: level filter, color toggle, and
// a pluggable handler so embedders can route output wherever they like.

use std::fmt;
use std::sync::Arc;

use chrono::SecondsFormat;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BRIGHT: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    fn color(&self) -> &'static str {
        match self {
            LogLevel::Debug => ansi::MAGENTA,
            LogLevel::Info => ansi::BLUE,
            LogLevel::Warn => ansi::YELLOW,
            LogLevel::Error => ansi::RED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Custom sink for log output, replacing the default stdout/stderr writer.
pub trait LogHandler: Send + Sync + fmt::Debug {
    fn handle(&self, level: LogLevel, message: &str);
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub disabled: bool,
    pub disable_colors: bool,
    /// Minimum level to emit.
    pub level: LogLevel,
    pub custom_handler: Option<Arc<dyn LogHandler>>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            disable_colors: false,
            level: LogLevel::Warn,
            custom_handler: None,
        }
    }
}

/// The logger handed to every store. Cheap to clone.
#[derive(Clone)]
pub struct StoreLogger {
    config: LoggerConfig,
}

impl fmt::Debug for StoreLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreLogger")
            .field("level", &self.config.level)
            .field("disabled", &self.config.disabled)
            .finish()
    }
}

impl Default for StoreLogger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl StoreLogger {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// A logger that emits nothing, for tests that assert on output-free paths.
    pub fn disabled() -> Self {
        Self::new(LoggerConfig {
            disabled: true,
            ..Default::default()
        })
    }

    pub fn level(&self) -> LogLevel {
        self.config.level
    }

    pub fn should_publish(&self, level: LogLevel) -> bool {
        !self.config.disabled && level >= self.config.level
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.should_publish(level) {
            return;
        }

        if let Some(ref handler) = self.config.custom_handler {
            handler.handle(level, message);
            return;
        }

        let formatted = self.format_message(level, message);
        match level {
            LogLevel::Warn | LogLevel::Error => eprintln!("{formatted}"),
            _ => println!("{formatted}"),
        }
    }

    fn format_message(&self, level: LogLevel, message: &str) -> String {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        if self.config.disable_colors {
            format!("{timestamp} {level} [myTickets]: {message}")
        } else {
            format!(
                "{dim}{timestamp}{reset} {color}{level}{reset} {bright}[myTickets]:{reset} {message}",
                dim = ansi::DIM,
                reset = ansi::RESET,
                color = level.color(),
                bright = ansi::BRIGHT,
            )
        }
    }
}
