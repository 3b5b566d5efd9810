//! Browser-backed implementations of the domain's logging and time services.

use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider};

/// Console logger implementation for the WASM environment
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let formatted = entry.format_line();

        // Route to the console method matching the severity
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => {
                web_sys::console::debug_1(&formatted.into());
            }
            LogLevel::Info => {
                web_sys::console::info_1(&formatted.into());
            }
            LogLevel::Warn => {
                web_sys::console::warn_1(&formatted.into());
            }
            LogLevel::Error => {
                web_sys::console::error_1(&formatted.into());
            }
        }
    }
}

/// Wall-clock provider backed by the browser Date API
pub struct BrowserTimeProvider;

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}
