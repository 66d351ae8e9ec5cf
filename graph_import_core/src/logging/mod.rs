//! Logging for the import status layer
//!
//! Provides the [`Logger`] capability consumed by failure boundaries, its
//! console, structured and in-memory implementations, and an optional
//! process-wide service.

pub mod config;
pub mod events;
#[macro_use]
pub mod macros;
pub mod service;

use crate::config::runtime::LoggingPreferences;
use std::sync::{Arc, OnceLock};

pub use events::{LogEvent, Severity};
pub use service::{
    create_test_logger, ConsoleLogger, Logger, LoggingService, MemoryLogger, MultiLogger,
    StructuredLogger,
};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize the global logging service from preferences
pub fn init_global_logging(preferences: &LoggingPreferences) -> Result<(), String> {
    let service = Arc::new(config::create_service(preferences));
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized")?;

    service.log(Severity::Verbose, "Global logging system initialized");
    Ok(())
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Shared handle to the global logger, for contexts that hold `Arc<dyn Logger>`
pub fn global_logger() -> Option<Arc<LoggingService>> {
    GLOBAL_LOGGER.get().cloned()
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Log through the global service (won't panic if uninitialized)
pub fn safe_log(severity: Severity, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log(severity, message);
    } else if severity.is_error() {
        eprintln!("[{}] FALLBACK: {}", severity.as_str(), message);
    }
}

/// Log with context pairs (used by `import_log!`)
pub fn log_with_context(severity: Severity, message: &str, context: Vec<(&str, &str)>) {
    let mut line = message.to_string();
    for (key, value) in context {
        line.push_str(&format!(" {}={}", key, value));
    }
    safe_log(severity, &line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_logging_initialization() {
        let memory = create_test_logger();
        let service = Arc::new(LoggingService::new(memory.clone(), Severity::Verbose));

        // Another test may have won the race
        if GLOBAL_LOGGER.set(service).is_err() {
            assert!(try_get_global_logger().is_some());
            return;
        }

        import_log!(Severity::Warning, "graph skipped", "file" => "a.json", "nodes" => 3);
        assert!(global_logger().is_some());
        assert!(memory.messages().contains(&(
            Severity::Warning,
            "graph skipped file=a.json nodes=3".to_string()
        )));
        assert!(init_global_logging(&LoggingPreferences::default()).is_err());
    }

    #[test]
    fn test_safe_logging() {
        // Should not panic even if global logging is not initialized
        safe_log(Severity::InternalError, "Test error");
        safe_log(Severity::Info, "Test info");
    }
}
