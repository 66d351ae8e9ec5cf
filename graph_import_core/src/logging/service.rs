//! Logger sinks

use super::events::{LogEvent, Severity};
use crate::config::compile_time::logging::LOG_BUFFER_SIZE;
use std::sync::{Arc, Mutex, PoisonError};

/// Logger capability consumed by failure boundaries
pub trait Logger: Send + Sync {
    fn log(&self, severity: Severity, message: &str);
}

/// Main logging service with a minimum severity
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_severity: Severity,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_severity: Severity) -> Self {
        Self {
            logger,
            min_severity,
        }
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    /// Check if severity should be logged
    pub fn should_log(&self, severity: Severity) -> bool {
        severity <= self.min_severity
    }
}

impl Logger for LoggingService {
    fn log(&self, severity: Severity, message: &str) {
        if self.should_log(severity) {
            self.logger.log(severity, message);
        }
    }
}

/// Plain text logger; errors go to stderr
#[derive(Debug, Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, severity: Severity, message: &str) {
        let event = LogEvent::new(severity, message);
        if severity.is_error() {
            eprintln!("{}", event.format());
        } else {
            println!("{}", event.format());
        }
    }
}

/// Structured logger for JSON output and better tooling integration
#[derive(Debug, Default)]
pub struct StructuredLogger;

impl StructuredLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for StructuredLogger {
    fn log(&self, severity: Severity, message: &str) {
        let event = LogEvent::new(severity, message);
        // Fall back to plain text if serialization fails
        let line = event.format_json().unwrap_or_else(|_| event.format());
        if severity.is_error() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Memory logger for testing
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.is_error()).cloned().collect()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.lock()
            .iter()
            .map(|e| (e.severity, e.message.clone()))
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, severity: Severity, message: &str) {
        let mut events = self.lock();

        // Drop oldest events once the buffer is full
        if events.len() >= LOG_BUFFER_SIZE {
            let remove_count = events.len() - LOG_BUFFER_SIZE + 1;
            events.drain(0..remove_count);
        }

        events.push(LogEvent::new(severity, message));
    }
}

/// Multi-target logger that can log to multiple destinations
#[derive(Default)]
pub struct MultiLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl MultiLogger {
    pub fn new() -> Self {
        Self {
            loggers: Vec::new(),
        }
    }

    pub fn add_logger(&mut self, logger: Arc<dyn Logger>) {
        self.loggers.push(logger);
    }

    pub fn with_console(mut self) -> Self {
        self.add_logger(Arc::new(ConsoleLogger::new()));
        self
    }

    pub fn with_structured_console(mut self) -> Self {
        self.add_logger(Arc::new(StructuredLogger::new()));
        self
    }

    pub fn with_memory(mut self) -> (Self, Arc<MemoryLogger>) {
        let memory_logger = Arc::new(MemoryLogger::new());
        self.add_logger(memory_logger.clone());
        (self, memory_logger)
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Logger for MultiLogger {
    fn log(&self, severity: Severity, message: &str) {
        for logger in &self.loggers {
            logger.log(severity, message);
        }
    }
}

/// Create testing logger (memory-based, all events captured)
pub fn create_test_logger() -> Arc<MemoryLogger> {
    Arc::new(MemoryLogger::new())
}
