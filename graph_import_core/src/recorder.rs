//! Error recorders: the externally supplied sink for recorder-targeted boundaries

use crate::config::compile_time::recorder::DEFAULT_RECORDED_ERRORS;
use crate::config::runtime::RecorderPreferences;
use crate::error::ExternalErrorCode;
use crate::logging::{Logger, Severity};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Recorder capability consumed by failure boundaries
pub trait ErrorRecorder: Send + Sync {
    fn report_error(&self, code: ExternalErrorCode, description: &str);
}

/// One reported error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedError {
    pub code: ExternalErrorCode,
    pub description: String,
}

#[derive(Debug, Default)]
struct RecorderState {
    entries: Vec<RecordedError>,
    overflowed: bool,
}

/// Bounded in-memory recorder
///
/// Reports past capacity are dropped and set the overflow flag.
pub struct MemoryRecorder {
    capacity: usize,
    state: Mutex<RecorderState>,
    echo: Option<Arc<dyn Logger>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RECORDED_ERRORS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(RecorderState::default()),
            echo: None,
        }
    }

    /// Recorder sized by preferences, echoing to `logger` when asked
    pub fn from_preferences(preferences: &RecorderPreferences, logger: Arc<dyn Logger>) -> Self {
        let recorder = Self::with_capacity(preferences.max_errors);
        if preferences.echo_to_logger {
            recorder.with_echo(logger)
        } else {
            recorder
        }
    }

    /// Also forward every report to `logger`
    pub fn with_echo(mut self, logger: Arc<dyn Logger>) -> Self {
        self.echo = Some(logger);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn num_errors(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn error_code(&self, index: usize) -> Option<ExternalErrorCode> {
        self.lock().entries.get(index).map(|e| e.code)
    }

    pub fn error_desc(&self, index: usize) -> Option<String> {
        self.lock().entries.get(index).map(|e| e.description.clone())
    }

    pub fn entries(&self) -> Vec<RecordedError> {
        self.lock().entries.clone()
    }

    pub fn has_overflowed(&self) -> bool {
        self.lock().overflowed
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.overflowed = false;
    }

    fn lock(&self) -> MutexGuard<'_, RecorderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorRecorder for MemoryRecorder {
    fn report_error(&self, code: ExternalErrorCode, description: &str) {
        {
            let mut state = self.lock();
            if state.entries.len() < self.capacity {
                state.entries.push(RecordedError {
                    code,
                    description: description.to_string(),
                });
            } else {
                state.overflowed = true;
            }
        }

        if let Some(logger) = &self.echo {
            logger.log(Severity::Error, &format!("{}: {}", code, description));
        }
    }
}

/// Recorder that only forwards reports to a logger
pub struct LoggingRecorder {
    logger: Arc<dyn Logger>,
}

impl LoggingRecorder {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl ErrorRecorder for LoggingRecorder {
    fn report_error(&self, code: ExternalErrorCode, description: &str) {
        self.logger
            .log(Severity::Error, &format!("{}: {}", code, description));
    }
}
