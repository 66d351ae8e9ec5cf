//! Importer context: owner of the session's error list and sink handles

use crate::boundary::{guard, guard_unwinding, ErrorList, FailureSink, LoggerSink, RecorderSink};
use crate::config::runtime::ImporterConfig;
use crate::error::ImportResult;
use crate::logging::Logger;
use crate::recorder::ErrorRecorder;
use crate::summary::SessionSummary;
use std::sync::Arc;

pub struct ImporterContext {
    recorder: Arc<dyn ErrorRecorder>,
    logger: Arc<dyn Logger>,
    errors: ErrorList,
    capture_panics: bool,
}

impl ImporterContext {
    pub fn new(recorder: Arc<dyn ErrorRecorder>, logger: Arc<dyn Logger>) -> Self {
        Self {
            recorder,
            logger,
            errors: ErrorList::new(),
            capture_panics: false,
        }
    }

    /// Context whose boundaries follow `config`
    pub fn from_config(
        config: &ImporterConfig,
        recorder: Arc<dyn ErrorRecorder>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            capture_panics: config.boundary.capture_panics,
            ..Self::new(recorder, logger)
        }
    }

    pub fn error_recorder(&self) -> &dyn ErrorRecorder {
        self.recorder.as_ref()
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    pub fn errors(&self) -> &ErrorList {
        &self.errors
    }

    pub fn captures_panics(&self) -> bool {
        self.capture_panics
    }

    /// Start a new import session; the recorder is left untouched
    pub fn begin_session(&self) {
        self.errors.clear();
    }

    /// Run `unit` behind a recorder-targeted boundary
    pub fn record<T, F>(&self, unit: F) -> Option<T>
    where
        F: FnOnce() -> ImportResult<T>,
    {
        self.dispatch(&RecorderSink(self.recorder.as_ref()), unit)
    }

    /// Run `unit` behind a boundary that reports to `logger`
    pub fn log_with<T, F>(&self, logger: &dyn Logger, unit: F) -> Option<T>
    where
        F: FnOnce() -> ImportResult<T>,
    {
        self.dispatch(&LoggerSink(logger), unit)
    }

    /// Run `unit` behind a boundary that reports to the context's logger
    pub fn log<T, F>(&self, unit: F) -> Option<T>
    where
        F: FnOnce() -> ImportResult<T>,
    {
        self.log_with(self.logger.as_ref(), unit)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_errors(&self.errors.snapshot())
    }

    fn dispatch<S, T, F>(&self, sink: &S, unit: F) -> Option<T>
    where
        S: FailureSink + ?Sized,
        F: FnOnce() -> ImportResult<T>,
    {
        if self.capture_panics {
            guard_unwinding(sink, &self.errors, unit)
        } else {
            guard(sink, &self.errors, unit)
        }
    }
}
