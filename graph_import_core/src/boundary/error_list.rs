//! Accumulated statuses for one import session

use crate::error::{ErrorCode, Status};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Append-only list of absorbed failures
///
/// Every append goes through [`ErrorList::record_with`], which serializes
/// report and push on a separate ordering lock, so list order matches report
/// order. The entries lock is never held while a sink runs, so sinks may read
/// the list.
#[derive(Debug, Default)]
pub struct ErrorList {
    report_lock: Mutex<()>,
    entries: Mutex<Vec<Status>>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `report` and append the status it returns before any other report
    pub fn record_with<F>(&self, report: F)
    where
        F: FnOnce() -> Status,
    {
        let _ordering = self
            .report_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let status = report();
        self.lock().push(status);
    }

    pub fn snapshot(&self) -> Vec<Status> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.lock().iter().map(|status| status.code()).collect()
    }

    /// Drop all entries; only at the start of a new session
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Status>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
