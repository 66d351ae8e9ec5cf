//! Failure boundaries
//!
//! A boundary runs one translation unit, and if the unit fails it reports the
//! failure to exactly one sink and appends exactly one [`Status`] to the
//! session's [`ErrorList`]. Boundaries never re-raise; the caller moves on to
//! the next unit.

pub mod error_list;

pub use error_list::ErrorList;

use crate::error::{
    ErrorCode, ExternalErrorCode, ImportError, ImportResult, Status, TransportException,
};
use crate::logging::{Logger, Severity};
use crate::recorder::ErrorRecorder;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A failure as seen by a sink
#[derive(Debug, Clone, Copy)]
pub enum Failure<'a> {
    /// Raised through the importer's own checks
    Categorized(&'a TransportException),
    /// Anything else, reduced to its message
    Uncategorized(&'a str),
}

impl Failure<'_> {
    pub fn message(&self) -> &str {
        match self {
            Failure::Categorized(exception) => exception.what(),
            Failure::Uncategorized(message) => message,
        }
    }
}

/// External destination for absorbed failures
pub trait FailureSink {
    fn report(&self, failure: &Failure<'_>);
}

/// Forwards failures to an error recorder under their external code
#[derive(Clone, Copy)]
pub struct RecorderSink<'a>(pub &'a dyn ErrorRecorder);

impl FailureSink for RecorderSink<'_> {
    fn report(&self, failure: &Failure<'_>) {
        match failure {
            Failure::Categorized(exception) => self
                .0
                .report_error(exception.status().code().to_external(), exception.what()),
            Failure::Uncategorized(message) => {
                self.0.report_error(ExternalErrorCode::UnspecifiedError, message)
            }
        }
    }
}

/// Forwards failures to a logger at internal-error severity
#[derive(Clone, Copy)]
pub struct LoggerSink<'a>(pub &'a dyn Logger);

impl FailureSink for LoggerSink<'_> {
    fn report(&self, failure: &Failure<'_>) {
        self.0.log(Severity::InternalError, failure.message());
    }
}

/// Run `unit`, absorbing any failure into `sink` and `errors`
///
/// Returns the unit's value on success; on failure returns `None` after
/// exactly one report and one appended status.
pub fn guard<S, T, F>(sink: &S, errors: &ErrorList, unit: F) -> Option<T>
where
    S: FailureSink + ?Sized,
    F: FnOnce() -> ImportResult<T>,
{
    match unit() {
        Ok(value) => Some(value),
        Err(error) => {
            absorb(sink, errors, error);
            None
        }
    }
}

/// Same as [`guard`], also absorbing panics raised inside `unit`
pub fn guard_unwinding<S, T, F>(sink: &S, errors: &ErrorList, unit: F) -> Option<T>
where
    S: FailureSink + ?Sized,
    F: FnOnce() -> ImportResult<T>,
{
    match catch_unwind(AssertUnwindSafe(unit)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(error)) => {
            absorb(sink, errors, error);
            None
        }
        Err(payload) => {
            absorb(sink, errors, ImportError::uncategorized(panic_message(&*payload)));
            None
        }
    }
}

fn absorb<S: FailureSink + ?Sized>(sink: &S, errors: &ErrorList, error: ImportError) {
    match error {
        ImportError::Status(exception) => errors.record_with(|| {
            sink.report(&Failure::Categorized(&exception));
            exception.into_status()
        }),
        other => {
            let message = other.to_string();
            errors.record_with(|| {
                sink.report(&Failure::Uncategorized(&message));
                Status::new(ErrorCode::InternalError, message)
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{make_node_status, throw_status};
    use crate::logging::MemoryLogger;
    use crate::recorder::MemoryRecorder;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CountingSink {
        reports: RefCell<Vec<String>>,
    }

    impl FailureSink for CountingSink {
        fn report(&self, failure: &Failure<'_>) {
            self.reports.borrow_mut().push(failure.message().to_string());
        }
    }

    /// Caps its own reports using the session's error count
    struct CappedSink<'a> {
        errors: &'a ErrorList,
        cap: usize,
        reports: RefCell<Vec<String>>,
    }

    impl FailureSink for CappedSink<'_> {
        fn report(&self, failure: &Failure<'_>) {
            if self.errors.len() < self.cap {
                self.reports.borrow_mut().push(failure.message().to_string());
            }
        }
    }

    fn unsupported_resize() -> Status {
        make_node_status(
            ErrorCode::UnsupportedNodeAttr,
            "cubic mode not supported",
            4,
            "resize_4",
            "Resize",
            "import_resize",
        )
    }

    #[test]
    fn test_success_touches_nothing() {
        let recorder = MemoryRecorder::new();
        let errors = ErrorList::new();

        let value = guard(&RecorderSink(&recorder), &errors, || Ok(7));

        assert_eq!(value, Some(7));
        assert_eq!(recorder.num_errors(), 0);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_recorder_boundary_categorized() {
        let recorder = MemoryRecorder::new();
        let errors = ErrorList::new();
        let status = unsupported_resize();

        let value: Option<()> =
            guard(&RecorderSink(&recorder), &errors, || throw_status(status.clone()));

        assert_eq!(value, None);
        assert_eq!(recorder.num_errors(), 1);
        assert_eq!(
            recorder.error_code(0),
            Some(ExternalErrorCode::UnsupportedState)
        );
        assert_eq!(recorder.error_desc(0), Some(status.to_string()));
        assert_eq!(errors.snapshot(), vec![status]);
    }

    #[test]
    fn test_recorder_boundary_uncategorized() {
        let recorder = MemoryRecorder::new();
        let errors = ErrorList::new();

        let value: Option<()> = guard(&RecorderSink(&recorder), &errors, || {
            Err(ImportError::uncategorized("vector index out of range"))
        });

        assert_eq!(value, None);
        assert_eq!(
            recorder.error_code(0),
            Some(ExternalErrorCode::UnspecifiedError)
        );
        assert_eq!(
            recorder.error_desc(0).as_deref(),
            Some("vector index out of range")
        );

        let entries = errors.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code(), ErrorCode::InternalError);
        assert_eq!(entries[0].description(), "vector index out of range");
    }

    #[test]
    fn test_io_error_is_normalized() {
        let recorder = MemoryRecorder::new();
        let errors = ErrorList::new();

        let _: Option<()> = guard(&RecorderSink(&recorder), &errors, || {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "weights.bin").into())
        });

        assert_eq!(errors.codes(), vec![ErrorCode::InternalError]);
        assert_eq!(errors.snapshot()[0].description(), "I/O error: weights.bin");
    }

    #[test]
    fn test_logger_boundary() {
        let logger = MemoryLogger::new();
        let errors = ErrorList::new();
        let status = unsupported_resize();

        let _: Option<()> = guard(&LoggerSink(&logger), &errors, || throw_status(status.clone()));
        let _: Option<()> = guard(&LoggerSink(&logger), &errors, || {
            Err(ImportError::uncategorized("bad cast"))
        });

        assert_eq!(
            logger.messages(),
            vec![
                (Severity::InternalError, status.to_string()),
                (Severity::InternalError, "bad cast".to_string()),
            ]
        );
        assert_eq!(
            errors.codes(),
            vec![ErrorCode::UnsupportedNodeAttr, ErrorCode::InternalError]
        );
    }

    #[test]
    fn test_one_entry_per_failed_unit_in_order() {
        let sink = CountingSink::default();
        let errors = ErrorList::new();

        for index in 0..5usize {
            guard(&sink, &errors, || {
                if index % 2 == 1 {
                    throw_status(Status::new(ErrorCode::InvalidNode, format!("node {}", index)))
                } else {
                    Ok(index)
                }
            });
        }

        assert_eq!(sink.reports.borrow().len(), 2);
        let descriptions: Vec<String> = errors
            .snapshot()
            .iter()
            .map(|s| s.description().to_string())
            .collect();
        assert_eq!(descriptions, vec!["node 1", "node 3"]);
    }

    #[test]
    fn test_guard_unwinding_absorbs_panics() {
        let recorder = MemoryRecorder::new();
        let errors = ErrorList::new();

        let value: Option<()> = guard_unwinding(&RecorderSink(&recorder), &errors, || {
            panic!("shape rank {} out of range", 9)
        });

        assert_eq!(value, None);
        assert_eq!(
            recorder.error_code(0),
            Some(ExternalErrorCode::UnspecifiedError)
        );
        let entries = errors.snapshot();
        assert_eq!(entries[0].code(), ErrorCode::InternalError);
        assert_eq!(entries[0].description(), "shape rank 9 out of range");
    }

    #[test]
    fn test_guard_unwinding_passes_results_through() {
        let sink = CountingSink::default();
        let errors = ErrorList::new();

        assert_eq!(guard_unwinding(&sink, &errors, || Ok("ok")), Some("ok"));
        let failed: Option<()> = guard_unwinding(&sink, &errors, || {
            throw_status(Status::new(ErrorCode::MemAllocFailed, "arena"))
        });

        assert_eq!(failed, None);
        assert_eq!(errors.codes(), vec![ErrorCode::MemAllocFailed]);
    }

    #[test]
    fn test_sink_may_read_error_list() {
        let errors = ErrorList::new();
        let sink = CappedSink {
            errors: &errors,
            cap: 2,
            reports: RefCell::new(Vec::new()),
        };

        for index in 0..4usize {
            let _: Option<()> = guard(&sink, &errors, || {
                throw_status(Status::new(ErrorCode::InvalidNode, format!("node {}", index)))
            });
        }

        assert_eq!(errors.len(), 4);
        assert_eq!(sink.reports.borrow().len(), 2);
    }
}
