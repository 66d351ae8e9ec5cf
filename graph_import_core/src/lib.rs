// Internal modules
pub mod boundary;
pub mod config;
pub mod context;
#[macro_use]
pub mod error;
#[macro_use]
pub mod logging;
pub mod recorder;
pub mod summary;

// Re-export key types for library consumers
pub use boundary::{ErrorList, Failure, FailureSink, LoggerSink, RecorderSink};
pub use context::ImporterContext;
pub use error::{
    check, check_node, make_node_status, make_status, throw_status, ErrorCategory, ErrorCode,
    ExternalErrorCode, ImportError, ImportResult, NodeDescriptor, Status, TransportException,
};
pub use config::ImporterConfig;
pub use logging::{Logger, Severity};
pub use recorder::{ErrorRecorder, LoggingRecorder, MemoryRecorder};
pub use summary::SessionSummary;
