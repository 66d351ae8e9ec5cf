//! Status model for graph import failures
//!
//! Translation code raises categorized failures through the checks and macros
//! in this module; the boundaries in [`crate::boundary`] are the only place
//! they are absorbed.

#[macro_use]
pub mod macros;

pub mod check;
pub mod codes;
pub mod exception;
pub mod format;
pub mod status;

pub use check::{check, check_node, node_status, NodeDescriptor};
pub use codes::{
    code_to_external_code, code_to_string, code_to_string_raw, external_code_for_raw,
    ErrorCategory, ErrorCode, ErrorMetadata, ExternalErrorCode, ParseErrorCodeError,
};
pub use exception::{throw_status, ImportError, ImportResult, TransportException};
pub use format::format_status;
pub use status::{make_node_status, make_status, SourceLocation, Status};
