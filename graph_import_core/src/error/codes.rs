//! Import error codes and classification
//!
//! Single source of truth for import error codes, their display tokens, the
//! mapping onto the execution engine's error space, and per-code metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display token returned for raw values outside the taxonomy
pub const UNKNOWN_CODE: &str = "UNKNOWN";

// ============================================================================
// IMPORT ERROR CODES
// ============================================================================

/// Classification of a single import failure
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    InternalError = 1,
    MemAllocFailed = 2,
    ModelDeserializeFailed = 3,
    InvalidValue = 4,
    InvalidGraph = 5,
    InvalidNode = 6,
    UnsupportedGraph = 7,
    UnsupportedNode = 8,
    UnsupportedNodeAttr = 9,
    UnsupportedNodeInput = 10,
    UnsupportedNodeDatatype = 11,
    UnsupportedNodeDynamic = 12,
    UnsupportedNodeShape = 13,
    RefitFailed = 14,
}

impl ErrorCode {
    /// Every defined code, in discriminant order
    pub const ALL: [ErrorCode; 15] = [
        ErrorCode::Success,
        ErrorCode::InternalError,
        ErrorCode::MemAllocFailed,
        ErrorCode::ModelDeserializeFailed,
        ErrorCode::InvalidValue,
        ErrorCode::InvalidGraph,
        ErrorCode::InvalidNode,
        ErrorCode::UnsupportedGraph,
        ErrorCode::UnsupportedNode,
        ErrorCode::UnsupportedNodeAttr,
        ErrorCode::UnsupportedNodeInput,
        ErrorCode::UnsupportedNodeDatatype,
        ErrorCode::UnsupportedNodeDynamic,
        ErrorCode::UnsupportedNodeShape,
        ErrorCode::RefitFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Success => "SUCCESS",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::MemAllocFailed => "MEM_ALLOC_FAILED",
            ErrorCode::ModelDeserializeFailed => "MODEL_DESERIALIZE_FAILED",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::InvalidGraph => "INVALID_GRAPH",
            ErrorCode::InvalidNode => "INVALID_NODE",
            ErrorCode::UnsupportedGraph => "UNSUPPORTED_GRAPH",
            ErrorCode::UnsupportedNode => "UNSUPPORTED_NODE",
            ErrorCode::UnsupportedNodeAttr => "UNSUPPORTED_NODE_ATTR",
            ErrorCode::UnsupportedNodeInput => "UNSUPPORTED_NODE_INPUT",
            ErrorCode::UnsupportedNodeDatatype => "UNSUPPORTED_NODE_DATATYPE",
            ErrorCode::UnsupportedNodeDynamic => "UNSUPPORTED_NODE_DYNAMIC",
            ErrorCode::UnsupportedNodeShape => "UNSUPPORTED_NODE_SHAPE",
            ErrorCode::RefitFailed => "REFIT_FAILED",
        }
    }

    /// Raw discriminant, as exchanged with the engine
    pub fn raw(&self) -> i32 {
        *self as i32
    }

    pub fn from_raw(raw: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.raw() == raw)
    }

    /// Map onto the engine's error space.
    ///
    /// | ErrorCode                    | ExternalErrorCode   |
    /// |------------------------------|---------------------|
    /// | SUCCESS                      | SUCCESS             |
    /// | INTERNAL_ERROR               | INTERNAL_ERROR      |
    /// | MEM_ALLOC_FAILED             | FAILED_ALLOCATION   |
    /// | MODEL_DESERIALIZE_FAILED     | INVALID_ARGUMENT    |
    /// | INVALID_VALUE                | INVALID_ARGUMENT    |
    /// | INVALID_GRAPH                | INVALID_ARGUMENT    |
    /// | INVALID_NODE                 | INVALID_ARGUMENT    |
    /// | UNSUPPORTED_GRAPH            | UNSUPPORTED_STATE   |
    /// | UNSUPPORTED_NODE             | UNSUPPORTED_STATE   |
    /// | UNSUPPORTED_NODE_ATTR        | UNSUPPORTED_STATE   |
    /// | UNSUPPORTED_NODE_INPUT       | UNSUPPORTED_STATE   |
    /// | UNSUPPORTED_NODE_DATATYPE    | UNSUPPORTED_STATE   |
    /// | UNSUPPORTED_NODE_DYNAMIC     | UNSUPPORTED_STATE   |
    /// | UNSUPPORTED_NODE_SHAPE       | UNSUPPORTED_STATE   |
    /// | REFIT_FAILED                 | INVALID_ARGUMENT    |
    ///
    /// Raw values outside the taxonomy map to `UNSPECIFIED_ERROR`, see
    /// [`external_code_for_raw`].
    pub fn to_external(&self) -> ExternalErrorCode {
        match self {
            ErrorCode::Success => ExternalErrorCode::Success,
            ErrorCode::InternalError => ExternalErrorCode::InternalError,
            ErrorCode::MemAllocFailed => ExternalErrorCode::FailedAllocation,
            ErrorCode::ModelDeserializeFailed
            | ErrorCode::InvalidValue
            | ErrorCode::InvalidGraph
            | ErrorCode::InvalidNode
            | ErrorCode::RefitFailed => ExternalErrorCode::InvalidArgument,
            ErrorCode::UnsupportedGraph
            | ErrorCode::UnsupportedNode
            | ErrorCode::UnsupportedNodeAttr
            | ErrorCode::UnsupportedNodeInput
            | ErrorCode::UnsupportedNodeDatatype
            | ErrorCode::UnsupportedNodeDynamic
            | ErrorCode::UnsupportedNodeShape => ExternalErrorCode::UnsupportedState,
        }
    }

    /// Whether formatted messages for this code start with the node prefix.
    ///
    /// Deserialization and refit failures happen outside any node.
    pub fn carries_node_prefix(&self) -> bool {
        !matches!(
            self,
            ErrorCode::ModelDeserializeFailed | ErrorCode::RefitFailed
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::Success => ErrorCategory::Success,
            ErrorCode::InternalError => ErrorCategory::Internal,
            ErrorCode::MemAllocFailed
            | ErrorCode::ModelDeserializeFailed
            | ErrorCode::RefitFailed => ErrorCategory::Resource,
            ErrorCode::InvalidValue | ErrorCode::InvalidGraph | ErrorCode::InvalidNode => {
                ErrorCategory::Structural
            }
            ErrorCode::UnsupportedGraph
            | ErrorCode::UnsupportedNode
            | ErrorCode::UnsupportedNodeAttr
            | ErrorCode::UnsupportedNodeInput
            | ErrorCode::UnsupportedNodeDatatype
            | ErrorCode::UnsupportedNodeDynamic
            | ErrorCode::UnsupportedNodeShape => ErrorCategory::Capability,
        }
    }

    pub fn metadata(&self) -> ErrorMetadata {
        let (recoverable, description, recommended_action) = match self {
            ErrorCode::Success => (true, "No failure", "No action required"),
            ErrorCode::InternalError => (
                false,
                "Uncategorized failure inside the importer",
                "File a bug report with the failing model attached",
            ),
            ErrorCode::MemAllocFailed => (
                false,
                "Memory allocation failed during import",
                "Reduce model size or increase available memory",
            ),
            ErrorCode::ModelDeserializeFailed => (
                false,
                "Model description could not be deserialized",
                "Check that the model file is complete and well-formed",
            ),
            ErrorCode::InvalidValue => (
                true,
                "A value in the model is invalid",
                "Correct the offending value in the model",
            ),
            ErrorCode::InvalidGraph => (
                false,
                "Graph structure is invalid",
                "Validate the graph with the exporting tool",
            ),
            ErrorCode::InvalidNode => (
                true,
                "Node definition is invalid",
                "Check node inputs, outputs and attributes",
            ),
            ErrorCode::UnsupportedGraph => (
                false,
                "Graph uses a construct the importer does not support",
                "Simplify or re-export the graph",
            ),
            ErrorCode::UnsupportedNode => (
                true,
                "Operator is not supported",
                "Replace the operator or register a custom implementation",
            ),
            ErrorCode::UnsupportedNodeAttr => (
                true,
                "Operator attribute is not supported",
                "Use a supported attribute value",
            ),
            ErrorCode::UnsupportedNodeInput => (
                true,
                "Operator input is not supported",
                "Check the number and kind of node inputs",
            ),
            ErrorCode::UnsupportedNodeDatatype => (
                true,
                "Operator data type is not supported",
                "Cast the tensor to a supported data type",
            ),
            ErrorCode::UnsupportedNodeDynamic => (
                true,
                "Dynamic dimensions are not supported for this operator",
                "Provide static shapes for this operator",
            ),
            ErrorCode::UnsupportedNodeShape => (
                true,
                "Operator shape is not supported",
                "Reshape the tensor to a supported rank",
            ),
            ErrorCode::RefitFailed => (
                false,
                "Refitting weights into the built engine failed",
                "Check that refit weights match the original model",
            ),
        };

        ErrorMetadata {
            code: *self,
            category: self.category(),
            recoverable,
            description,
            recommended_action,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown code token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {token}")]
pub struct ParseErrorCodeError {
    pub token: String,
}

impl FromStr for ErrorCode {
    type Err = ParseErrorCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| ParseErrorCodeError {
                token: s.to_string(),
            })
    }
}

/// Display token for a code
pub fn code_to_string(code: ErrorCode) -> &'static str {
    code.as_str()
}

/// Display token for a raw code value, `"UNKNOWN"` if undefined
pub fn code_to_string_raw(raw: i32) -> &'static str {
    ErrorCode::from_raw(raw)
        .map(|code| code.as_str())
        .unwrap_or(UNKNOWN_CODE)
}

pub fn code_to_external_code(code: ErrorCode) -> ExternalErrorCode {
    code.to_external()
}

/// Engine code for a raw code value; undefined values fall back to
/// `UNSPECIFIED_ERROR`
pub fn external_code_for_raw(raw: i32) -> ExternalErrorCode {
    ErrorCode::from_raw(raw)
        .map(|code| code.to_external())
        .unwrap_or(ExternalErrorCode::UnspecifiedError)
}

// ============================================================================
// ENGINE ERROR CODES
// ============================================================================

/// Error codes understood by the execution engine's error recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ExternalErrorCode {
    Success = 0,
    UnspecifiedError = 1,
    InternalError = 2,
    InvalidArgument = 3,
    InvalidConfig = 4,
    FailedAllocation = 5,
    FailedInitialization = 6,
    FailedExecution = 7,
    FailedComputation = 8,
    InvalidState = 9,
    UnsupportedState = 10,
}

impl ExternalErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalErrorCode::Success => "SUCCESS",
            ExternalErrorCode::UnspecifiedError => "UNSPECIFIED_ERROR",
            ExternalErrorCode::InternalError => "INTERNAL_ERROR",
            ExternalErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ExternalErrorCode::InvalidConfig => "INVALID_CONFIG",
            ExternalErrorCode::FailedAllocation => "FAILED_ALLOCATION",
            ExternalErrorCode::FailedInitialization => "FAILED_INITIALIZATION",
            ExternalErrorCode::FailedExecution => "FAILED_EXECUTION",
            ExternalErrorCode::FailedComputation => "FAILED_COMPUTATION",
            ExternalErrorCode::InvalidState => "INVALID_STATE",
            ExternalErrorCode::UnsupportedState => "UNSUPPORTED_STATE",
        }
    }
}

impl fmt::Display for ExternalErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Broad family an [`ErrorCode`] belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Success,
    /// Malformed input: values, graphs or nodes
    Structural,
    /// Input is well-formed but the importer cannot express it
    Capability,
    /// Memory, deserialization and refit failures
    Resource,
    /// Anything not raised through the importer's own checks
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Success => "success",
            ErrorCategory::Structural => "structural",
            ErrorCategory::Capability => "capability",
            ErrorCategory::Resource => "resource",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMetadata {
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}
