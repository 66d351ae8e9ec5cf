//! Transport error carrying a categorized status to the nearest boundary

use super::format::format_status;
use super::status::Status;
use std::fmt;
use std::sync::OnceLock;

pub type ImportResult<T> = Result<T, ImportError>;

/// Carrier for a [`Status`] travelling up the translation call stack.
///
/// The formatted message is computed on first use and cached.
#[derive(Debug, Clone)]
pub struct TransportException {
    status: Status,
    message: OnceLock<String>,
}

impl TransportException {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            message: OnceLock::new(),
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn into_status(self) -> Status {
        self.status
    }

    /// Formatted message for the carried status
    pub fn what(&self) -> &str {
        self.message.get_or_init(|| format_status(&self.status))
    }
}

impl From<Status> for TransportException {
    fn from(status: Status) -> Self {
        Self::new(status)
    }
}

impl fmt::Display for TransportException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.what())
    }
}

impl std::error::Error for TransportException {}

/// Any failure raised inside a translation unit.
///
/// Only [`ImportError::Status`] is categorized; every other variant is
/// normalized to `INTERNAL_ERROR` when absorbed by a boundary.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Status(#[from] TransportException),

    #[error("{0}")]
    Uncategorized(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ImportError {
    pub fn uncategorized(message: impl Into<String>) -> Self {
        Self::Uncategorized(message.into())
    }

    pub fn is_categorized(&self) -> bool {
        matches!(self, Self::Status(_))
    }

    pub fn as_transport(&self) -> Option<&TransportException> {
        match self {
            Self::Status(exception) => Some(exception),
            _ => None,
        }
    }
}

impl From<Status> for ImportError {
    fn from(status: Status) -> Self {
        Self::Status(TransportException::new(status))
    }
}

/// Abort the current translation step with `status`
pub fn throw_status<T>(status: Status) -> ImportResult<T> {
    Err(ImportError::Status(TransportException::new(status)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes::ErrorCode;
    use assert_matches::assert_matches;

    #[test]
    fn test_what_is_memoized_and_stable() {
        let exception = TransportException::new(Status::for_node(
            ErrorCode::UnsupportedNode,
            "no importer for op",
            2,
            "custom0",
            "MyOp",
            "importNode",
        ));

        let first = exception.what().to_string();
        let second = exception.what();

        assert_eq!(first, second);
        assert_eq!(first, format_status(exception.status()));
        assert_eq!(exception.to_string(), first);
    }

    #[test]
    fn test_clone_keeps_message() {
        let exception = TransportException::new(Status::new(ErrorCode::InvalidGraph, "cycle"));
        let _ = exception.what();
        let cloned = exception.clone();
        assert_eq!(cloned.what(), exception.what());
    }

    #[test]
    fn test_throw_status_carries_status() {
        let status = Status::new(ErrorCode::MemAllocFailed, "weights buffer");
        let result: ImportResult<()> = throw_status(status.clone());

        assert_matches!(result, Err(ImportError::Status(ref e)) if e.status() == &status);
    }

    #[test]
    fn test_uncategorized_variants() {
        let io = ImportError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "model.json",
        ));
        assert!(!io.is_categorized());
        assert!(io.as_transport().is_none());
        assert!(io.to_string().contains("model.json"));

        let other = ImportError::uncategorized("plugin crashed");
        assert_eq!(other.to_string(), "plugin crashed");

        let categorized = ImportError::from(Status::new(ErrorCode::InvalidNode, "bad"));
        assert!(categorized.is_categorized());
        assert_eq!(
            categorized.to_string(),
            "In node -1 with name:  and operator:  (): INVALID_NODE: bad"
        );
    }
}
