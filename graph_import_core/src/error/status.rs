//! Categorized import failure values

use super::codes::ErrorCode;
use super::format;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source position of the check that produced a status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

/// One categorized failure, optionally attributed to a graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    code: ErrorCode,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<SourceLocation>,
}

impl Status {
    /// Bare status: code and description only
    pub fn new(code: ErrorCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            node_index: None,
            node_name: None,
            node_operator: None,
            function_name: None,
            location: None,
        }
    }

    /// Node-attributed status
    pub fn for_node(
        code: ErrorCode,
        description: impl Into<String>,
        node_index: usize,
        node_name: impl Into<String>,
        node_operator: impl Into<String>,
        function_name: impl Into<String>,
    ) -> Self {
        Self {
            code,
            description: description.into(),
            node_index: Some(node_index),
            node_name: Some(node_name.into()),
            node_operator: Some(node_operator.into()),
            function_name: Some(function_name.into()),
            location: None,
        }
    }

    pub fn success() -> Self {
        Self::new(ErrorCode::Success, "")
    }

    /// Same status, attributed to `function_name`
    pub fn with_function(self, function_name: impl Into<String>) -> Self {
        Self {
            function_name: Some(function_name.into()),
            ..self
        }
    }

    /// Same status, recording where it was raised
    pub fn at(self, file: &str, line: u32) -> Self {
        Self {
            location: Some(SourceLocation {
                file: file.to_string(),
                line,
            }),
            ..self
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn node_index(&self) -> Option<usize> {
        self.node_index
    }

    pub fn node_name(&self) -> Option<&str> {
        self.node_name.as_deref()
    }

    pub fn node_operator(&self) -> Option<&str> {
        self.node_operator.as_deref()
    }

    pub fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success
    }

    pub fn has_node_attribution(&self) -> bool {
        self.node_index.is_some()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format_status(self))
    }
}

/// Build a bare status
pub fn make_status(code: ErrorCode, description: impl Into<String>) -> Status {
    Status::new(code, description)
}

/// Build a node-attributed status
pub fn make_node_status(
    code: ErrorCode,
    description: impl Into<String>,
    node_index: usize,
    node_name: impl Into<String>,
    node_operator: impl Into<String>,
    function_name: impl Into<String>,
) -> Status {
    Status::for_node(
        code,
        description,
        node_index,
        node_name,
        node_operator,
        function_name,
    )
}
