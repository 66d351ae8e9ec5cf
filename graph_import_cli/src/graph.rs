//! JSON graph description model

use graph_import_core::{bail_status, ErrorCode, ImportResult, NodeDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub name: String,
    pub op_type: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Node attribute; integer forms are tried before floating point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    String(String),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
}

impl AttributeValue {
    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            AttributeValue::Ints(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Int(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
            AttributeValue::Ints(_) => "ints",
            AttributeValue::Floats(_) => "floats",
        }
    }
}

impl Node {
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

impl NodeDescriptor for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn operator(&self) -> &str {
        &self.op_type
    }
}

impl Graph {
    pub fn from_json(text: &str) -> ImportResult<Self> {
        match serde_json::from_str(text) {
            Ok(graph) => Ok(graph),
            Err(e) => bail_status!(
                ErrorCode::ModelDeserializeFailed,
                "malformed graph description: {}",
                e
            ),
        }
    }

    /// Read and parse a graph file
    pub fn load(path: &Path) -> ImportResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => bail_status!(
                ErrorCode::ModelDeserializeFailed,
                "failed to read {}: {}",
                path.display(),
                e
            ),
        };
        Self::from_json(&text)
    }
}
