//! Graph translation: one boundary per graph pass and per node

use crate::cli::BoundaryTarget;
use crate::graph::{AttributeValue, Graph, Node};
use graph_import_core::error::node_status;
use graph_import_core::{
    ensure_node, ensure_status, function_name, ErrorCode, ImportResult, ImporterContext, Status,
};
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// ============================================================================
// OPERATOR TABLE
// ============================================================================

/// Input arity accepted for one operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpec {
    pub op_type: &'static str,
    pub min_inputs: usize,
    pub max_inputs: usize,
}

#[rustfmt::skip]
const OPERATORS: &[OperatorSpec] = &[
    OperatorSpec { op_type: "Identity", min_inputs: 1, max_inputs: 1 },
    OperatorSpec { op_type: "Relu", min_inputs: 1, max_inputs: 1 },
    OperatorSpec { op_type: "Add", min_inputs: 2, max_inputs: 2 },
    OperatorSpec { op_type: "Mul", min_inputs: 2, max_inputs: 2 },
    OperatorSpec { op_type: "MatMul", min_inputs: 2, max_inputs: 2 },
    OperatorSpec { op_type: "Conv", min_inputs: 2, max_inputs: 3 },
    OperatorSpec { op_type: "Reshape", min_inputs: 1, max_inputs: 1 },
    OperatorSpec { op_type: "Cast", min_inputs: 1, max_inputs: 1 },
];

pub const SUPPORTED_DATATYPES: &[&str] = &["float32", "float16", "int32", "int64", "bool"];

impl OperatorSpec {
    pub fn lookup(op_type: &str) -> Option<&'static OperatorSpec> {
        OPERATORS.iter().find(|spec| spec.op_type == op_type)
    }

    pub fn accepts_inputs(&self, count: usize) -> bool {
        (self.min_inputs..=self.max_inputs).contains(&count)
    }
}

pub fn is_supported_datatype(dtype: &str) -> bool {
    SUPPORTED_DATATYPES.contains(&dtype)
}

// ============================================================================
// GRAPH AND NODE CHECKS
// ============================================================================

/// Whole-graph structural checks
pub fn check_graph(graph: &Graph) -> ImportResult<()> {
    ensure_status!(
        !graph.nodes.is_empty(),
        ErrorCode::InvalidGraph,
        "graph '{}' has no nodes",
        graph.name
    );

    let mut seen = BTreeSet::new();
    for node in &graph.nodes {
        ensure_status!(
            node.name.is_empty() || seen.insert(node.name.as_str()),
            ErrorCode::InvalidGraph,
            "duplicate node name '{}'",
            node.name
        );
    }

    Ok(())
}

/// Translate one node
pub fn import_node(node: &Node, index: usize) -> ImportResult<()> {
    ensure_node!(
        !node.name.is_empty(),
        node,
        index,
        ErrorCode::InvalidNode,
        "node has no name"
    );
    ensure_node!(
        !node.outputs.is_empty(),
        node,
        index,
        ErrorCode::InvalidNode,
        "node produces no outputs"
    );

    let Some(spec) = OperatorSpec::lookup(&node.op_type) else {
        let status = node_status(
            ErrorCode::UnsupportedNode,
            format!("no importer for operator {}", node.op_type),
            node,
            index,
            Some(function_name!()),
        );
        return Err(status.at(file!(), line!()).into());
    };

    ensure_node!(
        spec.accepts_inputs(node.inputs.len()),
        node,
        index,
        ErrorCode::UnsupportedNodeInput,
        "{} expects {} to {} inputs, found {}",
        spec.op_type,
        spec.min_inputs,
        spec.max_inputs,
        node.inputs.len()
    );

    check_datatype(node, index)?;

    match spec.op_type {
        "Conv" => import_conv(node, index),
        "Reshape" => import_reshape(node, index),
        "Cast" => import_cast(node, index),
        _ => Ok(()),
    }
}

fn check_datatype(node: &Node, index: usize) -> ImportResult<()> {
    let Some(value) = node.attribute("dtype") else {
        return Ok(());
    };

    ensure_node!(
        value.as_str().is_some(),
        node,
        index,
        ErrorCode::UnsupportedNodeAttr,
        "attribute dtype must be a string, found {}",
        value.kind()
    );
    let dtype = value.as_str().unwrap_or_default();
    ensure_node!(
        is_supported_datatype(dtype),
        node,
        index,
        ErrorCode::UnsupportedNodeDatatype,
        "data type {} is not supported",
        dtype
    );
    Ok(())
}

fn ints_attribute<'a>(node: &'a Node, key: &str) -> Option<&'a [i64]> {
    node.attribute(key).and_then(AttributeValue::as_ints)
}

fn import_conv(node: &Node, index: usize) -> ImportResult<()> {
    let kernel = ints_attribute(node, "kernel_shape");
    ensure_node!(
        kernel.is_some(),
        node,
        index,
        ErrorCode::UnsupportedNodeAttr,
        "Conv requires an integer list attribute kernel_shape"
    );
    let kernel = kernel.unwrap_or_default();

    ensure_node!(
        (1..=3).contains(&kernel.len()),
        node,
        index,
        ErrorCode::UnsupportedNodeShape,
        "kernel rank {} not supported",
        kernel.len()
    );
    ensure_node!(
        kernel.iter().all(|&dim| dim > 0),
        node,
        index,
        ErrorCode::InvalidNode,
        "kernel dimensions must be positive, found {:?}",
        kernel
    );
    Ok(())
}

fn import_reshape(node: &Node, index: usize) -> ImportResult<()> {
    let shape = ints_attribute(node, "shape");
    ensure_node!(
        shape.is_some(),
        node,
        index,
        ErrorCode::UnsupportedNodeAttr,
        "Reshape requires an integer list attribute shape"
    );
    let shape = shape.unwrap_or_default();

    ensure_node!(
        !shape.is_empty(),
        node,
        index,
        ErrorCode::UnsupportedNodeShape,
        "scalar reshape is not supported"
    );
    ensure_node!(
        shape.iter().all(|&dim| dim >= 0),
        node,
        index,
        ErrorCode::UnsupportedNodeDynamic,
        "dynamic dimension in target shape {:?}",
        shape
    );
    Ok(())
}

fn import_cast(node: &Node, index: usize) -> ImportResult<()> {
    let target = node.attribute("to").and_then(AttributeValue::as_str);
    ensure_node!(
        target.is_some(),
        node,
        index,
        ErrorCode::UnsupportedNodeAttr,
        "Cast requires a string attribute to"
    );
    let target = target.unwrap_or_default();

    ensure_node!(
        is_supported_datatype(target),
        node,
        index,
        ErrorCode::UnsupportedNodeDatatype,
        "cannot cast to {}",
        target
    );
    Ok(())
}

// ============================================================================
// SESSION DRIVER
// ============================================================================

/// Result of importing one graph file
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
    pub nodes: usize,
    pub imported_nodes: usize,
    pub errors: Vec<Status>,
}

/// Runs graph files through an importer context
pub struct GraphImporter<'a> {
    context: &'a ImporterContext,
    target: BoundaryTarget,
}

impl<'a> GraphImporter<'a> {
    pub fn new(context: &'a ImporterContext, target: BoundaryTarget) -> Self {
        Self { context, target }
    }

    fn guarded<T, F>(&self, unit: F) -> Option<T>
    where
        F: FnOnce() -> ImportResult<T>,
    {
        match self.target {
            BoundaryTarget::Recorder => self.context.record(unit),
            BoundaryTarget::Logger => self.context.log(unit),
        }
    }

    /// Run the graph pass and every node, each behind its own boundary
    ///
    /// Returns the number of nodes imported without failure.
    pub fn import_graph(&self, graph: &Graph) -> usize {
        self.guarded(|| check_graph(graph));

        let mut imported = 0;
        for (index, node) in graph.nodes.iter().enumerate() {
            debug!("Importing node {} ({})", index, node.op_type);
            if self.guarded(|| import_node(node, index)).is_some() {
                imported += 1;
            }
        }
        imported
    }

    /// Import one file as a fresh session
    pub fn import_file(&self, path: &Path) -> FileOutcome {
        self.context.begin_session();

        let graph = self.guarded(|| Graph::load(path));
        let (name, nodes, imported_nodes) = match &graph {
            Some(graph) => (
                Some(graph.name.clone()),
                graph.nodes.len(),
                self.import_graph(graph),
            ),
            None => (None, 0, 0),
        };

        FileOutcome {
            path: path.to_path_buf(),
            graph: name,
            nodes,
            imported_nodes,
            errors: self.context.errors().snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_import_core::logging::{MemoryLogger, Severity};
    use graph_import_core::{ExternalErrorCode, MemoryRecorder};
    use std::sync::Arc;

    fn node(
        name: &str,
        op_type: &str,
        inputs: usize,
        attributes: &[(&str, AttributeValue)],
    ) -> Node {
        Node {
            name: name.to_string(),
            op_type: op_type.to_string(),
            inputs: (0..inputs).map(|i| format!("in{}", i)).collect(),
            outputs: vec![format!("{}_out", name)],
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn failure(node: &Node) -> Status {
        import_node(node, 5)
            .unwrap_err()
            .as_transport()
            .unwrap()
            .status()
            .clone()
    }

    fn ints(values: &[i64]) -> AttributeValue {
        AttributeValue::Ints(values.to_vec())
    }

    fn string(value: &str) -> AttributeValue {
        AttributeValue::String(value.to_string())
    }

    #[test]
    fn test_supported_nodes_import() {
        let supported = [
            node("relu", "Relu", 1, &[]),
            node("conv", "Conv", 3, &[("kernel_shape", ints(&[3, 3]))]),
            node("r", "Reshape", 1, &[("shape", ints(&[1, 64]))]),
            node("c", "Cast", 1, &[("to", string("float16"))]),
        ];

        for (index, node) in supported.iter().enumerate() {
            assert!(import_node(node, index).is_ok(), "node {:?}", node);
        }
    }

    #[test]
    fn test_unsupported_operator() {
        let status = failure(&node("loop_5", "Loop", 2, &[]));

        assert_eq!(status.code(), ErrorCode::UnsupportedNode);
        assert_eq!(status.function_name(), Some("import_node"));
        assert_eq!(
            status.to_string(),
            "In node 5 with name: loop_5 and operator: Loop (import_node): \
             UNSUPPORTED_NODE: no importer for operator Loop"
        );
    }

    #[test]
    fn test_node_classification() {
        let cases = [
            (node("", "Relu", 1, &[]), ErrorCode::InvalidNode),
            (node("add", "Add", 1, &[]), ErrorCode::UnsupportedNodeInput),
            (node("conv", "Conv", 2, &[]), ErrorCode::UnsupportedNodeAttr),
            (
                node("conv", "Conv", 2, &[("kernel_shape", ints(&[1, 1, 1, 1]))]),
                ErrorCode::UnsupportedNodeShape,
            ),
            (
                node("conv", "Conv", 2, &[("kernel_shape", ints(&[0, 3]))]),
                ErrorCode::InvalidNode,
            ),
            (
                node("r", "Reshape", 1, &[("shape", ints(&[]))]),
                ErrorCode::UnsupportedNodeShape,
            ),
            (
                node("r", "Reshape", 1, &[("shape", ints(&[-1, 64]))]),
                ErrorCode::UnsupportedNodeDynamic,
            ),
            (
                node("c", "Cast", 1, &[("to", string("complex64"))]),
                ErrorCode::UnsupportedNodeDatatype,
            ),
            (
                node("m", "MatMul", 2, &[("dtype", string("float64"))]),
                ErrorCode::UnsupportedNodeDatatype,
            ),
            (
                node("m", "MatMul", 2, &[("dtype", AttributeValue::Int(1))]),
                ErrorCode::UnsupportedNodeAttr,
            ),
        ];

        for (node, expected) in cases {
            let status = failure(&node);
            assert_eq!(status.code(), expected, "node {:?}", node);
            assert_eq!(status.node_index(), Some(5));
        }
    }

    #[test]
    fn test_check_graph() {
        let empty = Graph {
            name: "empty".to_string(),
            nodes: vec![],
        };
        let error = check_graph(&empty).unwrap_err();
        let status = error.as_transport().unwrap().status();
        assert_eq!(status.code(), ErrorCode::InvalidGraph);
        assert_eq!(
            status.to_string(),
            "In node -1 with name:  and operator:  (check_graph): \
             INVALID_GRAPH: graph 'empty' has no nodes"
        );

        let duplicated = Graph {
            name: "dup".to_string(),
            nodes: vec![node("a", "Relu", 1, &[]), node("a", "Relu", 1, &[])],
        };
        assert!(check_graph(&duplicated).is_err());
    }

    fn write_graph(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    const MIXED_GRAPH: &str = r#"{
        "name": "mixed",
        "nodes": [
            {"name": "a", "op_type": "Relu", "inputs": ["x"], "outputs": ["y"]},
            {"name": "b", "op_type": "Loop", "inputs": ["y"], "outputs": ["z"]},
            {"name": "c", "op_type": "Add", "inputs": ["z"], "outputs": ["w"]}
        ]
    }"#;

    #[test]
    fn test_import_file_continues_past_failed_nodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_graph(dir.path(), "mixed.json", MIXED_GRAPH);

        let recorder = Arc::new(MemoryRecorder::new());
        let context = ImporterContext::new(recorder.clone(), Arc::new(MemoryLogger::new()));
        let importer = GraphImporter::new(&context, BoundaryTarget::Recorder);

        let outcome = importer.import_file(&path);

        assert_eq!(outcome.graph.as_deref(), Some("mixed"));
        assert_eq!(outcome.nodes, 3);
        assert_eq!(outcome.imported_nodes, 1);
        assert_eq!(
            outcome.errors.iter().map(|s| s.code()).collect::<Vec<_>>(),
            vec![ErrorCode::UnsupportedNode, ErrorCode::UnsupportedNodeInput]
        );
        assert_eq!(recorder.num_errors(), 2);
        assert_eq!(
            recorder.error_code(0),
            Some(ExternalErrorCode::UnsupportedState)
        );
    }

    #[test]
    fn test_import_file_logger_target_and_session_reset() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_graph(dir.path(), "broken.json", "{ not json");
        let clean = write_graph(
            dir.path(),
            "clean.json",
            r#"{"name": "ok", "nodes": [
                {"name": "a", "op_type": "Identity", "inputs": ["x"], "outputs": ["y"]}
            ]}"#,
        );

        let logger = Arc::new(MemoryLogger::new());
        let context = ImporterContext::new(Arc::new(MemoryRecorder::new()), logger.clone());
        let importer = GraphImporter::new(&context, BoundaryTarget::Logger);

        let failed = importer.import_file(&broken);
        assert!(failed.graph.is_none());
        assert_eq!(failed.errors.len(), 1);
        assert_eq!(failed.errors[0].code(), ErrorCode::ModelDeserializeFailed);
        assert_eq!(logger.messages()[0].0, Severity::InternalError);

        let succeeded = importer.import_file(&clean);
        assert!(succeeded.errors.is_empty());
        assert_eq!(succeeded.imported_nodes, 1);
    }
}
