//! Precondition checks for translation code
//!
//! A failed check raises immediately; accumulation only happens at the
//! enclosing boundary.

use super::codes::ErrorCode;
use super::exception::{throw_status, ImportResult};
use super::status::Status;

/// Minimal view of a graph node needed for failure attribution
pub trait NodeDescriptor {
    fn name(&self) -> &str;
    fn operator(&self) -> &str;
}

impl<T: NodeDescriptor + ?Sized> NodeDescriptor for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn operator(&self) -> &str {
        (**self).operator()
    }
}

/// Raise `status` if `condition` does not hold
pub fn check(condition: bool, status: Status) -> ImportResult<()> {
    if condition {
        Ok(())
    } else {
        throw_status(status)
    }
}

/// Raise a node-attributed status if `condition` does not hold
pub fn check_node<N: NodeDescriptor + ?Sized>(
    condition: bool,
    description: &str,
    node: &N,
    node_index: usize,
    code: ErrorCode,
) -> ImportResult<()> {
    if condition {
        Ok(())
    } else {
        throw_status(node_status(code, description, node, node_index, None))
    }
}

/// Build a status attributed to `node`
pub fn node_status<N: NodeDescriptor + ?Sized>(
    code: ErrorCode,
    description: impl Into<String>,
    node: &N,
    node_index: usize,
    function_name: Option<&str>,
) -> Status {
    Status::for_node(
        code,
        description,
        node_index,
        node.name(),
        node.operator(),
        function_name.unwrap_or_default(),
    )
}

/// Reduce a `type_name` path to the name of the enclosing function
#[doc(hidden)]
pub fn trim_function_path(path: &'static str) -> &'static str {
    let path = path.strip_suffix("::marker").unwrap_or(path);
    path.rsplit("::")
        .find(|segment| *segment != "{{closure}}")
        .unwrap_or(path)
}
