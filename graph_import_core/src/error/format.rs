//! Message template for import failures
//!
//! Log scrapers depend on this exact layout:
//!
//! ```text
//! In node {index} with name: {name} and operator: {operator} ({function}): {CODE}: {description}
//! ```
//!
//! Only deserialize and refit failures drop the node prefix. A status without
//! node attribution still gets it, with index `-1` and empty name and operator.

use super::status::Status;

/// Index printed for statuses raised outside any node
pub const UNATTRIBUTED_NODE: i64 = -1;

pub fn format_status(status: &Status) -> String {
    let error_info = format!(
        "({}): {}: {}",
        status.function_name().unwrap_or_default(),
        status.code().as_str(),
        status.description()
    );

    if !status.code().carries_node_prefix() {
        return error_info;
    }

    format!(
        "In node {} with name: {} and operator: {} {}",
        status
            .node_index()
            .map_or_else(|| UNATTRIBUTED_NODE.to_string(), |index| index.to_string()),
        status.node_name().unwrap_or_default(),
        status.node_operator().unwrap_or_default(),
        error_info
    )
}
