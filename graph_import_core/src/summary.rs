//! Post-session reporting over the accumulated error list

use crate::error::{format_status, ErrorCategory, ErrorCode, Status};
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals for one import session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub total_errors: usize,
    pub node_errors: usize,
    pub by_code: BTreeMap<ErrorCode, usize>,
    pub by_category: BTreeMap<ErrorCategory, usize>,
}

impl SessionSummary {
    pub fn from_errors(errors: &[Status]) -> Self {
        let mut summary = Self {
            total_errors: errors.len(),
            ..Self::default()
        };

        for status in errors {
            *summary.by_code.entry(status.code()).or_insert(0) += 1;
            *summary
                .by_category
                .entry(status.code().category())
                .or_insert(0) += 1;
            if status.has_node_attribution() {
                summary.node_errors += 1;
            }
        }

        summary
    }

    pub fn is_clean(&self) -> bool {
        self.total_errors == 0
    }

    pub fn count(&self, code: ErrorCode) -> usize {
        self.by_code.get(&code).copied().unwrap_or(0)
    }
}

/// One formatted line per accumulated status
pub fn format_error_lines(errors: &[Status]) -> Vec<String> {
    errors.iter().map(format_status).collect()
}

/// Cargo-style report for the errors of one input
pub fn format_cargo_style(source: &str, errors: &[Status]) -> String {
    let mut output = String::new();
    if errors.is_empty() {
        return output;
    }

    output.push_str(&format!("Checking {}...\n", source));

    for status in errors {
        let location = status
            .location()
            .map(|l| format!(" --> {}:{}", l.file, l.line))
            .unwrap_or_default();

        output.push_str(&format!(
            "error[{}]: {}{}\n",
            status.code().as_str(),
            format_status(status),
            location
        ));

        let metadata = status.code().metadata();
        output.push_str(&format!(
            "  = category: {}, recoverable: {}\n",
            metadata.category, metadata.recoverable
        ));
        if !metadata.recommended_action.is_empty() {
            output.push_str(&format!("  = help: {}\n", metadata.recommended_action));
        }
    }

    output.push_str(&format!(
        "error: could not import `{}` due to {} previous error{}\n",
        source,
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    ));

    output
}

/// Serialize the accumulated statuses as a JSON array
pub fn to_json(errors: &[Status]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(errors)
}
