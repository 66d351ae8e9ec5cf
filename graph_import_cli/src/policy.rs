//! Session success policy

use graph_import_core::{ErrorCode, Status};
use std::collections::BTreeSet;

/// Decides whether a session succeeded from its accumulated errors
///
/// A session succeeds when every accumulated code is allow-listed, so an
/// empty allow-list means the error list must be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    allowed: BTreeSet<ErrorCode>,
}

impl SessionPolicy {
    pub fn new(allowed: impl IntoIterator<Item = ErrorCode>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Nothing tolerated
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn allows(&self, code: ErrorCode) -> bool {
        self.allowed.contains(&code)
    }

    pub fn succeeded(&self, errors: &[Status]) -> bool {
        errors.iter().all(|status| self.allows(status.code()))
    }

    /// Errors that make the session fail
    pub fn blocking<'a>(&self, errors: &'a [Status]) -> Vec<&'a Status> {
        errors
            .iter()
            .filter(|status| !self.allows(status.code()))
            .collect()
    }
}
