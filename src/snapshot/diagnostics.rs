//! Diagnostic aggregation.
//!
//! Concatenates the library manager's diagnostics with the type-change
//! detector's and groups the result by the library each message concerns.
//! A library is matched by name alone; the version and kind recorded on a
//! message's source may differ from the graph's.
//! Nothing is deduplicated: a message reported by both producers appears
//! twice, manager copy first.

use std::collections::HashMap;

use crate::model::{DiagnosticMessage, LibraryIdentity};

/// All diagnostics for one snapshot, grouped by source library.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticIndex {
    all: Vec<DiagnosticMessage>,
    by_source: HashMap<String, Vec<DiagnosticMessage>>,
}

impl DiagnosticIndex {
    /// Build the index. `manager` messages precede `type_changes` messages
    /// both in [`all`](Self::all) and within each library's group.
    #[must_use]
    pub fn new(manager: Vec<DiagnosticMessage>, type_changes: Vec<DiagnosticMessage>) -> Self {
        let mut all = manager;
        all.extend(type_changes);

        let mut by_source: HashMap<String, Vec<DiagnosticMessage>> = HashMap::new();
        for message in &all {
            if let Some(source) = &message.source {
                by_source
                    .entry(source.name.clone())
                    .or_default()
                    .push(message.clone());
            }
        }

        Self { all, by_source }
    }

    /// Messages attributed to any library named like `library`, in
    /// concatenation order.
    #[must_use]
    pub fn for_library(&self, library: &LibraryIdentity) -> &[DiagnosticMessage] {
        self.by_source.get(&library.name).map_or(&[], Vec::as_slice)
    }

    /// Every message, attributed or not.
    #[must_use]
    pub fn all(&self) -> &[DiagnosticMessage] {
        &self.all
    }

    /// Consume the index, returning every message.
    #[must_use]
    pub fn into_all(self) -> Vec<DiagnosticMessage> {
        self.all
    }
}
