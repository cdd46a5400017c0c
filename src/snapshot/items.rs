//! Dependency item index.
//!
//! Cross-references between dependency descriptions use [`DependencyItem`]s.
//! Reference assemblies are renamed into the `fx/` namespace so a framework
//! assembly and a package of the same name stay distinguishable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{LibraryDescription, LibraryIdentity, LibraryKind, LibraryRange};

/// Prefix for reference-assembly display names.
pub const REFERENCE_ASSEMBLY_PREFIX: &str = "fx/";

/// A lightweight name/version pair used for cross-references.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DependencyItem {
    /// Display name, `fx/`-prefixed for reference assemblies.
    pub name: String,
    /// Version display string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Name under which `identity` appears in cross-references.
#[must_use]
pub fn display_name(identity: &LibraryIdentity) -> String {
    match identity.kind {
        LibraryKind::ReferenceAssembly => format!("{REFERENCE_ASSEMBLY_PREFIX}{}", identity.name),
        LibraryKind::Package
        | LibraryKind::Project
        | LibraryKind::MsBuildProject
        | LibraryKind::Unresolved => identity.name.clone(),
    }
}

/// Library name → [`DependencyItem`], built once per snapshot.
#[derive(Clone, Debug, Default)]
pub struct DependencyItemIndex {
    items: HashMap<String, DependencyItem>,
}

impl DependencyItemIndex {
    /// Index every library. A repeated name keeps its last entry.
    pub fn build<'a, I>(libraries: I) -> Self
    where
        I: IntoIterator<Item = &'a LibraryDescription>,
    {
        let items = libraries
            .into_iter()
            .map(|library| {
                let identity = &library.identity;
                (
                    identity.name.clone(),
                    DependencyItem {
                        name: display_name(identity),
                        version: identity.version.as_ref().map(ToString::to_string),
                    },
                )
            })
            .collect();
        Self { items }
    }

    /// The indexed item for a library name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DependencyItem> {
        self.items.get(name)
    }

    /// The item a declared edge points at.
    ///
    /// Edges to libraries missing from the graph fall back to the edge's own
    /// name and version range.
    #[must_use]
    pub fn item_for(&self, range: &LibraryRange) -> DependencyItem {
        self.get(&range.name).cloned().unwrap_or_else(|| DependencyItem {
            name: range.name.clone(),
            version: range.version_range.clone(),
        })
    }
}
