//! Project context snapshots.
//!
//! Turns a resolved dependency graph into a [`ProjectContextSnapshot`] for one
//! configuration. The pipeline runs in a fixed order, one module per step:
//!
//! - **type_change**: Flag libraries whose kind changed since the search paths
//!   the caller last saw ([`diagnose_type_changes`]).
//! - **diagnostics**: Merge manager diagnostics with type-change diagnostics
//!   and group them by source library ([`DiagnosticIndex`]).
//! - **exports**: Pick one export per library name, letting reference
//!   assemblies shadow packages ([`resolve_exports`]).
//! - **items**: Index libraries as cross-reference items, renaming reference
//!   assemblies into `fx/` ([`DependencyItemIndex`]).
//! - **description**: Build the per-library records.
//! - **build**: Walk the graph once and freeze the result ([`build_snapshot`]).
//!
//! # Determinism guarantee
//!
//! The same graph, configuration, and search paths always produce an equal
//! snapshot:
//!
//! - Source files and file references are deduplicated case-insensitively,
//!   then sorted ordinally.
//! - Project references are sorted by name.
//! - Dependencies are keyed by name in a sorted map.
//! - Diagnostics keep aggregation order: manager diagnostics first.

pub mod build;
pub mod description;
pub mod diagnostics;
pub mod exports;
pub mod items;
pub mod type_change;

pub use build::{ProjectContextSnapshot, build_snapshot};
pub use description::{DependencyDescription, ProjectReferenceDescription};
pub use diagnostics::DiagnosticIndex;
pub use exports::{resolve_exports, supersedes};
pub use items::{DependencyItem, DependencyItemIndex, REFERENCE_ASSEMBLY_PREFIX};
pub use type_change::{TYPE_CHANGED, diagnose_type_changes};

#[cfg(test)]
mod determinism_tests;
