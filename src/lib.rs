//! depsnap library crate.
//!
//! Builds a [`ProjectContextSnapshot`](snapshot::ProjectContextSnapshot) from
//! a resolved dependency graph: the consolidated view of one project, one
//! target framework, and one build configuration that editor tooling consumes.
//! The `depsnap` binary is a thin wrapper over [`snapshot::build_snapshot`].

pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod snapshot;
pub mod telemetry;

pub use error::LoadError;
pub use graph::{DependencyContext, ProjectLocator, ResolvedGraph};
pub use snapshot::{ProjectContextSnapshot, build_snapshot};
