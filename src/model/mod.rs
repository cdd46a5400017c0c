//! Data model: library identities, graph records, exports, and diagnostics.

pub mod compiler_options;
pub mod diagnostic;
pub mod export;
pub mod framework;
pub mod identity;
pub mod library;

pub use compiler_options::CompilerOptions;
pub use diagnostic::{DiagnosticMessage, Severity, SourceRange};
pub use export::LibraryExport;
pub use framework::{FrameworkData, FrameworkName};
pub use identity::{LibraryIdentity, LibraryKind, SemanticVersion, ValidationError};
pub use library::{LibraryDescription, LibraryRange};
