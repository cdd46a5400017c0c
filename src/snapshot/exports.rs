//! Export resolution.
//!
//! The exporter may offer several exports under one library name. The
//! interesting case is a framework reference assembly shadowing a package of
//! the same name (a polyfill the framework now ships). Resolution keeps one
//! export per name according to [`supersedes`].

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::model::LibraryExport;

/// Whether `candidate` replaces `current` as the export for their shared name.
///
/// A reference assembly is never displaced by a non-reference export.
/// Otherwise the later export (`candidate`) wins.
#[must_use]
pub const fn supersedes(current: &LibraryExport, candidate: &LibraryExport) -> bool {
    !current.library.kind.is_reference_assembly() || candidate.library.kind.is_reference_assembly()
}

/// Pick one authoritative export per library name.
///
/// Two non-reference exports for one name should not come out of a resolved
/// graph; when they do, the later one wins and a warning is logged.
pub fn resolve_exports<I>(exports: I) -> BTreeMap<String, LibraryExport>
where
    I: IntoIterator<Item = LibraryExport>,
{
    let mut resolved: BTreeMap<String, LibraryExport> = BTreeMap::new();

    for candidate in exports {
        let Some(current) = resolved.get(candidate.name()) else {
            resolved.insert(candidate.name().to_owned(), candidate);
            continue;
        };

        let current_is_fx = current.library.kind.is_reference_assembly();
        let candidate_is_fx = candidate.library.kind.is_reference_assembly();
        if !current_is_fx && !candidate_is_fx {
            warn!(
                library = candidate.name(),
                kept = %candidate.library,
                dropped = %current.library,
                "two non-reference exports share a library name"
            );
        }

        if supersedes(current, &candidate) {
            if candidate_is_fx && !current_is_fx {
                debug!(
                    library = candidate.name(),
                    shadowed = %current.library,
                    "reference assembly overrides export"
                );
            }
            resolved.insert(candidate.name().to_owned(), candidate);
        } else {
            debug!(
                library = candidate.name(),
                ignored = %candidate.library,
                "export shadowed by reference assembly"
            );
        }
    }

    resolved
}
