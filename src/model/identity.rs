//! Library identity types.
//!
//! Foundation types for the dependency graph: library kinds, validated
//! NuGet-style semantic versions, and the [`LibraryIdentity`] triple that every
//! other record hangs off.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LibraryKind
// ---------------------------------------------------------------------------

/// What sort of library a graph node is.
///
/// This is a closed set. Code that needs to special-case a kind matches on it
/// exhaustively so that adding a kind forces every such site to be revisited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LibraryKind {
    /// A package restored from a feed.
    Package,
    /// A sibling project in the same solution graph.
    Project,
    /// A project described by an external MSBuild file.
    #[serde(rename = "MSBuildProject")]
    MsBuildProject,
    /// A framework-provided (system) reference assembly.
    ReferenceAssembly,
    /// A declared dependency that could not be resolved.
    Unresolved,
}

impl LibraryKind {
    /// Returns `true` for framework-provided reference assemblies.
    #[must_use]
    pub const fn is_reference_assembly(self) -> bool {
        matches!(self, Self::ReferenceAssembly)
    }

    /// The wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Package => "Package",
            Self::Project => "Project",
            Self::MsBuildProject => "MSBuildProject",
            Self::ReferenceAssembly => "ReferenceAssembly",
            Self::Unresolved => "Unresolved",
        }
    }
}

impl fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SemanticVersion
// ---------------------------------------------------------------------------

/// A validated NuGet-flavoured semantic version.
///
/// Accepts `major[.minor[.patch[.revision]]][-release][+metadata]`. Missing
/// `minor`/`patch` components default to zero; the optional fourth
/// `revision` component is kept only when it was written. Display always
/// produces the normalized form, so `"1.2"` displays as `1.2.0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    revision: Option<u64>,
    release: Option<String>,
    metadata: Option<String>,
}

impl SemanticVersion {
    /// Create a release version from its three numeric components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            revision: None,
            release: None,
            metadata: None,
        }
    }

    /// Parse a version string, validating its format.
    ///
    /// # Errors
    /// Returns an error if the numeric part is missing, has more than four
    /// components, or any label contains characters outside `[0-9A-Za-z-.]`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let fail = |reason: &str| ValidationError {
            kind: ErrorKind::Version,
            value: s.to_owned(),
            reason: reason.to_owned(),
        };

        let (rest, metadata) = match s.split_once('+') {
            Some((rest, meta)) => (rest, Some(meta)),
            None => (s, None),
        };
        let (numbers, release) = match rest.split_once('-') {
            Some((numbers, release)) => (numbers, Some(release)),
            None => (rest, None),
        };

        if numbers.is_empty() {
            return Err(fail("missing numeric version"));
        }
        let parts = numbers
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                    return Err(fail("version components must be non-negative integers"));
                }
                part.parse::<u64>()
                    .map_err(|_| fail("version component is out of range"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if parts.len() > 4 {
            return Err(fail("at most four numeric components are allowed"));
        }

        for label in [release, metadata].into_iter().flatten() {
            if !is_valid_label(label) {
                return Err(fail(
                    "labels must be non-empty dot-separated runs of [0-9A-Za-z-]",
                ));
            }
        }

        Ok(Self {
            major: parts[0],
            minor: parts.get(1).copied().unwrap_or(0),
            patch: parts.get(2).copied().unwrap_or(0),
            revision: parts.get(3).copied(),
            release: release.map(str::to_owned),
            metadata: metadata.map(str::to_owned),
        })
    }
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Compare two pre-release labels segment by segment.
///
/// Numeric segments sort before alphanumeric ones and compare numerically;
/// alphanumeric segments compare case-insensitively. A label that is a prefix
/// of the other sorts first.
fn compare_release(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.revision.unwrap_or(0))
            .cmp(&(
                other.major,
                other.minor,
                other.patch,
                other.revision.unwrap_or(0),
            ))
            .then_with(|| match (&self.release, &other.release) {
                (None, None) => Ordering::Equal,
                // A release sorts after all of its pre-releases.
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => compare_release(a, b).then_with(|| a.cmp(b)),
            })
            .then_with(|| self.revision.is_some().cmp(&other.revision.is_some()))
            .then_with(|| self.metadata.cmp(&other.metadata))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(revision) = self.revision {
            write!(f, ".{revision}")?;
        }
        if let Some(release) = &self.release {
            write!(f, "-{release}")?;
        }
        if let Some(metadata) = &self.metadata {
            write!(f, "+{metadata}")?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SemanticVersion> for String {
    fn from(version: SemanticVersion) -> Self {
        version.to_string()
    }
}

// ---------------------------------------------------------------------------
// LibraryIdentity
// ---------------------------------------------------------------------------

/// Name, version, and kind of one library in the graph.
///
/// Two identities denote the same library when their names match exactly;
/// version and kind may differ between exports of the same library while
/// they are being resolved. Lookups keyed by library therefore key by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LibraryIdentity {
    /// Library name. Case-sensitive.
    pub name: String,
    /// Resolved version, if the library has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<SemanticVersion>,
    /// Library kind.
    pub kind: LibraryKind,
}

impl LibraryIdentity {
    /// Create a new identity.
    pub fn new(name: impl Into<String>, version: Option<SemanticVersion>, kind: LibraryKind) -> Self {
        Self {
            name: name.into(),
            version,
            kind,
        }
    }
}

impl fmt::Display for LibraryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {} ({})", self.name, version, self.kind),
            None => write!(f, "{} ({})", self.name, self.kind),
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// What kind of value failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A [`SemanticVersion`] string.
    Version,
    /// A target framework moniker.
    Framework,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version => write!(f, "version"),
            Self::Framework => write!(f, "framework"),
        }
    }
}

/// A model value failed validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}: {reason}")]
pub struct ValidationError {
    /// What kind of value was being validated.
    pub kind: ErrorKind,
    /// The invalid value.
    pub value: String,
    /// Human-readable explanation.
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
