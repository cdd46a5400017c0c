//! Target framework monikers.
//!
//! A [`FrameworkName`] is parsed from either the short folder form
//! (`net451`, `netstandard1.6`, `net40-client`) or the long form
//! (`.NETFramework,Version=v4.5.1,Profile=Client`). It always displays in the
//! long form; [`FrameworkName::short_name`] produces the short one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::identity::{ErrorKind, ValidationError};

/// Known framework families: `(long identifier, short prefix, friendly name, dotted short version)`.
const KNOWN_FRAMEWORKS: &[(&str, &str, &str, bool)] = &[
    (".NETStandard", "netstandard", ".NET Standard", true),
    (".NETCoreApp", "netcoreapp", ".NET Core App", true),
    (".NETPlatform", "dotnet", ".NET Platform", false),
    ("DNXCore", "dnxcore", "DNX Core", false),
    ("DNX", "dnx", "DNX", false),
    (".NETFramework", "net", ".NET Framework", false),
];

// ---------------------------------------------------------------------------
// FrameworkName
// ---------------------------------------------------------------------------

/// A validated target framework moniker.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameworkName {
    identifier: String,
    version: Vec<u32>,
    profile: Option<String>,
}

impl FrameworkName {
    /// Parse a short or long framework moniker.
    ///
    /// # Errors
    /// Returns an error if the moniker has no identifier or its version is
    /// not made of integers.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.contains(',') {
            Self::parse_long(s)
        } else {
            Self::parse_short(s)
        }
    }

    fn fail(value: &str, reason: &str) -> ValidationError {
        ValidationError {
            kind: ErrorKind::Framework,
            value: value.to_owned(),
            reason: reason.to_owned(),
        }
    }

    fn parse_long(s: &str) -> Result<Self, ValidationError> {
        let mut parts = s.split(',').map(str::trim);
        let identifier = parts.next().unwrap_or_default();
        if identifier.is_empty() {
            return Err(Self::fail(s, "missing framework identifier"));
        }

        let mut version = None;
        let mut profile = None;
        for part in parts {
            let Some((key, value)) = part.split_once('=') else {
                return Err(Self::fail(s, "expected key=value after the identifier"));
            };
            match key.trim() {
                k if k.eq_ignore_ascii_case("version") => {
                    let value = value.trim();
                    let value = value
                        .strip_prefix('v')
                        .or_else(|| value.strip_prefix('V'))
                        .unwrap_or(value);
                    version = Some(parse_dotted(s, value)?);
                }
                k if k.eq_ignore_ascii_case("profile") => {
                    profile = Some(value.trim().to_owned()).filter(|p| !p.is_empty());
                }
                _ => return Err(Self::fail(s, "unknown framework name component")),
            }
        }

        let Some(version) = version else {
            return Err(Self::fail(s, "missing Version component"));
        };
        Ok(Self {
            identifier: identifier.to_owned(),
            version,
            profile,
        })
    }

    fn parse_short(s: &str) -> Result<Self, ValidationError> {
        let (body, profile) = match s.split_once('-') {
            Some((body, profile)) if !profile.is_empty() => (body, Some(profile.to_owned())),
            Some(_) => return Err(Self::fail(s, "empty framework profile")),
            None => (s, None),
        };

        let digits_at = body
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| Self::fail(s, "missing framework version"))?;
        let (prefix, raw_version) = body.split_at(digits_at);
        if prefix.is_empty() {
            return Err(Self::fail(s, "missing framework identifier"));
        }

        let version = if raw_version.contains('.') {
            parse_dotted(s, raw_version)?
        } else {
            raw_version
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .ok_or_else(|| Self::fail(s, "version must be made of digits"))
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let identifier = KNOWN_FRAMEWORKS
            .iter()
            .find(|(_, short, _, _)| prefix.eq_ignore_ascii_case(short))
            .map_or_else(|| prefix.to_owned(), |(long, _, _, _)| (*long).to_owned());

        Ok(Self {
            identifier,
            version: pad(version),
            profile: profile.map(|p| capitalize(&p)),
        })
    }

    /// The long-form identifier, e.g. `.NETFramework`.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The framework profile, if any.
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// The version with at least two components, e.g. `4.5.1`.
    #[must_use]
    pub fn version_string(&self) -> String {
        self.version
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    fn known(&self) -> Option<&'static (&'static str, &'static str, &'static str, bool)> {
        KNOWN_FRAMEWORKS
            .iter()
            .find(|(long, _, _, _)| long.eq_ignore_ascii_case(&self.identifier))
    }

    /// The short folder name, e.g. `net451` or `netstandard1.6`.
    #[must_use]
    pub fn short_name(&self) -> String {
        let (prefix, dotted) = self.known().map_or_else(
            || {
                (
                    self.identifier.trim_start_matches('.').to_ascii_lowercase(),
                    false,
                )
            },
            |(_, short, _, dotted)| ((*short).to_owned(), *dotted),
        );

        let version = if dotted || self.version.iter().any(|&c| c > 9) {
            self.version_string()
        } else {
            self.version.iter().map(u32::to_string).collect()
        };

        match &self.profile {
            Some(profile) => format!("{prefix}{version}-{}", profile.to_ascii_lowercase()),
            None => format!("{prefix}{version}"),
        }
    }

    /// A human-readable name, e.g. `.NET Framework 4.5.1`.
    #[must_use]
    pub fn friendly_name(&self) -> String {
        let family = self
            .known()
            .map_or(self.identifier.as_str(), |(_, _, friendly, _)| *friendly);
        match &self.profile {
            Some(profile) => format!("{family} {} {profile} Profile", self.version_string()),
            None => format!("{family} {}", self.version_string()),
        }
    }
}

/// Drop trailing zero components beyond the second: `4.5.0` becomes `4.5`.
fn pad(mut version: Vec<u32>) -> Vec<u32> {
    while version.len() > 2 && version.last() == Some(&0) {
        version.pop();
    }
    while version.len() < 2 {
        version.push(0);
    }
    version
}

fn parse_dotted(original: &str, value: &str) -> Result<Vec<u32>, ValidationError> {
    value
        .split('.')
        .map(|part| {
            part.parse::<u32>().map_err(|_| {
                FrameworkName::fail(original, "version components must be integers")
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(pad)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

impl fmt::Display for FrameworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},Version=v{}", self.identifier, self.version_string())?;
        if let Some(profile) = &self.profile {
            write!(f, ",Profile={profile}")?;
        }
        Ok(())
    }
}

impl FromStr for FrameworkName {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FrameworkName {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FrameworkName> for String {
    fn from(name: FrameworkName) -> Self {
        name.to_string()
    }
}

// ---------------------------------------------------------------------------
// FrameworkData
// ---------------------------------------------------------------------------

/// Serialized view of a [`FrameworkName`] as exposed to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FrameworkData {
    /// Long form, e.g. `.NETFramework,Version=v4.5.1`.
    pub framework_name: String,
    /// Short folder form, e.g. `net451`.
    pub short_name: String,
    /// Human-readable form, e.g. `.NET Framework 4.5.1`.
    pub friendly_name: String,
}

impl From<&FrameworkName> for FrameworkData {
    fn from(name: &FrameworkName) -> Self {
        Self {
            framework_name: name.to_string(),
            short_name: name.short_name(),
            friendly_name: name.friendly_name(),
        }
    }
}
