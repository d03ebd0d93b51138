//! Artifact identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque, URL-safe identifier of a synthesized audio artifact.
///
/// Restricted to ASCII letters, digits, `-` and `_` so it can be used
/// verbatim as a file stem and as a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactId(String);

/// A string that cannot be an artifact id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid artifact id '{0}'")]
pub struct InvalidArtifactId(pub String);

impl ArtifactId {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidArtifactId> {
        let value = value.into();
        let valid = !value.is_empty()
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if valid {
            Ok(Self(value))
        } else {
            Err(InvalidArtifactId(value))
        }
    }

    /// Wrap an id produced by one of this crate's generators.
    pub(crate) fn from_generated(value: String) -> Self {
        debug_assert!(Self::new(value.as_str()).is_ok());
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name used in the scratch directory.
    pub fn file_name(&self) -> String {
        format!("{}.mp3", self.0)
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ArtifactId {
    type Err = InvalidArtifactId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ArtifactId {
    type Error = InvalidArtifactId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ArtifactId> for String {
    fn from(id: ArtifactId) -> Self {
        id.0
    }
}
