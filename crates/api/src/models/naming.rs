use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between namespace segments and between a namespace and a type.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Separator used inside resource locations (archive entries, URL paths).
pub const PATH_SEPARATOR: char = '/';

/// Separator between an enclosing type and a nested type in binary names.
pub const NESTED_SEPARATOR: char = '$';

/// A dot-delimited hierarchical identifier such as `com.acme.plugins`.
///
/// Always non-empty and made of non-empty segments, so it converts losslessly
/// to a slash-delimited path fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Parse a namespace, returning `None` for empty or malformed input.
    ///
    /// # Examples
    /// ```ignore
    /// Namespace::parse("com.acme") => Some(..)
    /// Namespace::parse("") => None
    /// Namespace::parse("com..acme") => None
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.split(NAMESPACE_SEPARATOR).any(|segment| segment.is_empty()) {
            return None;
        }
        if raw.contains(PATH_SEPARATOR) || raw.contains('\\') {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `com.acme.plugins` => `com/acme/plugins`
    pub fn to_path_fragment(&self) -> String {
        self.0.replace(NAMESPACE_SEPARATOR, &PATH_SEPARATOR.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Namespace {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid namespace: {value:?}"))
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.0
    }
}

/// A fully-qualified type name derived from a compiled-unit location.
///
/// Keeps three views of the same unit:
/// - `canonical`: `com.acme.Outer.Inner`
/// - `binary`: `com.acme.Outer$Inner` (what a loader looks up)
/// - `entry`: the originating archive entry or file path, for diagnostics
///
/// Identity, ordering and hashing use the binary name only, so the same unit
/// found under two roots collapses to one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateName {
    canonical: String,
    binary: String,
    entry: String,
}

impl CandidateName {
    /// Build a candidate from a slash-separated unit path with the compiled
    /// suffix already removed, e.g. `com/acme/Outer$Inner`.
    pub fn from_unit_path(unit_path: &str, entry: impl Into<String>) -> Self {
        let binary = unit_path.replace(PATH_SEPARATOR, &NAMESPACE_SEPARATOR.to_string());
        let canonical = binary.replace(NESTED_SEPARATOR, &NAMESPACE_SEPARATOR.to_string());
        Self {
            canonical,
            binary,
            entry: entry.into(),
        }
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// The unqualified binary name, e.g. `Outer$Inner`.
    pub fn simple_binary_name(&self) -> &str {
        self.binary
            .rsplit(NAMESPACE_SEPARATOR)
            .next()
            .unwrap_or(&self.binary)
    }

    /// The segment after the last nested separator, if the unit is nested.
    ///
    /// `Outer$1` => `Some("1")`, `Outer$Inner` => `Some("Inner")`, `Outer` => `None`
    pub fn trailing_nested_segment(&self) -> Option<&str> {
        let simple = self.simple_binary_name();
        simple
            .rfind(NESTED_SEPARATOR)
            .map(|pos| &simple[pos + NESTED_SEPARATOR.len_utf8()..])
    }

    /// Compiler-generated anonymous units end in an empty or purely numeric
    /// nested segment.
    pub fn is_synthetic(&self) -> bool {
        self.trailing_nested_segment()
            .is_some_and(|segment| segment.chars().all(|c| c.is_ascii_digit()))
    }
}

impl PartialEq for CandidateName {
    fn eq(&self, other: &Self) -> bool {
        self.binary == other.binary
    }
}

impl Eq for CandidateName {}

impl Hash for CandidateName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.binary.hash(state);
    }
}

impl PartialOrd for CandidateName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.binary.cmp(&other.binary)
    }
}

impl fmt::Display for CandidateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}
