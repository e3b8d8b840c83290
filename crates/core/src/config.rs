use serde::{Deserialize, Serialize};
use std::ffi::OsString;

/// Environment variable read by [`ScanConfig::from_env`].
pub const CLASSPATH_ENV: &str = "CLASSPATH";

pub const DEFAULT_COMPILED_SUFFIX: &str = ".class";

/// Explicit lookup context for a discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Root locations: directories, archives, or `file:` / `jar:` URLs.
    pub lookup_path: Vec<String>,
    /// Suffix of compiled-unit files.
    pub compiled_suffix: String,
    /// Follow symlinks while descending filesystem roots.
    pub follow_links: bool,
    /// Skip `package-info` and `module-info` units.
    pub skip_descriptor_units: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lookup_path: Vec::new(),
            compiled_suffix: DEFAULT_COMPILED_SUFFIX.to_string(),
            follow_links: true,
            skip_descriptor_units: true,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the lookup path from `CLASSPATH`.
    pub fn from_env() -> Self {
        Self::from_classpath(std::env::var_os(CLASSPATH_ENV))
    }

    /// Build a config from a platform path list (`a.jar:classes` on Unix).
    pub fn from_classpath(value: Option<OsString>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        let lookup_path = std::env::split_paths(&value)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_string_lossy().into_owned())
            .collect();

        Self {
            lookup_path,
            ..Self::default()
        }
    }

    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.lookup_path.push(entry.into());
        self
    }

    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lookup_path.extend(entries.into_iter().map(Into::into));
        self
    }
}
