//! Resource locators - the host seam that answers "which roots expose this
//! namespace?".

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;
use zip::ZipArchive;

/// Enumerates resource locations for a slash-delimited namespace fragment.
///
/// Each returned URL denotes one root exposing the fragment, e.g.
/// `file:///app/classes/com/acme/` or `jar:file:///app/lib/a.jar!/com/acme`.
pub trait ResourceLocator {
    fn find_resources(&self, fragment: &str) -> Result<Vec<Url>>;
}

impl<L: ResourceLocator + ?Sized> ResourceLocator for &L {
    fn find_resources(&self, fragment: &str) -> Result<Vec<Url>> {
        (**self).find_resources(fragment)
    }
}

/// A fixed list of root locations, searched in order.
#[derive(Debug, Clone, Default)]
pub struct LookupPath {
    entries: Vec<String>,
}

impl LookupPath {
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.lookup_path.iter().cloned())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn directory_resource(dir: &Path, fragment: &str) -> Result<Option<Url>> {
        let candidate = dir.join(fragment);
        if !candidate.is_dir() {
            return Ok(None);
        }
        let canonical = std::fs::canonicalize(&candidate)?;
        let url = Url::from_directory_path(&canonical)
            .map_err(|_| ScanError::InvalidLocation(canonical.display().to_string()))?;
        Ok(Some(url))
    }

    fn archive_resource(archive_path: &Path, fragment: &str) -> Result<Option<Url>> {
        let file = File::open(archive_path)?;
        let archive =
            ZipArchive::new(file).map_err(|e| ScanError::archive(archive_path, e))?;

        let prefix = format!("{fragment}/");
        if !archive.file_names().any(|name| name.starts_with(&prefix)) {
            return Ok(None);
        }

        let canonical = std::fs::canonicalize(archive_path)?;
        let file_url = Url::from_file_path(&canonical)
            .map_err(|_| ScanError::InvalidLocation(canonical.display().to_string()))?;
        let url = Url::parse(&format!("jar:{file_url}!/{fragment}"))
            .map_err(|_| ScanError::InvalidLocation(file_url.to_string()))?;
        Ok(Some(url))
    }
}

/// Map a lookup entry to a local path, or `None` if it names a non-file URL.
pub fn entry_path(entry: &str) -> Result<Option<PathBuf>> {
    match Url::parse(entry) {
        // Single-letter schemes are Windows drive letters, not URLs.
        Ok(url) if url.scheme().len() > 1 => {
            if url.scheme() == "file" {
                let path = url
                    .to_file_path()
                    .map_err(|_| ScanError::InvalidLocation(entry.to_string()))?;
                Ok(Some(path))
            } else {
                Ok(None)
            }
        }
        _ => Ok(Some(PathBuf::from(entry))),
    }
}

/// Whether a path looks like a class archive.
pub fn is_archive(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    ext == "jar" || ext == "zip"
}

impl ResourceLocator for LookupPath {
    fn find_resources(&self, fragment: &str) -> Result<Vec<Url>> {
        let mut found = Vec::new();

        for entry in &self.entries {
            let Some(path) = entry_path(entry)? else {
                // Foreign schemes are handed on; the enumerator decides.
                if let Ok(url) = Url::parse(entry) {
                    found.push(url);
                }
                continue;
            };

            let resource = if path.is_dir() {
                Self::directory_resource(&path, fragment)?
            } else if path.is_file() && is_archive(&path) {
                Self::archive_resource(&path, fragment)?
            } else {
                debug!("Skipping lookup entry {:?}: not a directory or archive", path);
                None
            };

            found.extend(resource);
        }

        Ok(found)
    }
}
