//! Resource enumeration - turning located URLs into open roots.

use super::locator::ResourceLocator;
use crate::error::{Result, ScanError};
use classpath_api::Namespace;
use std::fmt;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;
use zip::ZipArchive;

const ARCHIVE_SEPARATOR: &str = "!/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    Archive,
    Filesystem,
}

/// A located container exposing entries for a namespace.
///
/// Archive roots own an open archive handle; dropping the root closes it.
pub enum ResourceRoot {
    Archive {
        origin: Url,
        path: PathBuf,
        archive: ZipArchive<File>,
    },
    Filesystem {
        origin: Url,
        path: PathBuf,
    },
}

impl ResourceRoot {
    pub fn kind(&self) -> RootKind {
        match self {
            ResourceRoot::Archive { .. } => RootKind::Archive,
            ResourceRoot::Filesystem { .. } => RootKind::Filesystem,
        }
    }

    pub fn origin(&self) -> &Url {
        match self {
            ResourceRoot::Archive { origin, .. } | ResourceRoot::Filesystem { origin, .. } => {
                origin
            }
        }
    }

    /// Decoded, canonical path of the archive file or directory.
    pub fn path(&self) -> &Path {
        match self {
            ResourceRoot::Archive { path, .. } | ResourceRoot::Filesystem { path, .. } => path,
        }
    }
}

impl fmt::Debug for ResourceRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRoot")
            .field("kind", &self.kind())
            .field("origin", &self.origin().as_str())
            .field("path", &self.path())
            .finish()
    }
}

/// Every root the locator reports for `namespace`, classified and opened.
///
/// Locations with unsupported schemes or that vanished since lookup are
/// skipped; failing to open an existing archive is an error.
pub fn enumerate_roots<L: ResourceLocator + ?Sized>(
    locator: &L,
    namespace: &Namespace,
) -> Result<Vec<ResourceRoot>> {
    let fragment = namespace.to_path_fragment();
    let mut roots = Vec::new();

    for url in locator.find_resources(&fragment)? {
        if let Some(root) = classify(url)? {
            roots.push(root);
        }
    }

    debug!("Namespace {} exposed by {} root(s)", namespace, roots.len());
    Ok(roots)
}

/// Open a single location according to its scheme.
pub fn classify(url: Url) -> Result<Option<ResourceRoot>> {
    if url.scheme().eq_ignore_ascii_case("jar") {
        open_archive(url)
    } else if url.scheme().eq_ignore_ascii_case("file") {
        let Some(path) = decode_file_url(&url)? else {
            return Ok(None);
        };
        Ok(Some(ResourceRoot::Filesystem { origin: url, path }))
    } else {
        debug!("Skipping resource with unsupported scheme: {}", url);
        Ok(None)
    }
}

fn open_archive(url: Url) -> Result<Option<ResourceRoot>> {
    // jar:<archive-url>!/<entry>
    let location = url.path();
    let archive_location = match location.rfind(ARCHIVE_SEPARATOR) {
        Some(idx) => &location[..idx],
        None => location,
    };

    let archive_url = Url::parse(archive_location)
        .map_err(|_| ScanError::InvalidLocation(url.to_string()))?;
    if !archive_url.scheme().eq_ignore_ascii_case("file") {
        debug!("Skipping archive behind unsupported scheme: {}", url);
        return Ok(None);
    }

    let Some(path) = decode_file_url(&archive_url)? else {
        return Ok(None);
    };

    let file = File::open(&path)?;
    let archive = ZipArchive::new(file).map_err(|e| ScanError::archive(&path, e))?;

    Ok(Some(ResourceRoot::Archive {
        origin: url,
        path,
        archive,
    }))
}

/// Percent-decode and canonicalize a `file:` URL. Missing targets yield `None`.
fn decode_file_url(url: &Url) -> Result<Option<PathBuf>> {
    let path = url
        .to_file_path()
        .map_err(|_| ScanError::InvalidLocation(url.to_string()))?;

    match std::fs::canonicalize(&path) {
        Ok(canonical) => Ok(Some(canonical)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Skipping missing resource location {:?}", path);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
