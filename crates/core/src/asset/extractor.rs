//! Name extraction - deriving candidate type names from a root's entries.
//!
//! Both root kinds apply the same admission rules:
//! 1. The unit must carry the compiled suffix and live under the namespace.
//! 2. Units whose trailing nested segment is empty or numeric are synthetic
//!    and skipped; scanning continues with the next entry.
//! 3. Package and module descriptor units are skipped when configured.

use super::enumerator::ResourceRoot;
use crate::config::{DEFAULT_COMPILED_SUFFIX, ScanConfig};
use crate::error::Result;
use classpath_api::{CandidateName, Namespace, PATH_SEPARATOR};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Component, Path};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

const DESCRIPTOR_UNITS: [&str; 2] = ["package-info", "module-info"];

/// Names found in one or more roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedNames {
    pub names: BTreeSet<CandidateName>,
    /// Units skipped as anonymous/synthetic.
    pub synthetic: usize,
}

impl ExtractedNames {
    /// Union `other` into `self`.
    pub fn merge(&mut self, other: ExtractedNames) {
        self.names.extend(other.names);
        self.synthetic += other.synthetic;
    }
}

#[derive(Debug, Clone)]
pub struct NameExtractor {
    suffix: String,
    follow_links: bool,
    skip_descriptor_units: bool,
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_COMPILED_SUFFIX.to_string(),
            follow_links: true,
            skip_descriptor_units: true,
        }
    }
}

impl NameExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            suffix: config.compiled_suffix.clone(),
            follow_links: config.follow_links,
            skip_descriptor_units: config.skip_descriptor_units,
        }
    }

    /// Extract every candidate name under `namespace` from `root`.
    ///
    /// Consumes the root so archive handles are released on return, whether
    /// or not extraction succeeded.
    pub fn extract_names(&self, root: ResourceRoot, namespace: &Namespace) -> Result<ExtractedNames> {
        match root {
            ResourceRoot::Archive { archive, path, .. } => {
                debug!("Extracting names from archive {:?}", path);
                Ok(self.extract_from_archive(&archive, namespace))
            }
            ResourceRoot::Filesystem { path, .. } => {
                debug!("Extracting names from directory {:?}", path);
                self.extract_from_directory(&path, namespace)
            }
        }
    }

    fn extract_from_archive(&self, archive: &ZipArchive<File>, namespace: &Namespace) -> ExtractedNames {
        let prefix = format!("{}{}", namespace.to_path_fragment(), PATH_SEPARATOR);
        let mut extracted = ExtractedNames::default();

        for entry in archive.file_names() {
            if !entry.starts_with(&prefix) {
                continue;
            }
            let Some(unit_path) = entry.strip_suffix(self.suffix.as_str()) else {
                continue;
            };
            self.admit(unit_path, entry, &mut extracted);
        }

        extracted
    }

    fn extract_from_directory(&self, root: &Path, namespace: &Namespace) -> Result<ExtractedNames> {
        let mut extracted = ExtractedNames::default();
        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.loop_ancestor().is_some() => {
                    warn!("Skipping symlink loop: {}", e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            // Without link following a linked unit reports as a symlink
            let is_unit_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_unit_file {
                continue;
            }

            let file = entry.path();
            let Some(unit_path) = self.unit_path_for_file(root, file, namespace) else {
                trace!("Ignoring {:?}", file);
                continue;
            };
            self.admit(&unit_path, &file.to_string_lossy(), &mut extracted);
        }

        Ok(extracted)
    }

    /// Slash-separated unit path (suffix stripped) for a file under `root`.
    ///
    /// When `root` is the namespace directory itself, the name is the
    /// namespace followed by the path below it. Otherwise the path is
    /// truncated to begin at the first run of components spelling the
    /// namespace.
    fn unit_path_for_file(&self, root: &Path, file: &Path, namespace: &Namespace) -> Option<String> {
        let file_name = file.file_name()?.to_str()?;
        let stem = file_name.strip_suffix(self.suffix.as_str())?;
        if stem.is_empty() {
            return None;
        }

        let fragment = namespace.to_path_fragment();
        let namespace_segments: Vec<&str> = fragment.split(PATH_SEPARATOR).collect();

        let parent = file.parent()?;
        let mut segments: Vec<&str> = if root.ends_with(&fragment) && parent.starts_with(root) {
            let below = parent.strip_prefix(root).ok()?;
            let mut segments = namespace_segments.clone();
            segments.extend(normal_components(below)?);
            segments
        } else {
            let components = normal_components(parent)?;
            let start = components
                .windows(namespace_segments.len())
                .position(|window| window == namespace_segments.as_slice())?;
            components[start..].to_vec()
        };

        segments.push(stem);
        Some(segments.join(&PATH_SEPARATOR.to_string()))
    }

    fn admit(&self, unit_path: &str, entry: &str, extracted: &mut ExtractedNames) {
        let candidate = CandidateName::from_unit_path(unit_path, entry);
        let simple = candidate.simple_binary_name();

        if simple.is_empty() {
            return;
        }
        if candidate.is_synthetic() {
            trace!("Excluding synthetic unit {}", entry);
            extracted.synthetic += 1;
            return;
        }
        if self.skip_descriptor_units && DESCRIPTOR_UNITS.contains(&simple) {
            trace!("Excluding descriptor unit {}", entry);
            return;
        }

        extracted.names.insert(candidate);
    }
}

/// Normal path components as UTF-8 strings; `None` if any is not UTF-8.
fn normal_components(path: &Path) -> Option<Vec<&str>> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect()
}
