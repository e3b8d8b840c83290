//! Platform runtime image: locating it and reading class units out of it.
//!
//! Java 9+ ships its platform classes in a jimage (`lib/modules`), Java 8 in
//! `rt.jar`. Both are read lazily, one unit at a time.

use classpath_core::asset::is_archive;
use ristretto_jimage::Image;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use zip::ZipArchive;

pub const JAVA_HOME_ENV: &str = "JAVA_HOME";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Locate the runtime image of the installed JDK, if any.
pub fn find_runtime_image() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os(JAVA_HOME_ENV) {
        if let Some(image) = runtime_image_in(Path::new(&home)) {
            return Some(image);
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = Command::new("/usr/libexec/java_home").output() {
            let home = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if output.status.success() && !home.is_empty() {
                if let Some(image) = runtime_image_in(Path::new(&home)) {
                    return Some(image);
                }
            }
        }
    }

    // `java` reports its settings on stderr
    let output = Command::new("java")
        .args(["-XshowSettings:properties", "-version"])
        .output()
        .ok()?;
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter_map(|line| line.trim().strip_prefix("java.home = "))
        .find_map(|home| runtime_image_in(Path::new(home.trim())))
}

/// Runtime image below a Java home: `lib/modules`, else `rt.jar`.
pub fn runtime_image_in(home: &Path) -> Option<PathBuf> {
    [
        home.join("lib").join("modules"),
        home.join("lib").join("rt.jar"),
        home.join("jre").join("lib").join("rt.jar"),
    ]
    .into_iter()
    .find(|candidate| candidate.is_file())
}

/// An opened runtime image.
pub enum RuntimeImage {
    Modules(Image),
    Archive(ZipArchive<File>),
}

impl RuntimeImage {
    pub fn open(path: &Path) -> Result<Self, BoxError> {
        debug!("Opening runtime image {}", path.display());
        if is_archive(path) {
            Ok(Self::Archive(ZipArchive::new(File::open(path)?)?))
        } else {
            Ok(Self::Modules(Image::from_file(path)?))
        }
    }

    /// Bytes of `unit` (e.g. `java/lang/Runnable.class`), searching every module.
    pub fn read_unit(&mut self, unit: &str) -> Result<Option<Vec<u8>>, BoxError> {
        match self {
            Self::Archive(archive) => {
                let mut entry = match archive.by_name(unit) {
                    Ok(entry) => entry,
                    Err(zip::result::ZipError::FileNotFound) => return Ok(None),
                    Err(e) => return Err(e.into()),
                };
                let mut bytes = Vec::new();
                entry.read_to_end(&mut bytes)?;
                Ok(Some(bytes))
            }
            Self::Modules(image) => {
                // Resources are named `/<module>/<unit>`
                let in_module = format!("/{unit}");
                for resource in image.iter().flatten() {
                    let name = resource.name();
                    if name == unit || name.ends_with(&in_module) {
                        return Ok(Some(resource.data().to_vec()));
                    }
                }
                Ok(None)
            }
        }
    }
}
