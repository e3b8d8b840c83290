//! Class-file loader backing the JVM host.
//!
//! Loads compiled units from the lookup path and links their superclass and
//! interface references, the way a class loader defines a class.

use crate::jdk::{RuntimeImage, find_runtime_image};
use crate::model::{JavaClass, JavaType};
use classpath_api::{CandidateName, ResolveError, ResolveResult, TypeResolver};
use classpath_core::ScanConfig;
use classpath_core::asset::{entry_path, is_archive};
use classpath_core::config::DEFAULT_COMPILED_SUFFIX;
use ristretto_classfile::attributes::{Attribute, NestedClassAccessFlags};
use ristretto_classfile::{ClassAccessFlags, ClassFile};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use zip::ZipArchive;

/// Root of the class hierarchy; linked as "no superclass".
pub const OBJECT_CLASS: &str = "java.lang.Object";

/// Namespaces served by the platform when absent from the lookup path.
pub const PLATFORM_PREFIXES: [&str; 4] = ["java.", "javax.", "jdk.", "sun."];

/// Loads and links class files from a fixed lookup path.
///
/// Acts as the host type registry: each binary name is defined at most once
/// per loader, and later lookups return the same [`JavaType`].
///
/// Platform names are delegated to the runtime image first, the way the
/// bootstrap loader sees them before the lookup path does.
pub struct ClassFileLoader {
    entries: Vec<PathBuf>,
    suffix: String,
    platform_prefixes: Vec<String>,
    runtime_path: Option<PathBuf>,
    runtime: RefCell<Option<RuntimeImage>>,
    defined: RefCell<HashMap<String, JavaType>>,
    archives: RefCell<HashMap<PathBuf, ZipArchive<File>>>,
}

impl ClassFileLoader {
    pub fn new(entries: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            suffix: DEFAULT_COMPILED_SUFFIX.to_string(),
            platform_prefixes: PLATFORM_PREFIXES.iter().map(|p| p.to_string()).collect(),
            runtime_path: None,
            runtime: RefCell::new(None),
            defined: RefCell::new(HashMap::new()),
            archives: RefCell::new(HashMap::new()),
        }
    }

    /// Loader over the same lookup path a scanner would use.
    ///
    /// Entries that are not local paths (foreign URL schemes) are ignored.
    pub fn from_config(config: &ScanConfig) -> Self {
        let entries = config
            .lookup_path
            .iter()
            .filter_map(|entry| entry_path(entry).ok().flatten());
        let mut loader = Self::new(entries);
        loader.suffix = config.compiled_suffix.clone();
        loader
    }

    /// Replace the namespaces treated as platform-provided
    pub fn with_platform_prefixes(
        mut self,
        prefixes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.platform_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Read platform types from a runtime image (`lib/modules` or `rt.jar`).
    pub fn with_runtime_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.runtime_path = Some(path.into());
        self.runtime = RefCell::new(None);
        self
    }

    /// Read platform types from the installed JDK, when one is found.
    pub fn with_detected_runtime(self) -> Self {
        match find_runtime_image() {
            Some(path) => self.with_runtime_image(path),
            None => {
                warn!("No runtime image found; platform types stay opaque");
                self
            }
        }
    }

    pub fn runtime_image(&self) -> Option<&Path> {
        self.runtime_path.as_deref()
    }

    /// Load a type by binary name, e.g. `com.acme.Outer$Inner`.
    pub fn load_type(&self, binary_name: &str) -> ResolveResult<JavaType> {
        let mut linking = Vec::new();
        self.load(binary_name, false, &mut linking)
    }

    /// Number of types defined so far.
    pub fn defined_count(&self) -> usize {
        self.defined.borrow().len()
    }

    fn is_platform_name(&self, name: &str) -> bool {
        self.platform_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    /// `as_interface` is how the referrer names this type; it only shapes
    /// the opaque stand-in for a platform type nobody can read.
    fn load(
        &self,
        name: &str,
        as_interface: bool,
        linking: &mut Vec<String>,
    ) -> ResolveResult<JavaType> {
        if let Some(ty) = self.defined.borrow().get(name) {
            return Ok(ty.clone());
        }
        if linking.iter().any(|n| n == name) {
            return Err(ResolveError::Circularity(name.to_string()));
        }

        let platform = self.is_platform_name(name);
        let from_runtime = if platform {
            self.read_runtime_unit(name)?
        } else {
            None
        };
        let bytes = match from_runtime {
            Some(bytes) => Some(bytes),
            None => self.read_unit(name)?,
        };
        let Some(bytes) = bytes else {
            if platform {
                trace!("Using opaque platform type for {}", name);
                let ty = JavaType::platform(name, as_interface);
                self.define(name, ty.clone());
                return Ok(ty);
            }
            return Err(ResolveError::NotFound(name.to_string()));
        };

        let class =
            ClassFile::from_bytes(&mut Cursor::new(bytes)).map_err(|e| malformed(name, e))?;

        let own_name = class
            .class_name()
            .map_err(|e| malformed(name, e))?
            .replace('/', ".");
        if own_name != name {
            return Err(ResolveError::Linkage {
                name: name.to_string(),
                reason: format!("wrong name: {own_name}"),
            });
        }

        linking.push(name.to_string());
        let linked = self.link(name, &class, platform, linking);
        linking.pop();

        let ty = linked?;
        self.define(name, ty.clone());
        debug!("Defined {}", name);
        Ok(ty)
    }

    fn define(&self, name: &str, ty: JavaType) {
        self.defined.borrow_mut().insert(name.to_string(), ty);
    }

    fn link(
        &self,
        name: &str,
        class: &ClassFile,
        is_platform: bool,
        linking: &mut Vec<String>,
    ) -> ResolveResult<JavaType> {
        let is_interface = class.access_flags.contains(ClassAccessFlags::INTERFACE);
        let is_abstract = class.access_flags.contains(ClassAccessFlags::ABSTRACT);

        let superclass = if class.super_class == 0 {
            None
        } else {
            let super_name = class_ref(class, class.super_class, name)?;
            // Interfaces name Object as their superclass; neither is an ancestor.
            if is_interface || super_name == OBJECT_CLASS {
                None
            } else {
                Some(self.load_dependency(name, &super_name, false, linking)?)
            }
        };

        let mut interfaces = Vec::with_capacity(class.interfaces.len());
        for index in &class.interfaces {
            let iface_name = class_ref(class, *index, name)?;
            interfaces.push(self.load_dependency(name, &iface_name, true, linking)?);
        }

        Ok(JavaType::new(JavaClass {
            name: name.to_string(),
            is_interface,
            is_abstract,
            is_private: is_private_nested(class),
            is_platform,
            superclass,
            interfaces,
        }))
    }

    /// Load a supertype; any failure other than a cycle fails the referrer.
    fn load_dependency(
        &self,
        referrer: &str,
        name: &str,
        as_interface: bool,
        linking: &mut Vec<String>,
    ) -> ResolveResult<JavaType> {
        match self.load(name, as_interface, linking) {
            Ok(ty) => Ok(ty),
            Err(ResolveError::Circularity(cycle)) => Err(ResolveError::Circularity(cycle)),
            Err(e) => Err(ResolveError::Linkage {
                name: referrer.to_string(),
                reason: format!("cannot load {name}: {e}"),
            }),
        }
    }

    fn read_runtime_unit(&self, name: &str) -> ResolveResult<Option<Vec<u8>>> {
        let Some(path) = &self.runtime_path else {
            return Ok(None);
        };
        let read_error = |e: Box<dyn std::error::Error + Send + Sync>| ResolveError::Read {
            name: name.to_string(),
            reason: format!("{}: {e}", path.display()),
        };

        let mut runtime = self.runtime.borrow_mut();
        if runtime.is_none() {
            *runtime = Some(RuntimeImage::open(path).map_err(read_error)?);
        }
        let Some(image) = runtime.as_mut() else {
            return Ok(None);
        };
        let unit = format!("{}.class", name.replace('.', "/"));
        image.read_unit(&unit).map_err(read_error)
    }

    /// Bytes of the first unit named `name` along the lookup path.
    fn read_unit(&self, name: &str) -> ResolveResult<Option<Vec<u8>>> {
        let unit = format!("{}{}", name.replace('.', "/"), self.suffix);

        for entry in &self.entries {
            let found = if entry.is_dir() {
                read_loose_unit(&entry.join(&unit))
            } else if entry.is_file() && is_archive(entry) {
                self.read_archive_unit(entry, &unit)
            } else {
                Ok(None)
            };

            match found {
                Ok(Some(bytes)) => return Ok(Some(bytes)),
                Ok(None) => continue,
                Err(e) => {
                    return Err(ResolveError::Read {
                        name: name.to_string(),
                        reason: format!("{}: {e}", entry.display()),
                    });
                }
            }
        }

        Ok(None)
    }

    fn read_archive_unit(
        &self,
        archive_path: &Path,
        unit: &str,
    ) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send + Sync>> {
        let mut archives = self.archives.borrow_mut();
        if !archives.contains_key(archive_path) {
            let archive = ZipArchive::new(File::open(archive_path)?)?;
            archives.insert(archive_path.to_path_buf(), archive);
        }
        let Some(archive) = archives.get_mut(archive_path) else {
            return Ok(None);
        };

        let mut entry = match archive.by_name(unit) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }
}

impl TypeResolver for ClassFileLoader {
    type Type = JavaType;

    fn resolve(&self, candidate: &CandidateName) -> ResolveResult<JavaType> {
        self.load_type(candidate.binary())
    }
}

fn read_loose_unit(
    path: &Path,
) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send + Sync>> {
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(std::fs::read(path)?))
}

fn malformed(name: &str, e: ristretto_classfile::Error) -> ResolveError {
    ResolveError::Malformed {
        name: name.to_string(),
        reason: format!("{e:?}"),
    }
}

/// Dotted name of the class constant at `index`.
fn class_ref(class: &ClassFile, index: u16, owner: &str) -> ResolveResult<String> {
    class
        .constant_pool
        .try_get_class(index)
        .map(|n| n.replace('/', "."))
        .map_err(|e| malformed(owner, e))
}

/// A nested type is private when its own `InnerClasses` record says so.
fn is_private_nested(class: &ClassFile) -> bool {
    class.attributes.iter().any(|attribute| match attribute {
        Attribute::InnerClasses { classes, .. } => classes.iter().any(|inner| {
            inner.class_info_index == class.this_class
                && inner.access_flags.contains(NestedClassAccessFlags::PRIVATE)
        }),
        _ => false,
    })
}
