//! Shared fixtures: an in-memory type registry and archive/directory builders.

use classpath_api::{CandidateName, ResolveError, ResolveResult, TypeDescriptor, TypeResolver};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use std::sync::Once;

static LOGGING: Once = Once::new();

pub fn setup_logging() {
    LOGGING.call_once(|| {
        classpath_core::logging::init_logging("debug");
    });
}

#[derive(Debug, Default, Clone)]
struct Node {
    interface: bool,
    is_abstract: bool,
    private: bool,
    superclass: Option<String>,
    interfaces: Vec<String>,
}

/// A type in the mock registry. Identity is the binary name.
#[derive(Clone)]
pub struct MockType {
    name: String,
    registry: Rc<HashMap<String, Node>>,
}

impl PartialEq for MockType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for MockType {}

impl std::hash::Hash for MockType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Debug for MockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockType({})", self.name)
    }
}

impl MockType {
    fn node(&self) -> &Node {
        &self.registry[&self.name]
    }

    fn link(&self, name: &str) -> MockType {
        MockType {
            name: name.to_string(),
            registry: self.registry.clone(),
        }
    }
}

impl TypeDescriptor for MockType {
    fn name(&self) -> &str {
        &self.name
    }

    fn declared_interfaces(&self) -> Vec<Self> {
        self.node().interfaces.iter().map(|n| self.link(n)).collect()
    }

    fn superclass(&self) -> Option<Self> {
        self.node().superclass.as_deref().map(|n| self.link(n))
    }

    fn is_abstract(&self) -> bool {
        self.node().is_abstract
    }

    fn is_interface(&self) -> bool {
        self.node().interface
    }

    fn is_private(&self) -> bool {
        self.node().private
    }
}

/// Fluent builder for the mock registry.
#[derive(Default)]
pub struct MockRegistryBuilder {
    nodes: HashMap<String, Node>,
    failing: HashSet<String>,
}

impl MockRegistryBuilder {
    pub fn interface(mut self, name: &str, extends: &[&str]) -> Self {
        self.nodes.insert(
            name.to_string(),
            Node {
                interface: true,
                is_abstract: true,
                interfaces: extends.iter().map(|s| s.to_string()).collect(),
                ..Node::default()
            },
        );
        self
    }

    pub fn class(mut self, name: &str, superclass: Option<&str>, implements: &[&str]) -> Self {
        self.nodes.insert(
            name.to_string(),
            Node {
                superclass: superclass.map(str::to_string),
                interfaces: implements.iter().map(|s| s.to_string()).collect(),
                ..Node::default()
            },
        );
        self
    }

    pub fn abstract_class(mut self, name: &str, implements: &[&str]) -> Self {
        self = self.class(name, None, implements);
        if let Some(node) = self.nodes.get_mut(name) {
            node.is_abstract = true;
        }
        self
    }

    pub fn private_class(mut self, name: &str) -> Self {
        self = self.class(name, None, &[]);
        if let Some(node) = self.nodes.get_mut(name) {
            node.private = true;
        }
        self
    }

    /// Loading this name fails with a linkage error.
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn build(self) -> MockRegistry {
        MockRegistry {
            nodes: Rc::new(self.nodes),
            failing: self.failing,
        }
    }
}

pub struct MockRegistry {
    nodes: Rc<HashMap<String, Node>>,
    failing: HashSet<String>,
}

impl MockRegistry {
    pub fn builder() -> MockRegistryBuilder {
        MockRegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> MockType {
        assert!(self.nodes.contains_key(name), "unknown mock type {name}");
        MockType {
            name: name.to_string(),
            registry: self.nodes.clone(),
        }
    }
}

impl TypeResolver for MockRegistry {
    type Type = MockType;

    fn resolve(&self, candidate: &CandidateName) -> ResolveResult<MockType> {
        let name = candidate.binary();
        if self.failing.contains(name) {
            return Err(ResolveError::Linkage {
                name: name.to_string(),
                reason: "missing dependency".to_string(),
            });
        }
        if !self.nodes.contains_key(name) {
            return Err(ResolveError::NotFound(name.to_string()));
        }
        Ok(self.get(name))
    }
}

/// Write an archive containing `entries`, each with a dummy payload.
pub fn write_jar(path: &Path, entries: &[&str]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for entry in entries {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(&[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();
    }
    zip.finish().unwrap();
}

/// Create empty compiled-unit files below `dir`.
pub fn write_classes(dir: &Path, units: &[&str]) {
    for unit in units {
        let path = dir.join(unit);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, [0xCA, 0xFE, 0xBA, 0xBE]).unwrap();
    }
}

pub fn names<T: TypeDescriptor>(types: &HashSet<T>) -> Vec<String> {
    let mut names: Vec<String> = types.iter().map(|t| t.name().to_string()).collect();
    names.sort();
    names
}
