use classpath_api::TypeDescriptor;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Linked metadata of one loaded class or interface.
#[derive(Debug)]
pub struct JavaClass {
    /// Binary name, e.g. `com.acme.Outer$Inner`
    pub name: String,
    pub is_interface: bool,
    pub is_abstract: bool,
    pub is_private: bool,
    /// Served by the platform: read from the runtime image, or an opaque
    /// stand-in when no image has it.
    pub is_platform: bool,
    pub superclass: Option<JavaType>,
    pub interfaces: Vec<JavaType>,
}

/// Shared handle to a [`JavaClass`] owned by a loader.
///
/// Identity is the binary name: one loader registers each name once.
#[derive(Clone)]
pub struct JavaType(Arc<JavaClass>);

impl JavaType {
    pub fn new(class: JavaClass) -> Self {
        Self(Arc::new(class))
    }

    /// An opaque platform type with no known ancestors.
    ///
    /// The kind comes from how the type was referenced: a name listed in an
    /// interface table is an interface, anything else a concrete class.
    pub fn platform(name: impl Into<String>, is_interface: bool) -> Self {
        Self::new(JavaClass {
            name: name.into(),
            is_interface,
            is_abstract: is_interface,
            is_private: false,
            is_platform: true,
            superclass: None,
            interfaces: Vec::new(),
        })
    }

    pub fn class(&self) -> &JavaClass {
        &self.0
    }

    pub fn is_platform(&self) -> bool {
        self.0.is_platform
    }
}

impl PartialEq for JavaType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for JavaType {}

impl Hash for JavaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JavaType")
            .field("name", &self.0.name)
            .field("interface", &self.0.is_interface)
            .field("abstract", &self.0.is_abstract)
            .finish()
    }
}

impl TypeDescriptor for JavaType {
    fn name(&self) -> &str {
        &self.0.name
    }

    fn declared_interfaces(&self) -> Vec<Self> {
        self.0.interfaces.clone()
    }

    fn superclass(&self) -> Option<Self> {
        self.0.superclass.clone()
    }

    fn is_abstract(&self) -> bool {
        self.0.is_abstract
    }

    fn is_interface(&self) -> bool {
        self.0.is_interface
    }

    fn is_private(&self) -> bool {
        self.0.is_private
    }
}
