use std::fmt::Debug;
use std::hash::Hash;

/// Host-runtime metadata for a loaded type.
///
/// Equality and hashing denote type identity: two descriptors are equal
/// exactly when they denote the same loaded type. Descriptors are owned by the
/// host's type registry; the engine only clones handles and never mutates them.
pub trait TypeDescriptor: Clone + Eq + Hash + Debug {
    /// Fully-qualified name, used for logging and diagnostics.
    fn name(&self) -> &str;

    /// Interfaces listed directly on this type.
    ///
    /// For an interface these are the interfaces it extends.
    fn declared_interfaces(&self) -> Vec<Self>;

    /// The direct superclass.
    ///
    /// Returns `None` for the inheritance root. Hosts that model interface
    /// extension as a parent link may return the extended interface here.
    fn superclass(&self) -> Option<Self>;

    fn is_abstract(&self) -> bool;

    fn is_interface(&self) -> bool;

    fn is_private(&self) -> bool;

    /// Neither abstract nor interface-kind.
    fn is_concrete(&self) -> bool {
        !self.is_abstract() && !self.is_interface()
    }
}
