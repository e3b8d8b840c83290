/// Failure to turn a candidate name into a loaded type.
///
/// Every host-side load fault maps onto one of these variants, so callers
/// have a single "unresolvable name" recovery path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Type not found: {0}")]
    NotFound(String),
    #[error("Malformed compiled unit for {name}: {reason}")]
    Malformed { name: String, reason: String },
    #[error("Linkage error for {name}: {reason}")]
    Linkage { name: String, reason: String },
    #[error("Circular type hierarchy involving {0}")]
    Circularity(String),
    #[error("Failed to read {name}: {reason}")]
    Read { name: String, reason: String },
}

impl ResolveError {
    /// The name the failure is reported against.
    pub fn name(&self) -> &str {
        match self {
            ResolveError::NotFound(name) | ResolveError::Circularity(name) => name,
            ResolveError::Malformed { name, .. }
            | ResolveError::Linkage { name, .. }
            | ResolveError::Read { name, .. } => name,
        }
    }
}

pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
