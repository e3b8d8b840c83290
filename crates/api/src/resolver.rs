use crate::error::ResolveResult;
use crate::models::{CandidateName, TypeDescriptor};

/// Host facility that loads the type behind a candidate name.
pub trait TypeResolver {
    type Type: TypeDescriptor;

    /// Load the type for `candidate`, or report why it cannot be loaded.
    fn resolve(&self, candidate: &CandidateName) -> ResolveResult<Self::Type>;
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    type Type = R::Type;

    fn resolve(&self, candidate: &CandidateName) -> ResolveResult<Self::Type> {
        (**self).resolve(candidate)
    }
}
