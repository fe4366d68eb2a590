//! Type registry seam for anchored resolution
//!
//! The registry is an external collaborator: the surrounding application
//! typically enumerates candidate base types from a deployed component. The
//! in-memory implementation here serves tests and embedded use.

use typelift_core::{BaseTypeDescriptor, Result};

/// Source of candidate base types for anchored resolution
pub trait TypeRegistry: Send + Sync {
    /// Enumerate candidate base types, filtered to those satisfying the
    /// required capability marker when one is given
    ///
    /// # Errors
    ///
    /// Implementations backed by external components may fail to enumerate.
    fn enumerate_candidates(&self, marker: Option<&str>) -> Result<Vec<BaseTypeDescriptor>>;
}

/// A registry holding its candidates in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeRegistry {
    types: Vec<BaseTypeDescriptor>,
}

impl InMemoryTypeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate base type
    #[must_use]
    pub fn with_type(mut self, descriptor: BaseTypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    /// Register a candidate base type
    pub fn register(&mut self, descriptor: BaseTypeDescriptor) {
        self.types.push(descriptor);
    }

    /// Number of registered candidates
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeRegistry for InMemoryTypeRegistry {
    fn enumerate_candidates(&self, marker: Option<&str>) -> Result<Vec<BaseTypeDescriptor>> {
        Ok(self
            .types
            .iter()
            .filter(|t| t.satisfies(marker))
            .cloned()
            .collect())
    }
}
