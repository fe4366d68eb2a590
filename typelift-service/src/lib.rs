//! # typelift Service
//!
//! Subset discovery and inheritance-hierarchy resolution for column sets.
//!
//! Given a batch of record shapes (ordered field-name lists), the pipeline
//! derives a minimal-redundancy hierarchy of record-type definitions so each
//! shape inherits shared fields from an ancestor instead of redeclaring
//! them. Two modes are supported:
//!
//! - **Unanchored**: recurring field subsets are discovered from the input
//!   alone and chained into a fresh multi-level forest, then each input is
//!   attached to its closest discovered base.
//! - **Anchored**: each input is matched independently against a registry of
//!   pre-existing base types, optionally filtered by a capability marker,
//!   producing one derived type per input.
//!
//! The whole pipeline is synchronous and batch-oriented: one call consumes
//! the full input and returns the complete descriptor sequence in
//! parents-before-children order, ready for an external code emitter.
//!
//! ```rust
//! use typelift_core::ColumnSet;
//! use typelift_service::TypeLiftService;
//!
//! # fn main() -> typelift_core::Result<()> {
//! let service = TypeLiftService::new();
//! let descriptors = service.resolve_unanchored(&[
//!     ColumnSet::named("Audit", ["Id", "DateCreated", "DateDeleted"]),
//!     ColumnSet::named("Customer", ["Id", "DateCreated", "Name"]),
//!     ColumnSet::named("Tag", ["Id", "Name"]),
//! ])?;
//! assert!(descriptors.iter().any(|d| d.name == "Customer"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Recurring-subset discovery
pub mod extractor;

/// Closest-base matching against registry candidates
pub mod matcher;

/// Parent/child forest construction for both modes
pub mod resolver;

/// Descriptor synthesis in dependency order
pub mod synthesizer;

/// Type registry seam and in-memory implementation
pub mod registry;

/// Code emitter seam and reference backends
pub mod emitter;

/// Textual hierarchy report
pub mod report;

/// Stateless resolution facade
pub mod service;

/// Factory functions
pub mod factory;

pub use emitter::{DescriptorEmitter, RecordingEmitter, SourceTextEmitter};
pub use extractor::SubsetExtractor;
pub use factory::{create_typelift_service, create_typelift_service_with_config};
pub use matcher::BaseTypeMatcher;
pub use registry::{InMemoryTypeRegistry, TypeRegistry};
pub use report::hierarchy_report;
pub use resolver::{AnchorParent, AnchoredNode, HierarchyResolver, ResolvedForest};
pub use service::TypeLiftService;
pub use synthesizer::TypeSynthesizer;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::emitter::{DescriptorEmitter, RecordingEmitter, SourceTextEmitter};
    pub use crate::factory::{create_typelift_service, create_typelift_service_with_config};
    pub use crate::registry::{InMemoryTypeRegistry, TypeRegistry};
    pub use crate::report::hierarchy_report;
    pub use crate::service::TypeLiftService;
    pub use typelift_core::prelude::*;
}
