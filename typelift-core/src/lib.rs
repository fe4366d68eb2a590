//! # typelift Core
//!
//! Core types, errors, and configuration for deriving minimal-redundancy
//! record-type hierarchies from column sets.
//!
//! This crate carries the data model shared by the resolution pipeline in
//! `typelift-service` and by external collaborators: the input [`ColumnSet`],
//! the arena-backed hierarchy node [`SubsetInfo`], the registry-supplied
//! [`BaseTypeDescriptor`], and the emitted [`TypeDescriptor`].

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types for typelift operations
pub mod error;

/// Type definitions for column sets, hierarchy nodes, and descriptors
pub mod types;

/// Configuration for the resolution pipeline
pub mod config;

// Re-export commonly used types
pub use config::{AnchorFallback, TypeLiftConfig};
pub use error::{Result, TypeLiftError};
pub use types::{
    BaseTypeDescriptor, ColumnSet, FieldSet, IdAllocator, NodeId, NodeOrigin, SubsetInfo,
    TypeDescriptor, TypeParent,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AnchorFallback, TypeLiftConfig};
    pub use crate::error::{Result, TypeLiftError};
    pub use crate::types::*;
}
