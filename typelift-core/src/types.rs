//! Core type definitions for column sets, hierarchy nodes, and descriptors

use crate::error::{Result, TypeLiftError};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Index of a node within a resolved forest's arena
///
/// Nodes never hold live references to their parents; a parent is always an
/// index into the arena that owns both nodes. This keeps the forest a plain
/// value and makes the set-once parent invariant enforceable by key.
pub type NodeId = usize;

/// An unordered collection of field names with deterministic iteration order
///
/// Backed by an [`IndexSet`], so membership and equality ignore order while
/// iteration always follows insertion order. All subset arithmetic in the
/// resolution pipeline goes through this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(IndexSet<String>);

impl FieldSet {
    /// Create an empty field set
    #[must_use]
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    /// Insert a field name, returning whether it was newly added
    pub fn insert(&mut self, field: impl Into<String>) -> bool {
        self.0.insert(field.into())
    }

    /// Whether the set contains the given field name (case-sensitive)
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    /// Number of distinct fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every field of `self` is present in `other`
    #[must_use]
    pub fn is_subset_of(&self, other: &FieldSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Fields of `self` not present in `other`, preserving `self`'s order
    #[must_use]
    pub fn difference(&self, other: &FieldSet) -> FieldSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Remove every field present in `other`, preserving remaining order
    pub fn remove_all(&mut self, other: &FieldSet) {
        self.0.retain(|f| !other.contains(f));
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Fields as an ordered vector
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// A canonical (sorted) signature for order-independent keying
    #[must_use]
    pub fn signature(&self) -> Vec<String> {
        let mut fields = self.to_vec();
        fields.sort();
        fields
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// An input record shape: an ordered sequence of case-sensitive field names
///
/// Duplicate names are tolerated and collapse when the column set is viewed
/// as a set. The optional display name seeds the derived type's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    /// Display name used when naming the derived type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Field names in input order
    pub fields: Vec<String>,
}

impl ColumnSet {
    /// Create an anonymous column set from field names
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a named column set from field names
    #[must_use]
    pub fn named<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a field name
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// The column set viewed as a field set (duplicates collapse)
    #[must_use]
    pub fn field_set(&self) -> FieldSet {
        self.fields.iter().cloned().collect()
    }

    /// Display name or a positional placeholder for diagnostics
    #[must_use]
    pub fn display_name(&self, position: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("column set #{position}"))
    }
}

/// Explicit monotonic identifier allocator for discovery-order ids
///
/// Threaded through the discovery phase instead of an ambient counter so a
/// fixed input order always reproduces the same ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator starting at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator starting at the given id
    #[must_use]
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Allocate the next id
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Where a hierarchy node came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeOrigin {
    /// A recurring subset discovered across the input column sets
    Discovered,
    /// An input column set attached to the discovered forest
    Input,
}

/// One node of a resolved hierarchy
///
/// Created during discovery with its full field set as its own fields,
/// mutated exactly once when a parent is assigned (the parent's full fields
/// are removed), and never destroyed within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetInfo {
    /// Unique identifier, assigned in discovery order
    pub id: u32,

    /// Where this node came from
    pub origin: NodeOrigin,

    /// Display label carried over from a named input column set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The node's complete field set, fixed at creation
    pub full_fields: FieldSet,

    /// Fields declared by this node after inherited ones are removed
    pub own_fields: FieldSet,

    /// Arena index of the parent node, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
}

impl SubsetInfo {
    /// Create a parentless node whose own fields equal its full fields
    #[must_use]
    pub fn new(id: u32, origin: NodeOrigin, full_fields: FieldSet) -> Self {
        Self {
            id,
            origin,
            label: None,
            own_fields: full_fields.clone(),
            full_fields,
            parent: None,
        }
    }

    /// Attach a display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether this node has no parent
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Assign the parent node and remove its full field set from own fields
    ///
    /// The parent is set-once. A second assignment is a domain violation:
    /// the resolver's construction order must never produce one, so its
    /// occurrence indicates a bug, and the first assignment is left intact.
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::DomainViolation`] if a parent is already set.
    pub fn set_parent(&mut self, parent: NodeId, parent_full_fields: &FieldSet) -> Result<()> {
        if self.parent.is_some() {
            return Err(TypeLiftError::domain_violation_at(
                "parent already assigned",
                format!("node {}", self.id),
            ));
        }
        self.parent = Some(parent);
        self.own_fields.remove_all(parent_full_fields);
        Ok(())
    }
}

/// A candidate base type supplied by an external type registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTypeDescriptor {
    /// Type name as known to the registry
    pub name: String,

    /// The type's complete field set, own and inherited
    pub fields: FieldSet,

    /// Whether the type carries the capability marker
    pub satisfies_marker: bool,
}

impl BaseTypeDescriptor {
    /// Create a descriptor without the capability marker
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().collect(),
            satisfies_marker: false,
        }
    }

    /// Set whether the type carries the capability marker
    #[must_use]
    pub fn with_marker(mut self, satisfies_marker: bool) -> Self {
        self.satisfies_marker = satisfies_marker;
        self
    }

    /// The type's complete field set, own and inherited
    #[must_use]
    pub fn full_fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Whether this type is eligible under the given required marker
    #[must_use]
    pub fn satisfies(&self, marker: Option<&str>) -> bool {
        marker.is_none() || self.satisfies_marker
    }
}

/// The parent reference carried by an emitted type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeParent {
    /// A concrete parent type emitted earlier or known to the registry
    Class(String),
    /// The capability marker itself; the type has no concrete parent
    Marker(String),
}

impl TypeParent {
    /// The referenced name, class or marker
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Class(name) | Self::Marker(name) => name,
        }
    }

    /// Whether this is the marker placeholder rather than a concrete class
    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker(_))
    }
}

/// One emitted record-type definition
///
/// Produced fresh per run and handed to the external code emitter in
/// parents-before-children order; the core holds no reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Name of the type to declare
    pub name: String,

    /// Parent type or marker placeholder; `None` for a plain root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<TypeParent>,

    /// Fields to declare on this type only, in input order
    pub own_fields: Vec<String>,
}

impl TypeDescriptor {
    /// Create a parentless descriptor
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, own_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parent: None,
            own_fields: own_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Set a concrete parent type
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(TypeParent::Class(parent.into()));
        self
    }

    /// Anchor to the capability marker instead of a concrete parent
    #[must_use]
    pub fn with_marker_parent(mut self, marker: impl Into<String>) -> Self {
        self.parent = Some(TypeParent::Marker(marker.into()));
        self
    }

    /// Whether this descriptor declares a root-level type
    #[must_use]
    pub fn is_root(&self) -> bool {
        !matches!(self.parent, Some(TypeParent::Class(_)))
    }
}
