//! Parent/child forest construction for both resolution modes
//!
//! Unanchored mode chains the recurring subsets discovered by the extractor
//! into a multi-level forest and then attaches every input column set to its
//! closest subset node. Anchored mode matches each column set independently
//! against registry candidates and produces exactly one level below a
//! registry type or the capability marker.

use crate::matcher::BaseTypeMatcher;
use tracing::{debug, trace};
use typelift_core::{
    AnchorFallback, BaseTypeDescriptor, ColumnSet, FieldSet, IdAllocator, NodeId, NodeOrigin,
    Result, SubsetInfo, TypeLiftConfig, TypeLiftError,
};

/// A resolved unanchored hierarchy
///
/// Nodes live in an arena; parents are arena indices. Discovered subset
/// nodes come first in ascending size order, followed by one node per input
/// column set, so a parent always precedes its children.
#[derive(Debug, Clone, Default)]
pub struct ResolvedForest {
    /// All nodes, parents before children
    pub nodes: Vec<SubsetInfo>,
}

impl ResolvedForest {
    /// Arena indices of the ancestors of `node`, nearest first
    #[must_use]
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(idx) = current {
            chain.push(idx);
            current = self.nodes.get(idx).and_then(|n| n.parent);
        }
        chain
    }

    /// Iterate the root nodes
    pub fn roots(&self) -> impl Iterator<Item = &SubsetInfo> {
        self.nodes.iter().filter(|n| n.is_root())
    }
}

/// The parent resolved for one column set in anchored mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorParent {
    /// A concrete registry base type
    Base(String),
    /// The capability marker placeholder; no concrete parent
    Marker(String),
    /// No candidate matched and no marker was supplied
    None,
}

/// One column set resolved against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredNode {
    /// Identifier assigned in input order
    pub id: u32,

    /// Display label carried over from a named column set
    pub label: Option<String>,

    /// The column set's complete field set
    pub full_fields: FieldSet,

    /// Fields left after removing the matched base's full field set
    pub own_fields: FieldSet,

    /// The resolved parent
    pub parent: AnchorParent,
}

/// Builds the parent/child forest for either resolution mode
#[derive(Debug, Clone)]
pub struct HierarchyResolver {
    anchor_fallback: AnchorFallback,
}

impl HierarchyResolver {
    /// Create a resolver from the run configuration
    #[must_use]
    pub fn new(config: &TypeLiftConfig) -> Self {
        Self {
            anchor_fallback: config.anchor_fallback,
        }
    }

    /// Resolve the unanchored forest for the given inputs
    ///
    /// `recurring_subsets` must be the extractor's output: distinct subsets
    /// ordered ascending by field count. Each becomes a node; the subsets are
    /// chained largest-to-smallest, then every input column set is attached
    /// to its closest subset node (or becomes a root when none is contained
    /// in it).
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::InvalidInput`] for a column set with no
    /// fields, or [`TypeLiftError::DomainViolation`] if the construction
    /// order ever assigns a second parent, which indicates a bug.
    pub fn resolve_unanchored(
        &self,
        column_sets: &[ColumnSet],
        recurring_subsets: Vec<FieldSet>,
        ids: &mut IdAllocator,
    ) -> Result<ResolvedForest> {
        let mut nodes: Vec<SubsetInfo> = recurring_subsets
            .into_iter()
            .map(|subset| SubsetInfo::new(ids.allocate(), NodeOrigin::Discovered, subset))
            .collect();

        Self::chain_subsets(&mut nodes)?;
        let roots_before_attach = nodes.iter().filter(|n| n.is_root()).count();
        self.attach_column_sets(&mut nodes, column_sets, ids)?;

        debug!(
            subset_nodes = nodes.len() - column_sets.len(),
            input_nodes = column_sets.len(),
            roots = roots_before_attach,
            "unanchored hierarchy resolved"
        );
        Ok(ResolvedForest { nodes })
    }

    /// Chain the ascending subset nodes into a forest
    ///
    /// Processes nodes largest to smallest. For each node the candidates are
    /// the entries later in that reversed order, i.e. the smaller-or-equal
    /// subsets; the first whose full field set is contained in the current
    /// node's full field set becomes the parent. The scan order is the
    /// tie-break when several candidates qualify, an inherited ambiguity
    /// that is kept deterministic rather than strengthened.
    fn chain_subsets(nodes: &mut [SubsetInfo]) -> Result<()> {
        for current in (0..nodes.len()).rev() {
            let mut parent = None;
            for candidate in (0..current).rev() {
                if nodes[candidate]
                    .full_fields
                    .is_subset_of(&nodes[current].full_fields)
                {
                    parent = Some(candidate);
                    break;
                }
            }
            if let Some(candidate) = parent {
                trace!(
                    child = nodes[current].id,
                    parent = nodes[candidate].id,
                    "chained subset"
                );
                let parent_fields = nodes[candidate].full_fields.clone();
                nodes[current].set_parent(candidate, &parent_fields)?;
            }
        }
        Ok(())
    }

    /// Attach every input column set to the resolved subset forest
    ///
    /// Uses the same most-specific-first containment rule as anchored
    /// matching, scanned over the subset nodes. A column set no subset node
    /// fits becomes a root carrying all of its fields.
    fn attach_column_sets(
        &self,
        nodes: &mut Vec<SubsetInfo>,
        column_sets: &[ColumnSet],
        ids: &mut IdAllocator,
    ) -> Result<()> {
        let subset_count = nodes.len();
        for (position, column_set) in column_sets.iter().enumerate() {
            let fields = column_set.field_set();
            if fields.is_empty() {
                return Err(TypeLiftError::invalid_input_for(
                    "column set has no fields",
                    column_set.display_name(position),
                ));
            }

            let anchor = closest_subset_node(&nodes[..subset_count], &fields);
            let mut node = SubsetInfo::new(ids.allocate(), NodeOrigin::Input, fields);
            if let Some(name) = &column_set.name {
                node = node.with_label(name.clone());
            }
            if let Some(parent) = anchor {
                let parent_fields = nodes[parent].full_fields.clone();
                node.set_parent(parent, &parent_fields)?;
            }
            nodes.push(node);
        }
        Ok(())
    }

    /// Resolve each column set independently against registry candidates
    ///
    /// `candidates` must already be filtered by the required marker, as the
    /// registry's enumeration contract specifies. When no candidate matches,
    /// the node anchors to the marker itself; without a marker the configured
    /// fallback decides between a parentless node and failing the batch.
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::InvalidInput`] for a column set with no
    /// fields, or [`TypeLiftError::UnresolvedAnchor`] under the `Fail`
    /// fallback policy.
    pub fn resolve_anchored(
        &self,
        column_sets: &[ColumnSet],
        candidates: &[BaseTypeDescriptor],
        marker: Option<&str>,
        ids: &mut IdAllocator,
    ) -> Result<Vec<AnchoredNode>> {
        let matcher = BaseTypeMatcher::new();
        let mut resolved = Vec::with_capacity(column_sets.len());

        for (position, column_set) in column_sets.iter().enumerate() {
            let fields = column_set.field_set();
            if fields.is_empty() {
                return Err(TypeLiftError::invalid_input_for(
                    "column set has no fields",
                    column_set.display_name(position),
                ));
            }

            let (own_fields, parent) = match matcher.closest_base(&fields, candidates) {
                Some(base) => {
                    trace!(
                        column_set = %column_set.display_name(position),
                        base = %base.name,
                        "anchored to registry base"
                    );
                    (
                        fields.difference(base.full_fields()),
                        AnchorParent::Base(base.name.clone()),
                    )
                }
                None => match marker {
                    Some(marker) => (fields.clone(), AnchorParent::Marker(marker.to_string())),
                    None => match self.anchor_fallback {
                        AnchorFallback::MarkerOnly => (fields.clone(), AnchorParent::None),
                        AnchorFallback::Fail => {
                            return Err(TypeLiftError::unresolved_anchor(
                                column_set.display_name(position),
                                "no registry candidate matches and no marker was supplied",
                            ));
                        }
                    },
                },
            };

            resolved.push(AnchoredNode {
                id: ids.allocate(),
                label: column_set.name.clone(),
                full_fields: fields,
                own_fields,
                parent,
            });
        }

        debug!(resolved = resolved.len(), "anchored resolution complete");
        Ok(resolved)
    }
}

/// Most specific subset node whose full field set is contained in `fields`
fn closest_subset_node(nodes: &[SubsetInfo], fields: &FieldSet) -> Option<NodeId> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    // Stable sort keeps discovery order on equal field counts
    order.sort_by(|a, b| {
        nodes[*b]
            .full_fields
            .len()
            .cmp(&nodes[*a].full_fields.len())
    });
    order
        .into_iter()
        .find(|&idx| nodes[idx].full_fields.is_subset_of(fields))
}
