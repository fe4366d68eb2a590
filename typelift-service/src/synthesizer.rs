//! Descriptor synthesis in parents-before-children order

use crate::resolver::{AnchorParent, AnchoredNode, ResolvedForest};
use convert_case::{Case, Casing};
use typelift_core::{
    NodeOrigin, Result, SubsetInfo, TypeDescriptor, TypeLiftConfig, TypeLiftError,
};

/// Turns a resolved forest or anchored match results into an ordered
/// sequence of [`TypeDescriptor`]s for the external code emitter
///
/// The emitted order is a valid topological order: the arena construction
/// already places every parent before its children, and anchored parents
/// live outside the sequence entirely.
#[derive(Debug, Clone)]
pub struct TypeSynthesizer {
    base_name_prefix: String,
    record_name_prefix: String,
}

impl TypeSynthesizer {
    /// Create a synthesizer from the run configuration
    #[must_use]
    pub fn new(config: &TypeLiftConfig) -> Self {
        Self {
            base_name_prefix: config.base_name_prefix.clone(),
            record_name_prefix: config.record_name_prefix.clone(),
        }
    }

    fn node_name(&self, node: &SubsetInfo) -> String {
        match (&node.label, node.origin) {
            (Some(label), _) => label.to_case(Case::Pascal),
            (None, NodeOrigin::Discovered) => format!("{}{}", self.base_name_prefix, node.id),
            (None, NodeOrigin::Input) => format!("{}{}", self.record_name_prefix, node.id),
        }
    }

    /// Emit one descriptor per forest node, parents before children
    ///
    /// Own fields were already pruned during resolution, so each descriptor
    /// declares exactly the fields its ancestors do not supply.
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::DomainViolation`] if a node references a
    /// parent that does not precede it, which the resolver's construction
    /// order rules out.
    pub fn synthesize_forest(&self, forest: &ResolvedForest) -> Result<Vec<TypeDescriptor>> {
        let names: Vec<String> = forest.nodes.iter().map(|n| self.node_name(n)).collect();

        forest
            .nodes
            .iter()
            .enumerate()
            .map(|(position, node)| {
                let mut descriptor =
                    TypeDescriptor::new(names[position].clone(), node.own_fields.to_vec());
                if let Some(parent) = node.parent {
                    if parent >= position {
                        return Err(TypeLiftError::domain_violation_at(
                            "parent does not precede child in emission order",
                            names[position].clone(),
                        ));
                    }
                    descriptor = descriptor.with_parent(names[parent].clone());
                }
                Ok(descriptor)
            })
            .collect()
    }

    /// Emit one descriptor per anchored column set
    ///
    /// Parents are registry types or the marker placeholder, never other
    /// emitted descriptors, so input order is already a valid emission order.
    pub fn synthesize_anchored(&self, nodes: &[AnchoredNode]) -> Vec<TypeDescriptor> {
        nodes
            .iter()
            .map(|node| {
                let name = match &node.label {
                    Some(label) => label.to_case(Case::Pascal),
                    None => format!("{}{}", self.record_name_prefix, node.id),
                };
                let descriptor = TypeDescriptor::new(name, node.own_fields.to_vec());
                match &node.parent {
                    AnchorParent::Base(base) => descriptor.with_parent(base.clone()),
                    AnchorParent::Marker(marker) => descriptor.with_marker_parent(marker.clone()),
                    AnchorParent::None => descriptor,
                }
            })
            .collect()
    }
}
