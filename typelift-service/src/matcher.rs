//! Closest-base matching against a registry of candidate base types

use typelift_core::{BaseTypeDescriptor, FieldSet};

/// Finds the closest matching base type for a single column set
///
/// Candidates are ranked descending by their full field count and scanned in
/// that order; the first whose full field set is contained in the column
/// set's fields wins. Ranking most-specific-first guarantees the match shares
/// the most fields: any smaller candidate that also matches would be a valid
/// but less specific ancestor. Ties on field count fall back to registry
/// order, which is implementation-defined but deterministic for a fixed
/// registry.
#[derive(Debug, Clone, Default)]
pub struct BaseTypeMatcher;

impl BaseTypeMatcher {
    /// Create a matcher
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Return the most specific candidate whose full field set is contained
    /// in `fields`, or `None` when no candidate matches
    #[must_use]
    pub fn closest_base<'a>(
        &self,
        fields: &FieldSet,
        candidates: &'a [BaseTypeDescriptor],
    ) -> Option<&'a BaseTypeDescriptor> {
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        // Stable sort keeps registry order on equal field counts
        order.sort_by(|a, b| {
            candidates[*b]
                .full_fields()
                .len()
                .cmp(&candidates[*a].full_fields().len())
        });
        order
            .into_iter()
            .map(|i| &candidates[i])
            .find(|candidate| candidate.full_fields().is_subset_of(fields))
    }
}
