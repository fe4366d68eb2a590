//! Recurring-subset discovery across input column sets
//!
//! The extractor enumerates the power set of every input column set and keeps
//! the subsets that recur across two or more distinct inputs. Enumeration is
//! exponential in the field count of a single column set, which is tractable
//! only for narrow records; the configured `max_fields_per_set` bound refuses
//! wider inputs instead of exhausting memory.

use indexmap::IndexMap;
use tracing::debug;
use typelift_core::{ColumnSet, FieldSet, Result, TypeLiftConfig, TypeLiftError};

/// Discovers the distinct field subsets that recur across input column sets
#[derive(Debug, Clone)]
pub struct SubsetExtractor {
    min_subset_size: usize,
    max_fields_per_set: usize,
}

impl SubsetExtractor {
    /// Create an extractor from the run configuration
    #[must_use]
    pub fn new(config: &TypeLiftConfig) -> Self {
        Self {
            min_subset_size: config.min_subset_size,
            max_fields_per_set: config.max_fields_per_set,
        }
    }

    /// Enumerate every subset of the column set's fields at or above the
    /// minimum size
    ///
    /// Duplicate field names collapse before enumeration, so each returned
    /// subset is distinct within this column set. For a set of k fields this
    /// yields 2^k − k − 1 subsets at the default minimum size of 2.
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::InvalidInput`] when the column set has more
    /// fields than the enumeration bound allows.
    pub fn enumerate_subsets(
        &self,
        column_set: &ColumnSet,
        position: usize,
    ) -> Result<Vec<FieldSet>> {
        let fields = column_set.field_set();
        let k = fields.len();
        if k > self.max_fields_per_set {
            return Err(TypeLiftError::invalid_input_for(
                format!(
                    "{k} distinct fields exceed the enumeration bound of {}",
                    self.max_fields_per_set
                ),
                column_set.display_name(position),
            ));
        }

        let names: Vec<&str> = fields.iter().collect();
        let mut subsets = Vec::new();
        for mask in 1u64..(1u64 << k) {
            if (mask.count_ones() as usize) < self.min_subset_size {
                continue;
            }
            let subset: FieldSet = names
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, name)| *name)
                .collect();
            subsets.push(subset);
        }
        Ok(subsets)
    }

    /// Pool subsets across all inputs and keep those occurring in at least
    /// two distinct column sets
    ///
    /// Subsets compare as unordered field collections. The result is
    /// deduplicated and ordered ascending by field count, with ties broken by
    /// first-discovery order, so a fixed input order always yields the same
    /// sequence. Empty input yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::InvalidInput`] when any column set exceeds
    /// the enumeration bound.
    pub fn extract(&self, column_sets: &[ColumnSet]) -> Result<Vec<FieldSet>> {
        // Keyed by canonical signature; the stored FieldSet keeps the field
        // order of its first appearance.
        let mut pool: IndexMap<Vec<String>, (FieldSet, usize)> = IndexMap::new();

        for (position, column_set) in column_sets.iter().enumerate() {
            for subset in self.enumerate_subsets(column_set, position)? {
                let signature = subset.signature();
                let entry = pool.entry(signature).or_insert((subset, 0));
                entry.1 += 1;
            }
        }

        let mut recurring: Vec<FieldSet> = pool
            .into_values()
            .filter(|(_, occurrences)| *occurrences >= 2)
            .map(|(subset, _)| subset)
            .collect();
        recurring.sort_by_key(FieldSet::len);

        debug!(
            inputs = column_sets.len(),
            recurring = recurring.len(),
            "subset extraction complete"
        );
        Ok(recurring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn extractor() -> SubsetExtractor {
        SubsetExtractor::new(&TypeLiftConfig::default())
    }

    fn set(fields: &[&str]) -> FieldSet {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let recurring = extractor().extract(&[]).expect("empty input is fine");
        assert!(recurring.is_empty());
    }

    #[test]
    fn test_retains_only_subsets_of_two_distinct_inputs() {
        let inputs = vec![
            ColumnSet::new(["A", "B", "C"]),
            ColumnSet::new(["A", "B", "D"]),
            ColumnSet::new(["A", "C", "D"]),
        ];
        let recurring = extractor().extract(&inputs).expect("extraction succeeds");

        let signatures: Vec<Vec<String>> =
            recurring.iter().map(FieldSet::signature).collect();
        assert!(signatures.contains(&vec!["A".to_string(), "B".to_string()]));
        assert!(signatures.contains(&vec!["A".to_string(), "C".to_string()]));
        assert!(signatures.contains(&vec!["A".to_string(), "D".to_string()]));
        // Each of these appears in a single input only
        assert!(!signatures.contains(&vec!["B".to_string(), "C".to_string()]));
        assert!(!signatures.contains(&vec!["B".to_string(), "D".to_string()]));
        assert!(!signatures.contains(&vec!["C".to_string(), "D".to_string()]));
    }

    #[test]
    fn test_result_is_ascending_by_size() {
        let inputs = vec![
            ColumnSet::new(["Id", "DateCreated", "Name"]),
            ColumnSet::new(["Id", "DateCreated", "Name", "Email"]),
        ];
        let recurring = extractor().extract(&inputs).expect("extraction succeeds");
        let sizes: Vec<usize> = recurring.iter().map(FieldSet::len).collect();
        let mut sorted = sizes.clone();
        sorted.sort_unstable();
        assert_eq!(sizes, sorted);
        // {Id,DateCreated,Name} is a subset of both inputs
        assert!(recurring.contains(&set(&["Id", "DateCreated", "Name"])));
    }

    #[test]
    fn test_duplicates_within_one_input_do_not_vote_twice() {
        // {A,B} occurs twice inside the first column set's field list but
        // only once as a subset of it.
        let inputs = vec![
            ColumnSet::new(["A", "B", "A", "B"]),
            ColumnSet::new(["C", "D"]),
        ];
        let recurring = extractor().extract(&inputs).expect("extraction succeeds");
        assert!(recurring.is_empty());
    }

    #[test]
    fn test_enumeration_bound_is_enforced() {
        let wide: Vec<String> = (0..40).map(|i| format!("F{i}")).collect();
        let inputs = vec![ColumnSet::named("Wide", wide)];
        let err = extractor().extract(&inputs).expect_err("must refuse");
        match err {
            TypeLiftError::InvalidInput { column_set, .. } => {
                assert_eq!(column_set.as_deref(), Some("Wide"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_determinism_for_fixed_input_order() {
        let inputs = vec![
            ColumnSet::new(["Id", "DateCreated", "DateDeleted"]),
            ColumnSet::new(["Id", "DateCreated", "Name"]),
            ColumnSet::new(["Id", "Name"]),
        ];
        let first = extractor().extract(&inputs).expect("extraction succeeds");
        let second = extractor().extract(&inputs).expect("extraction succeeds");
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_enumeration_count_matches_closed_form(k in 0usize..12) {
            let fields: Vec<String> = (0..k).map(|i| format!("F{i}")).collect();
            let column_set = ColumnSet::new(fields);
            let subsets = extractor()
                .enumerate_subsets(&column_set, 0)
                .expect("within bound");
            // Power set minus the singletons and the empty set
            let expected = (1usize << k) - k - 1;
            prop_assert_eq!(subsets.len(), expected);
        }
    }
}
