//! Stateless resolution facade
//!
//! One service call processes the whole input batch and returns the full
//! ordered descriptor sequence, or fails with no usable partial results.
//! The service holds only its configuration, so a single instance is safely
//! callable from any number of threads; no state outlives a call.

use crate::emitter::DescriptorEmitter;
use crate::extractor::SubsetExtractor;
use crate::registry::TypeRegistry;
use crate::resolver::HierarchyResolver;
use crate::synthesizer::TypeSynthesizer;
use tracing::info;
use typelift_core::{ColumnSet, IdAllocator, Result, TypeDescriptor, TypeLiftConfig, TypeLiftError};

/// Batch resolution entry points for both modes
#[derive(Debug, Clone, Default)]
pub struct TypeLiftService {
    config: TypeLiftConfig,
}

impl TypeLiftService {
    /// Create a service with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::ConfigError`] if the configuration is
    /// out of range.
    pub fn with_config(config: TypeLiftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &TypeLiftConfig {
        &self.config
    }

    /// Resolve a batch in unanchored mode
    ///
    /// Discovers recurring subsets, chains them into a forest, attaches
    /// each input column set, and returns descriptors in
    /// parents-before-children order.
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::InvalidInput`] when the batch is empty, a
    /// column set has no fields, or a column set exceeds the enumeration
    /// bound; [`TypeLiftError::DomainViolation`] indicates an internal bug.
    pub fn resolve_unanchored(&self, column_sets: &[ColumnSet]) -> Result<Vec<TypeDescriptor>> {
        self.check_batch(column_sets)?;
        let mut ids = IdAllocator::new();

        let recurring = SubsetExtractor::new(&self.config).extract(column_sets)?;
        let forest = HierarchyResolver::new(&self.config).resolve_unanchored(
            column_sets,
            recurring,
            &mut ids,
        )?;
        let descriptors = TypeSynthesizer::new(&self.config).synthesize_forest(&forest)?;

        info!(
            column_sets = column_sets.len(),
            descriptors = descriptors.len(),
            "unanchored batch resolved"
        );
        Ok(descriptors)
    }

    /// Resolve a batch in anchored mode
    ///
    /// Matches each column set independently against the registry's
    /// candidates (filtered by `marker` when given) and returns one derived
    /// descriptor per column set.
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::InvalidInput`] for an empty batch or a
    /// fieldless column set, [`TypeLiftError::UnresolvedAnchor`] under the
    /// `Fail` fallback policy, or any registry enumeration error.
    pub fn resolve_anchored(
        &self,
        column_sets: &[ColumnSet],
        registry: &dyn TypeRegistry,
        marker: Option<&str>,
    ) -> Result<Vec<TypeDescriptor>> {
        self.check_batch(column_sets)?;
        let mut ids = IdAllocator::new();

        let candidates = registry.enumerate_candidates(marker)?;
        let resolved = HierarchyResolver::new(&self.config).resolve_anchored(
            column_sets,
            &candidates,
            marker,
            &mut ids,
        )?;
        let descriptors = TypeSynthesizer::new(&self.config).synthesize_anchored(&resolved);

        info!(
            column_sets = column_sets.len(),
            candidates = candidates.len(),
            "anchored batch resolved"
        );
        Ok(descriptors)
    }

    /// Resolve a batch in unanchored mode and hand the result to an emitter
    ///
    /// # Errors
    ///
    /// Propagates resolution errors and any emitter failure.
    pub fn resolve_unanchored_into(
        &self,
        column_sets: &[ColumnSet],
        emitter: &mut dyn DescriptorEmitter,
    ) -> Result<Vec<TypeDescriptor>> {
        let descriptors = self.resolve_unanchored(column_sets)?;
        emitter.emit(&descriptors)?;
        Ok(descriptors)
    }

    fn check_batch(&self, column_sets: &[ColumnSet]) -> Result<()> {
        if column_sets.is_empty() {
            return Err(TypeLiftError::invalid_input(
                "no column sets supplied for resolution",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::RecordingEmitter;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_batch_is_invalid_input() {
        let service = TypeLiftService::new();
        let err = service.resolve_unanchored(&[]).expect_err("must fail");
        assert!(matches!(err, TypeLiftError::InvalidInput { .. }));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TypeLiftConfig::new().with_min_subset_size(0);
        assert!(TypeLiftService::with_config(config).is_err());
    }

    #[test]
    fn test_resolve_into_forwards_descriptors() {
        let service = TypeLiftService::new();
        let inputs = vec![
            ColumnSet::named("First", ["Id", "Name"]),
            ColumnSet::named("Second", ["Id", "Name", "Email"]),
        ];
        let mut emitter = RecordingEmitter::new();
        let descriptors = service
            .resolve_unanchored_into(&inputs, &mut emitter)
            .expect("resolution succeeds");
        assert_eq!(emitter.emitted, descriptors);
    }

    #[test]
    fn test_service_calls_are_independent() {
        let service = TypeLiftService::new();
        let inputs = vec![
            ColumnSet::named("First", ["Id", "Name"]),
            ColumnSet::named("Second", ["Id", "Name", "Email"]),
        ];
        let first = service.resolve_unanchored(&inputs).expect("first run");
        let second = service.resolve_unanchored(&inputs).expect("second run");
        // Ids restart per call, so runs are reproducible
        assert_eq!(first, second);
    }
}
