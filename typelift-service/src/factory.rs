//! Factory functions for creating resolution service instances

use crate::service::TypeLiftService;
use typelift_core::{Result, TypeLiftConfig};

/// Create a resolution service with the default configuration
#[must_use]
pub fn create_typelift_service() -> TypeLiftService {
    TypeLiftService::new()
}

/// Create a resolution service with a validated configuration
///
/// # Errors
///
/// Returns an error if the configuration is out of range.
pub fn create_typelift_service_with_config(config: TypeLiftConfig) -> Result<TypeLiftService> {
    TypeLiftService::with_config(config)
}
