//! The Harbor S3 provider.
//!
//! [`HarborS3`] owns all service state (buckets, objects, multipart
//! uploads) and the body storage backend. Individual operations are
//! implemented in the `ops` submodules as `handle_*` methods.

use std::sync::Arc;

use crate::config::S3Config;
use crate::state::registry::BucketRegistry;
use crate::storage::InMemoryStorage;

/// The S3 service core, driven by the HTTP layer.
///
/// All fields are `Arc`-wrapped for cheap cloning and shared ownership
/// across handler tasks.
///
/// # Examples
///
/// ```
/// use harbor_s3_core::{HarborS3, S3Config};
///
/// let provider = HarborS3::new(S3Config::default());
/// assert!(provider.registry().list_buckets().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct HarborS3 {
    /// Bucket and object metadata state.
    pub(crate) registry: Arc<BucketRegistry>,
    /// Object body storage (in-memory with disk spillover).
    pub(crate) storage: Arc<InMemoryStorage>,
    /// Service configuration.
    pub(crate) config: Arc<S3Config>,
}

impl HarborS3 {
    /// Create a new provider with the given configuration.
    #[must_use]
    pub fn new(config: S3Config) -> Self {
        let storage = InMemoryStorage::new(config.s3_max_memory_object_size);
        Self {
            registry: Arc::new(BucketRegistry::new()),
            storage: Arc::new(storage),
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the bucket registry.
    #[must_use]
    pub fn registry(&self) -> &BucketRegistry {
        &self.registry
    }

    /// Returns a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &InMemoryStorage {
        &self.storage
    }

    /// Returns a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// Reset all state (buckets, objects, multipart uploads).
    pub fn reset(&self) {
        self.registry.reset();
        self.storage.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_provider_with_defaults() {
        let provider = HarborS3::new(S3Config::default());
        assert_eq!(provider.config().gateway_listen, "0.0.0.0:4566");
        assert!(provider.registry().list_buckets().is_empty());
    }

    #[test]
    fn test_should_share_via_arc() {
        let provider = Arc::new(HarborS3::new(S3Config::default()));
        let clone = Arc::clone(&provider);
        assert_eq!(
            provider.config().default_region,
            clone.config().default_region
        );
    }

    #[test]
    fn test_should_reset_state() {
        let provider = HarborS3::new(S3Config::default());
        provider
            .registry()
            .create_bucket(
                "test".to_owned(),
                "us-east-1".to_owned(),
                crate::state::object::Owner::default(),
            )
            .unwrap_or_else(|e| panic!("create failed: {e}"));
        assert!(provider.registry().bucket_exists("test"));

        provider.reset();
        assert!(!provider.registry().bucket_exists("test"));
    }
}
