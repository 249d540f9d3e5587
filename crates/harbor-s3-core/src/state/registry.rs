//! Top-level bucket registry.
//!
//! [`BucketRegistry`] owns the bucket table and enforces name uniqueness.
//! All operations are thread-safe via [`DashMap`]; no external locking is
//! required.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use tracing::{debug, info};

use crate::error::S3ServiceError;

use super::bucket::S3Bucket;
use super::object::Owner;

/// The set of all buckets in the service.
pub struct BucketRegistry {
    /// Bucket name to [`S3Bucket`] mapping.
    buckets: DashMap<String, S3Bucket>,
}

impl std::fmt::Debug for BucketRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketRegistry")
            .field("bucket_count", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl Default for BucketRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketRegistry {
    /// Create a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Create a new bucket.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::BucketAlreadyExists`] if the name is
    /// already taken.
    pub fn create_bucket(
        &self,
        name: String,
        region: String,
        owner: Owner,
    ) -> Result<(), S3ServiceError> {
        // DashMap's entry API holds the shard lock across the vacancy
        // check and the insert, so two racing creates cannot both win.
        match self.buckets.entry(name.clone()) {
            dashmap::Entry::Occupied(_) => {
                return Err(S3ServiceError::BucketAlreadyExists { bucket: name });
            }
            dashmap::Entry::Vacant(entry) => {
                entry.insert(S3Bucket::new(name.clone(), region, owner));
            }
        }

        info!(bucket = %name, "bucket created");
        Ok(())
    }

    /// Delete a bucket.
    ///
    /// # Errors
    ///
    /// - [`S3ServiceError::NoSuchBucket`] if the bucket does not exist.
    /// - [`S3ServiceError::BucketNotEmpty`] if the bucket still contains
    ///   objects or in-progress multipart uploads.
    pub fn delete_bucket(&self, name: &str) -> Result<(), S3ServiceError> {
        let removed = self.buckets.remove_if(name, |_, bucket| bucket.is_empty());

        match removed {
            Some(_) => {
                info!(bucket = %name, "bucket deleted");
                Ok(())
            }
            None => {
                // Either missing or non-empty; look again to tell which.
                if self.buckets.contains_key(name) {
                    Err(S3ServiceError::BucketNotEmpty {
                        bucket: name.to_owned(),
                    })
                } else {
                    Err(S3ServiceError::NoSuchBucket {
                        bucket: name.to_owned(),
                    })
                }
            }
        }
    }

    /// Get a reference to a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::NoSuchBucket`] if the bucket does not exist.
    pub fn get_bucket(&self, name: &str) -> Result<Ref<'_, String, S3Bucket>, S3ServiceError> {
        self.buckets
            .get(name)
            .ok_or_else(|| S3ServiceError::NoSuchBucket {
                bucket: name.to_owned(),
            })
    }

    /// List all buckets as `(name, creation_date)` pairs sorted by name.
    #[must_use]
    pub fn list_buckets(&self) -> Vec<(String, DateTime<Utc>)> {
        let mut buckets: Vec<(String, DateTime<Utc>)> = self
            .buckets
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().creation_date))
            .collect();
        buckets.sort_by(|a, b| a.0.cmp(&b.0));
        buckets
    }

    /// Check whether a bucket exists.
    #[must_use]
    pub fn bucket_exists(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Reset all state, removing all buckets.
    pub fn reset(&self) {
        debug!("resetting bucket registry");
        self.buckets.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
