//! Bucket operation handlers.
//!
//! Implements `create_bucket`, `delete_bucket`, `head_bucket`,
//! `list_buckets`, and `get_bucket_location`.

use harbor_s3_model::error::S3Error;
use harbor_s3_model::input::{
    CreateBucketInput, DeleteBucketInput, GetBucketLocationInput, HeadBucketInput,
    ListBucketsInput,
};
use harbor_s3_model::output::{
    CreateBucketOutput, GetBucketLocationOutput, HeadBucketOutput, ListBucketsOutput,
};
use harbor_s3_model::types::{Bucket, Owner};
use tracing::debug;

use crate::error::S3ServiceError;
use crate::provider::HarborS3;
use crate::state::object::Owner as InternalOwner;
use crate::validation::validate_bucket_name;

/// Convert an internal [`InternalOwner`] to the wire [`Owner`].
pub(super) fn to_model_owner(owner: &InternalOwner) -> Owner {
    Owner {
        display_name: Some(owner.display_name.clone()),
        id: Some(owner.id.clone()),
    }
}

// These handler methods stay async to match the other operation groups,
// even where the method body is synchronous.
#[allow(clippy::unused_async)]
impl HarborS3 {
    /// Create a new bucket.
    ///
    /// # Errors
    ///
    /// - `InvalidBucketName` if the name violates naming rules.
    /// - `BucketAlreadyExists` if the name is taken.
    pub async fn handle_create_bucket(
        &self,
        input: CreateBucketInput,
    ) -> Result<CreateBucketOutput, S3Error> {
        let bucket_name = input.bucket;

        validate_bucket_name(&bucket_name).map_err(S3ServiceError::into_s3_error)?;

        let region = input
            .create_bucket_configuration
            .and_then(|c| c.location_constraint)
            .unwrap_or_else(|| self.config.default_region.clone());

        self.registry
            .create_bucket(bucket_name.clone(), region, InternalOwner::default())
            .map_err(S3ServiceError::into_s3_error)?;

        debug!(bucket = %bucket_name, "create_bucket completed");

        Ok(CreateBucketOutput {
            location: Some(format!("/{bucket_name}")),
        })
    }

    /// Delete a bucket. The bucket must exist and be empty.
    ///
    /// # Errors
    ///
    /// - `NoSuchBucket` if the bucket does not exist.
    /// - `BucketNotEmpty` if it still holds objects or in-progress uploads.
    pub async fn handle_delete_bucket(&self, input: DeleteBucketInput) -> Result<(), S3Error> {
        let bucket_name = input.bucket;

        self.registry
            .delete_bucket(&bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        // State removal succeeded, so the bucket was empty; clear any
        // leftover bodies for it.
        self.storage.delete_bucket_data(&bucket_name);

        debug!(bucket = %bucket_name, "delete_bucket completed");
        Ok(())
    }

    /// Check that a bucket exists (HEAD Bucket).
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist.
    pub async fn handle_head_bucket(
        &self,
        input: HeadBucketInput,
    ) -> Result<HeadBucketOutput, S3Error> {
        let bucket = self
            .registry
            .get_bucket(&input.bucket)
            .map_err(S3ServiceError::into_s3_error)?;

        Ok(HeadBucketOutput {
            bucket_region: Some(bucket.region.clone()),
        })
    }

    /// List all buckets, sorted by name.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` matches the other handlers.
    pub async fn handle_list_buckets(
        &self,
        _input: ListBucketsInput,
    ) -> Result<ListBucketsOutput, S3Error> {
        let mut buckets = Vec::new();
        for (name, creation_date) in self.registry.list_buckets() {
            let region = self
                .registry
                .get_bucket(&name)
                .map(|b| b.region.clone())
                .ok();
            buckets.push(Bucket {
                bucket_region: region,
                creation_date: Some(creation_date),
                name: Some(name),
            });
        }

        Ok(ListBucketsOutput {
            buckets,
            owner: Some(to_model_owner(&InternalOwner::default())),
        })
    }

    /// Get the region a bucket was created in.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist.
    pub async fn handle_get_bucket_location(
        &self,
        input: GetBucketLocationInput,
    ) -> Result<GetBucketLocationOutput, S3Error> {
        let bucket = self
            .registry
            .get_bucket(&input.bucket)
            .map_err(S3ServiceError::into_s3_error)?;

        // AWS reports us-east-1 as an empty location constraint.
        let location_constraint = if bucket.region == "us-east-1" {
            None
        } else {
            Some(bucket.region.clone())
        };

        Ok(GetBucketLocationOutput {
            location_constraint,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
