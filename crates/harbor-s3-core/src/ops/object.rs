//! Object operation handlers.
//!
//! Implements `put_object`, `get_object`, `head_object`, and
//! `delete_object`.

use bytes::Bytes;
use chrono::Utc;
use harbor_s3_model::error::S3Error;
use harbor_s3_model::input::{
    DeleteObjectInput, GetObjectInput, HeadObjectInput, PutObjectInput,
};
use harbor_s3_model::output::{GetObjectOutput, HeadObjectOutput, PutObjectOutput};
use tracing::debug;

use crate::error::S3ServiceError;
use crate::provider::HarborS3;
use crate::state::object::{ObjectMetadata, Owner as InternalOwner, S3Object};
use crate::utils::parse_range_header;
use crate::validation::{validate_content_md5, validate_object_key};

impl HarborS3 {
    /// Put (upload) an object. Overwrites any existing object at the key.
    ///
    /// # Errors
    ///
    /// - `NoSuchBucket` if the bucket does not exist.
    /// - `InvalidArgument` for a bad key or mismatched `Content-MD5`.
    pub async fn handle_put_object(
        &self,
        mut input: PutObjectInput,
    ) -> Result<PutObjectOutput, S3Error> {
        let bucket_name = input.bucket.clone();
        let key = input.key.clone();

        validate_object_key(&key).map_err(S3ServiceError::into_s3_error)?;

        // Verify the bucket exists before touching storage.
        self.registry
            .get_bucket(&bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        let body_data = input.body.take().unwrap_or_else(Bytes::new);

        validate_content_md5(input.content_md5.as_deref(), &body_data)
            .map_err(S3ServiceError::into_s3_error)?;

        let write_result = self
            .storage
            .write_object(&bucket_name, &key, body_data)
            .await
            .map_err(S3ServiceError::into_s3_error)?;

        let obj = S3Object {
            key: key.clone(),
            etag: write_result.etag.clone(),
            size: write_result.size,
            last_modified: Utc::now(),
            storage_class: input
                .storage_class
                .map_or_else(|| "STANDARD".to_owned(), |s| s.as_str().to_owned()),
            metadata: ObjectMetadata {
                content_type: input.content_type,
                user_metadata: input.metadata,
            },
            owner: InternalOwner::default(),
            parts_count: None,
        };

        // The bucket may have been deleted while the body was written; a
        // concurrent delete only succeeds on an empty bucket, so re-check
        // and drop the orphaned body if we lost that race.
        match self.registry.get_bucket(&bucket_name) {
            Ok(bucket) => {
                bucket.objects.write().put(obj);
            }
            Err(e) => {
                self.storage.delete_object(&bucket_name, &key);
                return Err(e.into_s3_error());
            }
        }

        debug!(bucket = %bucket_name, key = %key, size = write_result.size, "put_object completed");

        Ok(PutObjectOutput {
            e_tag: Some(write_result.etag),
        })
    }

    /// Get (download) an object, optionally restricted to a byte range.
    ///
    /// # Errors
    ///
    /// - `NoSuchBucket` / `NoSuchKey` if the bucket or key is missing.
    /// - `InvalidRange` for an unsatisfiable `Range` header.
    pub async fn handle_get_object(
        &self,
        input: GetObjectInput,
    ) -> Result<GetObjectOutput, S3Error> {
        let bucket_name = input.bucket;
        let key = input.key;

        // Copy the metadata out while holding the lock; parking_lot guards
        // are !Send, so they cannot be held across the storage await.
        let (obj_size, obj_etag, obj_last_modified, obj_meta) = {
            let bucket = self
                .registry
                .get_bucket(&bucket_name)
                .map_err(S3ServiceError::into_s3_error)?;

            let store = bucket.objects.read();
            let obj = store
                .get(&key)
                .ok_or_else(|| S3ServiceError::NoSuchKey { key: key.clone() }.into_s3_error())?;

            (obj.size, obj.etag.clone(), obj.last_modified, obj.metadata.clone())
        };

        let range = match input.range {
            Some(ref range_value) => Some(
                parse_range_header(range_value, obj_size)
                    .map_err(S3ServiceError::into_s3_error)?,
            ),
            None => None,
        };

        let data = self
            .storage
            .read_object(&bucket_name, &key, range)
            .await
            .map_err(S3ServiceError::into_s3_error)?;

        let content_length = data.len() as i64;
        let content_range = range.map(|(start, end)| format!("bytes {start}-{end}/{obj_size}"));

        let content_type = Some(
            obj_meta
                .content_type
                .unwrap_or_else(|| "binary/octet-stream".to_owned()),
        );

        Ok(GetObjectOutput {
            accept_ranges: Some("bytes".to_owned()),
            body: Some(data),
            content_length: Some(content_length),
            content_range,
            content_type,
            e_tag: Some(obj_etag),
            last_modified: Some(obj_last_modified),
            metadata: obj_meta.user_metadata,
        })
    }

    /// Head an object: metadata only, no body.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` / `NoSuchKey` if the bucket or key is missing.
    pub async fn handle_head_object(
        &self,
        input: HeadObjectInput,
    ) -> Result<HeadObjectOutput, S3Error> {
        let bucket = self
            .registry
            .get_bucket(&input.bucket)
            .map_err(S3ServiceError::into_s3_error)?;

        let store = bucket.objects.read();
        let obj = store.get(&input.key).ok_or_else(|| {
            S3ServiceError::NoSuchKey {
                key: input.key.clone(),
            }
            .into_s3_error()
        })?;

        let content_type = Some(
            obj.metadata
                .content_type
                .clone()
                .unwrap_or_else(|| "binary/octet-stream".to_owned()),
        );

        Ok(HeadObjectOutput {
            accept_ranges: Some("bytes".to_owned()),
            content_length: Some(obj.size as i64),
            content_type,
            e_tag: Some(obj.etag.clone()),
            last_modified: Some(obj.last_modified),
            metadata: obj.metadata.user_metadata.clone(),
        })
    }

    /// Delete an object. Deleting a missing key succeeds: the operation is
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist.
    pub async fn handle_delete_object(&self, input: DeleteObjectInput) -> Result<(), S3Error> {
        let bucket_name = input.bucket;
        let key = input.key;

        let removed = {
            let bucket = self
                .registry
                .get_bucket(&bucket_name)
                .map_err(S3ServiceError::into_s3_error)?;
            bucket.objects.write().delete(&key).is_some()
        };

        if removed {
            self.storage.delete_object(&bucket_name, &key);
        }

        debug!(bucket = %bucket_name, key = %key, removed, "delete_object completed");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
