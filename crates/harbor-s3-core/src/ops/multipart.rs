//! Multipart upload operation handlers.
//!
//! Covers the full upload lifecycle: `create_multipart_upload`,
//! `upload_part`, `complete_multipart_upload`, `abort_multipart_upload`,
//! plus the `list_parts` and `list_multipart_uploads` introspection calls.

use bytes::Bytes;
use chrono::Utc;
use harbor_s3_model::error::S3Error;
use harbor_s3_model::input::{
    AbortMultipartUploadInput, CompleteMultipartUploadInput, CreateMultipartUploadInput,
    ListMultipartUploadsInput, ListPartsInput, UploadPartInput,
};
use harbor_s3_model::output::{
    CompleteMultipartUploadOutput, CreateMultipartUploadOutput, ListMultipartUploadsOutput,
    ListPartsOutput, UploadPartOutput,
};
use harbor_s3_model::types::{Initiator, Part, StorageClass};
use harbor_s3_model::types::MultipartUpload as ModelMultipartUpload;
use tracing::debug;

use crate::error::S3ServiceError;
use crate::ops::bucket::to_model_owner;
use crate::provider::HarborS3;
use crate::state::multipart::{MultipartUpload, UploadPart};
use crate::state::object::{ObjectMetadata, Owner, S3Object};
use crate::utils::generate_upload_id;
use crate::validation::validate_object_key;

const DEFAULT_MAX_PARTS: i32 = 1000;
const DEFAULT_MAX_UPLOADS: i32 = 1000;
const MAX_PART_NUMBER: i32 = 10_000;

impl HarborS3 {
    /// Initiate a multipart upload and return its upload id.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist, or
    /// `InvalidArgument` for a bad key.
    pub async fn handle_create_multipart_upload(
        &self,
        input: CreateMultipartUploadInput,
    ) -> Result<CreateMultipartUploadOutput, S3Error> {
        validate_object_key(&input.key).map_err(S3ServiceError::into_s3_error)?;

        let bucket = self
            .registry
            .get_bucket(&input.bucket)
            .map_err(S3ServiceError::into_s3_error)?;

        let upload_id = generate_upload_id();
        let mut upload = MultipartUpload::new(
            upload_id.clone(),
            input.key.clone(),
            Owner::default(),
            ObjectMetadata {
                content_type: input.content_type,
                user_metadata: input.metadata,
            },
        );
        if let Some(storage_class) = input.storage_class {
            upload.storage_class = storage_class.as_str().to_owned();
        }
        bucket.multipart_uploads.insert(upload_id.clone(), upload);

        debug!(bucket = %input.bucket, key = %input.key, upload_id = %upload_id, "multipart upload created");

        Ok(CreateMultipartUploadOutput {
            bucket: Some(input.bucket),
            key: Some(input.key),
            upload_id: Some(upload_id),
        })
    }

    /// Upload a single part. Re-uploading a part number replaces the
    /// previous data for that number.
    ///
    /// # Errors
    ///
    /// - `NoSuchBucket` / `NoSuchUpload` if the bucket or upload is missing.
    /// - `InvalidArgument` if the part number is outside `1..=10000`.
    pub async fn handle_upload_part(
        &self,
        mut input: UploadPartInput,
    ) -> Result<UploadPartOutput, S3Error> {
        if input.part_number < 1 || input.part_number > MAX_PART_NUMBER {
            return Err(S3ServiceError::InvalidArgument {
                message: format!(
                    "Part number must be an integer between 1 and {MAX_PART_NUMBER}, inclusive"
                ),
            }
            .into_s3_error());
        }
        let part_number = input.part_number as u32;

        // Confirm the upload exists before accepting the part data.
        {
            let bucket = self
                .registry
                .get_bucket(&input.bucket)
                .map_err(S3ServiceError::into_s3_error)?;
            if !bucket.multipart_uploads.contains_key(&input.upload_id) {
                return Err(S3ServiceError::NoSuchUpload {
                    upload_id: input.upload_id,
                }
                .into_s3_error());
            }
        }

        let body_data = input.body.take().unwrap_or_else(Bytes::new);
        let write_result = self
            .storage
            .write_part(&input.bucket, &input.upload_id, part_number, body_data)
            .await
            .map_err(S3ServiceError::into_s3_error)?;

        let bucket = self
            .registry
            .get_bucket(&input.bucket)
            .map_err(S3ServiceError::into_s3_error)?;
        let Some(mut upload) = bucket.multipart_uploads.get_mut(&input.upload_id) else {
            // The upload was aborted while the part was written; drop the
            // orphaned part data.
            self.storage.abort_multipart(&input.bucket, &input.upload_id);
            return Err(S3ServiceError::NoSuchUpload {
                upload_id: input.upload_id,
            }
            .into_s3_error());
        };
        upload.put_part(UploadPart {
            part_number,
            etag: write_result.etag.clone(),
            size: write_result.size,
            last_modified: Utc::now(),
        });
        debug!(
            bucket = %input.bucket,
            upload_id = %input.upload_id,
            part_number,
            parts = upload.parts_count(),
            total_size = upload.total_size(),
            "part uploaded"
        );

        Ok(UploadPartOutput {
            e_tag: Some(write_result.etag),
        })
    }

    /// Assemble an upload's parts into the final object.
    ///
    /// The part manifest must list at least one part in strictly ascending
    /// part-number order, and each listed part must match a previously
    /// uploaded part. A failed completion leaves the upload and its parts
    /// untouched so the client can retry.
    ///
    /// # Errors
    ///
    /// - `NoSuchBucket` / `NoSuchUpload` if the bucket or upload is missing.
    /// - `InvalidPartOrder` for an empty or unsorted manifest.
    /// - `InvalidPart` when a listed part was never uploaded or its ETag
    ///   does not match.
    pub async fn handle_complete_multipart_upload(
        &self,
        input: CompleteMultipartUploadInput,
    ) -> Result<CompleteMultipartUploadOutput, S3Error> {
        let bucket_name = input.bucket;
        let key = input.key;
        let upload_id = input.upload_id;

        let upload = {
            let bucket = self
                .registry
                .get_bucket(&bucket_name)
                .map_err(S3ServiceError::into_s3_error)?;
            let entry = bucket.multipart_uploads.get(&upload_id).ok_or_else(|| {
                S3ServiceError::NoSuchUpload {
                    upload_id: upload_id.clone(),
                }
                .into_s3_error()
            })?;
            entry.value().clone()
        };

        let manifest = input
            .multipart_upload
            .map(|m| m.parts)
            .unwrap_or_default();
        if manifest.is_empty() {
            return Err(S3ServiceError::InvalidPartOrder.into_s3_error());
        }

        let mut part_numbers = Vec::with_capacity(manifest.len());
        let mut previous: Option<i32> = None;
        for completed in &manifest {
            let number = completed.part_number.ok_or_else(|| {
                S3ServiceError::InvalidArgument {
                    message: "Part number is required for each part".to_owned(),
                }
                .into_s3_error()
            })?;
            if previous.is_some_and(|prev| number <= prev) {
                return Err(S3ServiceError::InvalidPartOrder.into_s3_error());
            }
            previous = Some(number);

            let recorded = upload
                .get_part(number as u32)
                .ok_or_else(|| S3ServiceError::InvalidPart.into_s3_error())?;
            if let Some(ref etag) = completed.e_tag {
                let trimmed = etag.trim_matches('"');
                if trimmed != recorded.etag.trim_matches('"') {
                    return Err(S3ServiceError::InvalidPart.into_s3_error());
                }
            }
            part_numbers.push(number as u32);
        }

        let (write_result, _part_md5s) = self
            .storage
            .complete_multipart(&bucket_name, &upload_id, &key, &part_numbers)
            .await
            .map_err(S3ServiceError::into_s3_error)?;

        let obj = S3Object {
            key: key.clone(),
            etag: write_result.etag.clone(),
            size: write_result.size,
            last_modified: Utc::now(),
            storage_class: upload.storage_class.clone(),
            metadata: upload.metadata.clone(),
            owner: upload.owner.clone(),
            parts_count: Some(part_numbers.len() as u32),
        };

        {
            let bucket = self
                .registry
                .get_bucket(&bucket_name)
                .map_err(S3ServiceError::into_s3_error)?;
            bucket.objects.write().put(obj);
            bucket.multipart_uploads.remove(&upload_id);
        }

        debug!(
            bucket = %bucket_name,
            key = %key,
            upload_id = %upload_id,
            parts = part_numbers.len(),
            size = write_result.size,
            "multipart upload completed"
        );

        Ok(CompleteMultipartUploadOutput {
            bucket: Some(bucket_name.clone()),
            e_tag: Some(write_result.etag),
            key: Some(key.clone()),
            location: Some(format!("/{bucket_name}/{key}")),
        })
    }

    /// Abort a multipart upload and discard its parts. Aborting an unknown
    /// upload id succeeds: the operation is idempotent, so clients can
    /// safely retry after a timeout.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist.
    pub async fn handle_abort_multipart_upload(
        &self,
        input: AbortMultipartUploadInput,
    ) -> Result<(), S3Error> {
        let removed = {
            let bucket = self
                .registry
                .get_bucket(&input.bucket)
                .map_err(S3ServiceError::into_s3_error)?;
            bucket.multipart_uploads.remove(&input.upload_id).is_some()
        };

        self.storage.abort_multipart(&input.bucket, &input.upload_id);

        debug!(bucket = %input.bucket, upload_id = %input.upload_id, removed, "multipart upload aborted");
        Ok(())
    }

    /// List the parts uploaded so far for a multipart upload, ordered by
    /// part number.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` / `NoSuchUpload` if the bucket or upload is
    /// missing.
    pub async fn handle_list_parts(
        &self,
        input: ListPartsInput,
    ) -> Result<ListPartsOutput, S3Error> {
        let bucket = self
            .registry
            .get_bucket(&input.bucket)
            .map_err(S3ServiceError::into_s3_error)?;
        let entry = bucket.multipart_uploads.get(&input.upload_id).ok_or_else(|| {
            S3ServiceError::NoSuchUpload {
                upload_id: input.upload_id.clone(),
            }
            .into_s3_error()
        })?;
        let upload = entry.value();

        let max_parts = input.max_parts.unwrap_or(DEFAULT_MAX_PARTS).max(0) as usize;
        let marker: u32 = match input.part_number_marker.as_deref() {
            Some(raw) => raw.parse().map_err(|_| {
                S3ServiceError::InvalidArgument {
                    message: format!("Invalid part number marker: {raw}"),
                }
                .into_s3_error()
            })?,
            None => 0,
        };

        let mut parts = Vec::new();
        let mut is_truncated = false;
        for part in upload.parts_after(marker) {
            if parts.len() >= max_parts {
                is_truncated = true;
                break;
            }
            parts.push(Part {
                e_tag: Some(part.etag.clone()),
                last_modified: Some(part.last_modified),
                part_number: Some(part.part_number as i32),
                size: Some(part.size as i64),
            });
        }

        let next_part_number_marker = if is_truncated {
            parts
                .last()
                .and_then(|p| p.part_number)
                .map(|n| n.to_string())
        } else {
            None
        };

        Ok(ListPartsOutput {
            bucket: Some(input.bucket),
            initiator: Some(Initiator {
                display_name: Some(upload.owner.display_name.clone()),
                id: Some(upload.owner.id.clone()),
            }),
            is_truncated: Some(is_truncated),
            key: Some(upload.key.clone()),
            max_parts: Some(max_parts as i32),
            next_part_number_marker,
            owner: Some(to_model_owner(&upload.owner)),
            part_number_marker: input.part_number_marker,
            parts,
            storage_class: Some(StorageClass::from(upload.storage_class.as_str())),
            upload_id: Some(input.upload_id),
        })
    }

    /// List the in-progress multipart uploads in a bucket, ordered by key
    /// then initiation time.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist.
    pub async fn handle_list_multipart_uploads(
        &self,
        input: ListMultipartUploadsInput,
    ) -> Result<ListMultipartUploadsOutput, S3Error> {
        let bucket = self
            .registry
            .get_bucket(&input.bucket)
            .map_err(S3ServiceError::into_s3_error)?;

        let prefix = input.prefix.clone().unwrap_or_default();
        let max_uploads = input.max_uploads.unwrap_or(DEFAULT_MAX_UPLOADS).max(0) as usize;

        let mut all: Vec<MultipartUpload> = bucket
            .multipart_uploads
            .iter()
            .filter(|entry| entry.value().key.starts_with(&prefix))
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.key.cmp(&b.key).then(a.initiated.cmp(&b.initiated)));

        // Resume after the (key, upload id) pair from the previous page.
        if let Some(ref key_marker) = input.key_marker {
            let upload_id_marker = input.upload_id_marker.clone().unwrap_or_default();
            all.retain(|u| {
                u.key.as_str() > key_marker.as_str()
                    || (u.key == *key_marker && u.upload_id > upload_id_marker)
            });
        }

        let is_truncated = all.len() > max_uploads;
        all.truncate(max_uploads);

        let (next_key_marker, next_upload_id_marker) = if is_truncated {
            match all.last() {
                Some(last) => (Some(last.key.clone()), Some(last.upload_id.clone())),
                None => (None, None),
            }
        } else {
            (None, None)
        };

        let uploads = all
            .into_iter()
            .map(|u| ModelMultipartUpload {
                initiated: Some(u.initiated),
                initiator: Some(Initiator {
                    display_name: Some(u.owner.display_name.clone()),
                    id: Some(u.owner.id.clone()),
                }),
                key: Some(u.key),
                owner: Some(to_model_owner(&u.owner)),
                storage_class: Some(StorageClass::from(u.storage_class.as_str())),
                upload_id: Some(u.upload_id),
            })
            .collect();

        Ok(ListMultipartUploadsOutput {
            bucket: Some(input.bucket),
            common_prefixes: Vec::new(),
            delimiter: input.delimiter,
            is_truncated: Some(is_truncated),
            key_marker: input.key_marker,
            max_uploads: Some(max_uploads as i32),
            next_key_marker,
            next_upload_id_marker,
            prefix: input.prefix,
            upload_id_marker: input.upload_id_marker,
            uploads,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
