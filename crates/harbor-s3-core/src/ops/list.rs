//! Bucket listing handlers: `list_objects` (v1) and `list_objects_v2`.
//!
//! Both walk the bucket's ordered key store, so pages always come back in
//! lexicographic key order. V2 pagination relies on an opaque continuation
//! token that encodes the last key of the previous page.

use harbor_s3_model::error::S3Error;
use harbor_s3_model::input::{ListObjectsInput, ListObjectsV2Input};
use harbor_s3_model::output::{ListObjectsOutput, ListObjectsV2Output};
use harbor_s3_model::types::{CommonPrefix, Object, StorageClass};

use crate::error::S3ServiceError;
use crate::provider::HarborS3;
use crate::state::keystore::ListResult;
use crate::state::object::S3Object;
use crate::utils::{decode_continuation_token, encode_continuation_token};

use super::bucket::to_model_owner;

const DEFAULT_MAX_KEYS: i32 = 1000;

fn to_model_object(obj: &S3Object, include_owner: bool) -> Object {
    Object {
        e_tag: Some(obj.etag.clone()),
        key: Some(obj.key.clone()),
        last_modified: Some(obj.last_modified),
        owner: include_owner.then(|| to_model_owner(&obj.owner)),
        size: Some(obj.size as i64),
        storage_class: Some(StorageClass::from(obj.storage_class.as_str())),
    }
}

fn to_common_prefixes(prefixes: Vec<String>) -> Vec<CommonPrefix> {
    prefixes
        .into_iter()
        .map(|prefix| CommonPrefix {
            prefix: Some(prefix),
        })
        .collect()
}

impl HarborS3 {
    fn list_bucket(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        delimiter: Option<&str>,
        start_after: &str,
        max_keys: i32,
    ) -> Result<ListResult, S3Error> {
        let bucket = self
            .registry
            .get_bucket(bucket)
            .map_err(S3ServiceError::into_s3_error)?;
        let store = bucket.objects.read();
        Ok(store.list_objects(
            prefix.unwrap_or_default(),
            delimiter.unwrap_or_default(),
            start_after,
            max_keys.max(0) as usize,
        ))
    }

    /// List objects (legacy v1 semantics, marker-based pagination).
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist.
    pub async fn handle_list_objects(
        &self,
        input: ListObjectsInput,
    ) -> Result<ListObjectsOutput, S3Error> {
        let max_keys = input.max_keys.unwrap_or(DEFAULT_MAX_KEYS);
        let marker = input.marker.clone().unwrap_or_default();

        let result = self.list_bucket(
            &input.bucket,
            input.prefix.as_deref(),
            input.delimiter.as_deref(),
            &marker,
            max_keys,
        )?;

        let contents: Vec<Object> = result
            .objects
            .iter()
            .map(|obj| to_model_object(obj, true))
            .collect();

        Ok(ListObjectsOutput {
            common_prefixes: to_common_prefixes(result.common_prefixes),
            contents,
            delimiter: input.delimiter,
            is_truncated: Some(result.is_truncated),
            marker: input.marker,
            max_keys: Some(max_keys),
            name: Some(input.bucket),
            next_marker: result.next_marker,
            prefix: input.prefix,
        })
    }

    /// List objects with v2 semantics: `start-after` positions the first
    /// page, and an opaque continuation token resumes subsequent pages with
    /// no gaps or duplicates even when objects change in between.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist, or
    /// `InvalidArgument` for a malformed continuation token.
    pub async fn handle_list_objects_v2(
        &self,
        input: ListObjectsV2Input,
    ) -> Result<ListObjectsV2Output, S3Error> {
        let max_keys = input.max_keys.unwrap_or(DEFAULT_MAX_KEYS);

        // A continuation token wins over start-after, matching how clients
        // page: start-after applies to the first request only.
        let start_after = match input.continuation_token.as_deref() {
            Some(token) => {
                decode_continuation_token(token).map_err(S3ServiceError::into_s3_error)?
            }
            None => input.start_after.clone().unwrap_or_default(),
        };

        let result = self.list_bucket(
            &input.bucket,
            input.prefix.as_deref(),
            input.delimiter.as_deref(),
            &start_after,
            max_keys,
        )?;

        let include_owner = input.fetch_owner.unwrap_or(false);
        let contents: Vec<Object> = result
            .objects
            .iter()
            .map(|obj| to_model_object(obj, include_owner))
            .collect();
        let key_count = (contents.len() + result.common_prefixes.len()) as i32;

        let next_continuation_token = result
            .next_marker
            .as_deref()
            .map(encode_continuation_token);

        Ok(ListObjectsV2Output {
            common_prefixes: to_common_prefixes(result.common_prefixes),
            contents,
            continuation_token: input.continuation_token,
            delimiter: input.delimiter,
            is_truncated: Some(result.is_truncated),
            key_count: Some(key_count),
            max_keys: Some(max_keys),
            name: Some(input.bucket),
            next_continuation_token,
            prefix: input.prefix,
            start_after: input.start_after,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
