//! In-progress multipart upload records.
//!
//! Part bodies live in [`crate::storage::InMemoryStorage`]; this module
//! tracks the upload metadata and the per-part ETags needed to validate a
//! completion manifest. Parts are keyed by part number in a [`BTreeMap`],
//! so listings come out in ascending order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::object::{ObjectMetadata, Owner};

/// Metadata for a single uploaded part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPart {
    /// Part number (1-10000).
    pub part_number: u32,
    /// The ETag (quoted hex MD5) of the part body.
    pub etag: String,
    /// Part size in bytes.
    pub size: u64,
    /// When the part was last uploaded.
    pub last_modified: DateTime<Utc>,
}

/// An in-progress multipart upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipartUpload {
    /// The upload ID assigned at initiation.
    pub upload_id: String,
    /// The key the final object will be stored under.
    pub key: String,
    /// When the upload was initiated.
    pub initiated: DateTime<Utc>,
    /// The initiator and eventual owner of the object.
    pub owner: Owner,
    /// Metadata captured at initiation, applied to the final object.
    pub metadata: ObjectMetadata,
    /// Storage class for the final object.
    pub storage_class: String,
    /// Uploaded parts, keyed by part number.
    pub parts: BTreeMap<u32, UploadPart>,
}

impl MultipartUpload {
    /// Create a new upload record with no parts.
    #[must_use]
    pub fn new(upload_id: String, key: String, owner: Owner, metadata: ObjectMetadata) -> Self {
        Self {
            upload_id,
            key,
            initiated: Utc::now(),
            owner,
            metadata,
            storage_class: "STANDARD".to_owned(),
            parts: BTreeMap::new(),
        }
    }

    /// Record a part, replacing any previous part with the same number.
    pub fn put_part(&mut self, part: UploadPart) {
        self.parts.insert(part.part_number, part);
    }

    /// Look up a part by number.
    #[must_use]
    pub fn get_part(&self, part_number: u32) -> Option<&UploadPart> {
        self.parts.get(&part_number)
    }

    /// Parts with a number strictly greater than `marker`, in ascending
    /// order. A marker of 0 yields every part.
    pub fn parts_after(&self, marker: u32) -> impl Iterator<Item = &UploadPart> {
        self.parts.range(marker.saturating_add(1)..).map(|(_, p)| p)
    }

    /// Number of parts uploaded so far.
    #[must_use]
    pub fn parts_count(&self) -> usize {
        self.parts.len()
    }

    /// Total size in bytes of all uploaded parts.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.parts.values().map(|p| p.size).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_upload() -> MultipartUpload {
        MultipartUpload::new(
            "upload-1".to_owned(),
            "big-file.bin".to_owned(),
            Owner::default(),
            ObjectMetadata::default(),
        )
    }

    fn make_part(number: u32, size: u64) -> UploadPart {
        UploadPart {
            part_number: number,
            etag: format!("\"etag-{number}\""),
            size,
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn test_should_create_empty_upload() {
        let upload = make_upload();
        assert_eq!(upload.upload_id, "upload-1");
        assert_eq!(upload.key, "big-file.bin");
        assert_eq!(upload.storage_class, "STANDARD");
        assert_eq!(upload.parts_count(), 0);
        assert_eq!(upload.total_size(), 0);
    }

    #[test]
    fn test_should_record_parts_in_ascending_order() {
        let mut upload = make_upload();
        upload.put_part(make_part(3, 30));
        upload.put_part(make_part(1, 10));
        upload.put_part(make_part(2, 20));

        let numbers: Vec<u32> = upload.parts.keys().copied().collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(upload.parts_count(), 3);
        assert_eq!(upload.total_size(), 60);
    }

    #[test]
    fn test_should_replace_part_on_reupload() {
        let mut upload = make_upload();
        upload.put_part(make_part(1, 10));
        upload.put_part(UploadPart {
            part_number: 1,
            etag: "\"replaced\"".to_owned(),
            size: 99,
            last_modified: Utc::now(),
        });

        assert_eq!(upload.parts_count(), 1);
        let part = upload.get_part(1).expect("part 1 should exist");
        assert_eq!(part.etag, "\"replaced\"");
        assert_eq!(part.size, 99);
    }

    #[test]
    fn test_should_return_none_for_missing_part() {
        let upload = make_upload();
        assert!(upload.get_part(7).is_none());
    }
}
