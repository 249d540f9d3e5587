//! Per-bucket state.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;

use super::keystore::KeyStore;
use super::multipart::MultipartUpload;
use super::object::Owner;

/// A bucket and everything it contains.
///
/// The object store sits behind an [`RwLock`] so listing walks see a
/// consistent snapshot; multipart uploads use a [`DashMap`] keyed by upload
/// ID since each upload is touched independently.
pub struct S3Bucket {
    /// The bucket name.
    pub name: String,
    /// The region the bucket was created in.
    pub region: String,
    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,
    /// The bucket owner.
    pub owner: Owner,
    /// Object metadata, ordered by key.
    pub objects: RwLock<KeyStore>,
    /// In-progress multipart uploads, keyed by upload ID.
    pub multipart_uploads: DashMap<String, MultipartUpload>,
}

impl std::fmt::Debug for S3Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Bucket")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("objects", &self.objects.read().len())
            .field("multipart_uploads", &self.multipart_uploads.len())
            .finish_non_exhaustive()
    }
}

impl S3Bucket {
    /// Create a new, empty bucket.
    #[must_use]
    pub fn new(name: String, region: String, owner: Owner) -> Self {
        Self {
            name,
            region,
            creation_date: Utc::now(),
            owner,
            objects: RwLock::new(KeyStore::default()),
            multipart_uploads: DashMap::new(),
        }
    }

    /// Whether the bucket contains zero objects and no in-progress
    /// multipart uploads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty() && self.multipart_uploads.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
