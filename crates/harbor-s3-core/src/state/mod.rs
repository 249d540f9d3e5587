//! Service state: buckets, object metadata, and multipart uploads.
//!
//! - [`registry`]: the top-level bucket table.
//! - [`bucket`]: per-bucket state (object store, in-progress uploads).
//! - [`keystore`]: ordered object map with prefix/delimiter listing.
//! - [`multipart`]: in-progress multipart upload records.
//! - [`object`]: stored object metadata types.

pub mod bucket;
pub mod keystore;
pub mod multipart;
pub mod object;
pub mod registry;

pub use bucket::S3Bucket;
pub use keystore::{KeyStore, ListResult};
pub use multipart::{MultipartUpload, UploadPart};
pub use object::{ObjectMetadata, Owner, S3Object};
pub use registry::BucketRegistry;
