//! ETag computation.
//!
//! S3 ETags for plain objects are the quoted hex MD5 of the body. Objects
//! assembled from multipart uploads carry a composite ETag: the MD5 of the
//! concatenated raw part digests, suffixed with `-<part count>`.

use digest::Digest;
use md5::Md5;

/// Compute the hex MD5 digest of `data`.
#[must_use]
pub fn compute_md5(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// Compute the quoted ETag for a plain (non-multipart) object body.
///
/// # Examples
///
/// ```
/// use harbor_s3_core::checksums::compute_etag;
///
/// assert_eq!(compute_etag(b""), "\"d41d8cd98f00b204e9800998ecf8427e\"");
/// ```
#[must_use]
pub fn compute_etag(data: &[u8]) -> String {
    format!("\"{}\"", compute_md5(data))
}

/// Compute the composite ETag for a multipart object.
///
/// `part_md5_hexes` holds the hex MD5 of each part, in assembly order. The
/// composite digest is the MD5 of the concatenated raw (hex-decoded) part
/// digests. Quotes around individual entries are tolerated.
#[must_use]
pub fn compute_multipart_etag(part_md5_hexes: &[String], part_count: usize) -> String {
    let mut hasher = Md5::new();
    for md5_hex in part_md5_hexes {
        let trimmed = md5_hex.trim_matches('"');
        if let Ok(raw) = hex::decode(trimmed) {
            hasher.update(&raw);
        }
    }
    let combined = hex::encode(hasher.finalize());
    format!("\"{combined}-{part_count}\"")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
