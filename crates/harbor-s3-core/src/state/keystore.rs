//! Ordered object store with prefix/delimiter listing.
//!
//! [`KeyStore`] keeps object metadata in a [`BTreeMap`] so listings come
//! out in lexicographic key order for free. The listing walk supports the
//! S3 `prefix`, `delimiter`, `start-after`/marker, and `max-keys`
//! parameters.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::object::S3Object;

/// Result of a listing walk over a [`KeyStore`].
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    /// Objects in this page, in key order.
    pub objects: Vec<S3Object>,
    /// Distinct key groups rolled up under the delimiter, in first-seen
    /// (key) order.
    pub common_prefixes: Vec<String>,
    /// Whether more results remain after this page.
    pub is_truncated: bool,
    /// The key to resume after, set only when truncated.
    pub next_marker: Option<String>,
}

/// Object metadata for one bucket, ordered by key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyStore {
    objects: BTreeMap<String, S3Object>,
}

impl KeyStore {
    /// Insert or replace an object. Returns the previous record, if any.
    pub fn put(&mut self, obj: S3Object) -> Option<S3Object> {
        self.objects.insert(obj.key.clone(), obj)
    }

    /// Look up an object by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S3Object> {
        self.objects.get(key)
    }

    /// Remove an object. Returns the removed record, if any.
    pub fn delete(&mut self, key: &str) -> Option<S3Object> {
        self.objects.remove(key)
    }

    /// Number of objects in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Walk the store and build one listing page.
    ///
    /// Keys at or before `start_after` are skipped, then keys are filtered
    /// by `prefix`. When `delimiter` is non-empty, keys containing the
    /// delimiter after the prefix are rolled up into common prefixes
    /// instead of being returned. Common prefixes count toward `max_keys`
    /// just like objects, so a page holds at most `max_keys` entries in
    /// total. When the page is truncated, `next_marker` is the last
    /// emitted entry, key or common prefix; resuming after a common
    /// prefix skips the whole rolled-up group.
    #[must_use]
    pub fn list_objects(
        &self,
        prefix: &str,
        delimiter: &str,
        start_after: &str,
        max_keys: usize,
    ) -> ListResult {
        let mut result = ListResult::default();
        if max_keys == 0 {
            return result;
        }

        let mut seen_prefixes: HashSet<String> = HashSet::new();
        let mut entries = 0usize;
        let mut last_entry: Option<String> = None;

        for (key, obj) in &self.objects {
            if !start_after.is_empty() && key.as_str() <= start_after {
                continue;
            }
            if !key.starts_with(prefix) {
                continue;
            }

            if !delimiter.is_empty() {
                let rest = &key[prefix.len()..];
                if let Some(idx) = rest.find(delimiter) {
                    let common = format!("{prefix}{}{delimiter}", &rest[..idx]);
                    // A group at or before the marker was already emitted
                    // on an earlier page.
                    if !start_after.is_empty() && common.as_str() <= start_after {
                        continue;
                    }
                    if seen_prefixes.contains(&common) {
                        continue;
                    }
                    if entries >= max_keys {
                        result.is_truncated = true;
                        break;
                    }
                    seen_prefixes.insert(common.clone());
                    result.common_prefixes.push(common.clone());
                    last_entry = Some(common);
                    entries += 1;
                    continue;
                }
            }

            if entries >= max_keys {
                result.is_truncated = true;
                break;
            }
            last_entry = Some(key.clone());
            result.objects.push(obj.clone());
            entries += 1;
        }

        if result.is_truncated {
            result.next_marker = last_entry;
        }

        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
