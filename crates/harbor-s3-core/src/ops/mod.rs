//! Per-operation handlers, grouped by category.
//!
//! Each submodule adds `handle_*` methods to
//! [`HarborS3`](crate::provider::HarborS3).

pub mod bucket;
pub mod list;
pub mod multipart;
pub mod object;
