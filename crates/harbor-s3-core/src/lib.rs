//! Core S3-compatible storage service for Harbor.
//!
//! This crate owns all service state and implements the semantics of each
//! S3 operation, independent of the HTTP layer:
//!
//! - [`state`]: buckets, object metadata, and in-progress multipart uploads.
//! - [`storage`]: object body storage, in memory with disk spillover.
//! - `ops` (private): per-operation handlers on [`HarborS3`].
//! - [`config`]: service configuration with environment overrides.
//! - [`error`]: the internal error type and its mapping to S3 error
//!   responses.
//!
//! The entry point is [`HarborS3`], which the HTTP layer drives through its
//! `handle_*` methods.

pub mod checksums;
pub mod config;
pub mod error;
mod ops;
pub mod provider;
pub mod state;
pub mod storage;
pub mod utils;
pub mod validation;

pub use config::S3Config;
pub use provider::HarborS3;
