//! S3 protocol types shared across the Harbor workspace.
//!
//! This crate defines the protocol surface independent of storage and HTTP
//! plumbing:
//!
//! - [`error`]: S3 error codes, their default HTTP status codes and messages,
//!   and the [`error::S3Error`] response type.
//! - [`operations`]: the [`S3Operation`] enum identifying each supported
//!   REST operation.
//! - [`types`]: wire structs shared between requests and responses (owners,
//!   buckets, objects, parts).
//! - [`input`]: typed input structs decoded from incoming requests.
//! - [`output`]: typed output structs for operations that return XML bodies.

pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use error::{S3Error, S3ErrorCode};
pub use operations::S3Operation;
