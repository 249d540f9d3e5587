//! S3 HTTP routing, request parsing, response serialization, and hyper service.
//!
//! This crate is the HTTP layer of the Harbor S3 server:
//!
//! - **Routing** ([`router`]): Maps HTTP requests to S3 operations by examining
//!   method, path, and query parameters. Supports both path-style and
//!   virtual-hosted-style bucket addressing.
//!
//! - **Request deserialization** ([`request`]): Converts raw HTTP request parts
//!   into typed Input structs from `harbor-s3-model`.
//!
//! - **Response serialization** ([`response`]): Converts typed Output structs
//!   into HTTP responses with the right status codes, headers, and XML bodies.
//!
//! - **Dispatch** ([`dispatch`]): Hands identified operations to the business
//!   logic via the [`S3Handler`](dispatch::S3Handler) trait.
//!
//! - **Service** ([`service`]): The [`S3HttpService`](service::S3HttpService)
//!   implementing hyper's `Service` trait, tying routing, dispatch, and common
//!   response headers together.
//!
//! - **Body** ([`body`]): The [`S3ResponseBody`](body::S3ResponseBody) type
//!   supporting buffered and empty response modes.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> S3HttpService (hyper Service)
//!     -> Health check interception
//!     -> S3Router (virtual hosting + operation identification)
//!     -> Body collection
//!     -> dispatch_operation (S3Handler trait)
//!     -> Common response headers (x-amz-request-id, Server)
//!   <- HTTP Response
//! ```

// S3Error is the domain error used pervasively as Result<T, S3Error>. Its size
// is inherent to its fields; boxing it in every Result would add indirection on
// the hot path for negligible benefit.
#![allow(clippy::result_large_err)]

pub mod body;
pub mod dispatch;
pub mod request;
pub mod response;
pub mod router;
pub mod service;

pub use body::S3ResponseBody;
pub use dispatch::S3Handler;
pub use router::{RoutingContext, S3Router};
pub use service::{S3HttpConfig, S3HttpService};
