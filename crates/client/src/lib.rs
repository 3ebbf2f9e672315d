//! Authenticated HTTP client for the Dwello backend.
//!
//! [`ApiClient`] wraps outbound calls to the REST API, attaches the stored
//! bearer token, and transparently recovers from credential expiry with a
//! single-flight token refresh: concurrent 401s elect one leader to perform
//! the refresh while the rest queue and replay with the rotated token.

pub mod gateway;
pub mod paths;

pub use gateway::{ApiClient, ApiResult};
