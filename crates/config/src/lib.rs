//! Configuration loading for the Dwello client.
//!
//! Uses figment for YAML-based configuration with sensible defaults and
//! `DWELLO_`-prefixed environment variable overrides.

pub mod schema;

pub use schema::{ClientConfig, Environment};
