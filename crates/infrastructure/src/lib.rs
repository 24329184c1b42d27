//! Infrastructure Layer
//!
//! Loads [`FacadeConfig`](domain::FacadeConfig) from files and environment
//! and checks it before anything is built from it.

pub mod config;

pub use config::{ConfigLoader, ConfigSource, ConfigValidator};
