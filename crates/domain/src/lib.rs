//! Domain Layer - storefront data-access model
//!
//! Holds ONLY the values the facade and its callers exchange:
//! - Entities: query objects in the search backend's wire shape
//! - Value Objects: document-type tags
//! - Configuration model (no loading, that lives in infrastructure)
//!
//! No dependencies on connectors, transport or logging backends.

pub mod config;
pub mod entities;
pub mod value_objects;

// Re-export core domain types
pub use config::FacadeConfig;
pub use entities::{Clause, QueryObject, SearchRequest};
pub use value_objects::DocType;

/// Opaque caller-defined structured value (forms, products, orders, baskets)
///
/// Also used for whatever the connector hands back: materialized data or a
/// reference the caller resolves further.
pub type Payload = serde_json::Value;
