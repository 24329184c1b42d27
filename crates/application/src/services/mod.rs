//! Application Services
//!
//! The store facade and the query objects it builds on its own.

pub mod query_builder;
pub mod store_facade;

// Re-export services
pub use store_facade::{StoreFacade, StoreFacadeBuilder};
