//! Domain Value Objects - Immutable domain concepts
//!
//! Value objects carry no identity and never change after construction.

pub mod doc_type;

pub use doc_type::DocType;
