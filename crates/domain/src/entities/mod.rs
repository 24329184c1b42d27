//! Domain Entities - the structured values exchanged with the connector
//!
//! Built fresh per call and never mutated afterwards.

mod search_query;

pub use search_query::{Clause, QueryObject, SearchRequest};
