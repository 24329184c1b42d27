//! Query objects the facade assembles itself
//!
//! Connectors only accept pre-shaped search requests, so an id lookup is
//! encoded as a degenerate term query.

use domain::{DocType, QueryObject, SearchRequest};

/// Field holding the document id in the search index
pub const ID_FIELD: &str = "_id";

/// Field on order documents naming the customer
pub const ORDER_USER_FIELD: &str = "userId";

/// Exact-match lookup of one product by id
pub fn product_by_id(index: &str, product_id: &str) -> SearchRequest {
    SearchRequest::new(
        index,
        DocType::Product,
        QueryObject::term(ID_FIELD, product_id),
    )
}

/// Orders placed by one user
pub fn orders_by_user(user_id: &str) -> QueryObject {
    QueryObject::matching(ORDER_USER_FIELD, user_id)
}
