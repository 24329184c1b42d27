//! Connector Port
//!
//! The one backend the facade talks to: search index, auth provider and
//! document store behind a single capability set. Implementations live
//! outside this crate.
//!
//! Arguments are owned so an implementation can keep or record them.
//! Return values are opaque [`Payload`]s: materialized documents or
//! reference descriptors, at the connector's discretion.

use async_trait::async_trait;
use domain::{DocType, Payload, QueryObject, SearchRequest};
use std::sync::Arc;

use super::session_flow::SessionFlow;
use crate::errors::{ConnectorError, ConnectorResult};

/// Capability contract every connector fulfils
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connector: Send + Sync {
    // Catalog writes

    async fn add_general_category(&self, form: Payload) -> ConnectorResult<Payload>;

    async fn add_category(&self, form: Payload) -> ConnectorResult<Payload>;

    async fn add_attribute(&self, form: Payload, category_id: String)
        -> ConnectorResult<Payload>;

    async fn add_tag(&self, form: Payload, category_id: String) -> ConnectorResult<Payload>;

    async fn add_product(&self, product: Payload) -> ConnectorResult<Payload>;

    // Catalog reads

    /// Single document lookup expressed as a search request
    async fn get_one_product(&self, request: SearchRequest) -> ConnectorResult<Payload>;

    async fn request_data(
        &self,
        index: String,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload>;

    /// Like `request_data`, but with full document sources
    async fn request_full_data(
        &self,
        index: String,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload>;

    /// Hit count for the query
    async fn request_items_total(
        &self,
        index: String,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload>;

    // Basket

    async fn get_basket_content(&self, id: String) -> ConnectorResult<Payload>;

    async fn get_basket_history_by_id(&self, id: String) -> ConnectorResult<Payload>;

    async fn set_new_basket(&self, id: String, basket: Payload) -> ConnectorResult<Payload>;

    // Comparison
    //
    // The data shape of comparisons is not settled yet. Connectors that do
    // not provide these keep the defaults and report the gap per call.

    async fn get_comparison(&self, _id: String) -> ConnectorResult<Payload> {
        Err(ConnectorError::unsupported("get_comparison"))
    }

    async fn add_product_to_comparison(
        &self,
        _id: String,
        _product: Payload,
    ) -> ConnectorResult<Payload> {
        Err(ConnectorError::unsupported("add_product_to_comparison"))
    }

    async fn remove_product_from_comparison(
        &self,
        _id: String,
        _item_id: String,
    ) -> ConnectorResult<Payload> {
        Err(ConnectorError::unsupported("remove_product_from_comparison"))
    }

    // Auth and session

    async fn register(&self, email: String, password: String) -> ConnectorResult<Payload>;

    async fn register_user(&self, form: Payload) -> ConnectorResult<Payload>;

    async fn get_user_data(&self, uid: String) -> ConnectorResult<Payload>;

    async fn login_email(&self, email: String, password: String) -> ConnectorResult<Payload>;

    async fn logout(&self) -> ConnectorResult<Payload>;

    async fn reset_password(&self, email: String) -> ConnectorResult<Payload>;

    async fn check_old_session_flow(&self, device_id: String) -> ConnectorResult<Payload>;

    async fn connect_session_flow_to_db(
        &self,
        tracker: Arc<dyn SessionFlow>,
        device_id: String,
        session_id: String,
    ) -> ConnectorResult<Payload>;

    async fn get_visited_routes(&self) -> ConnectorResult<Payload>;

    async fn get_user_clicks(&self) -> ConnectorResult<Payload>;

    /// Handle to the auth provider's current state
    async fn get_auth(&self) -> ConnectorResult<Payload>;

    // Orders and payments

    async fn save_order(&self, order: Payload) -> ConnectorResult<Payload>;

    async fn get_order_by_id(&self, id: String) -> ConnectorResult<Payload>;

    async fn add_payment_request(&self, data: Payload, method: String)
        -> ConnectorResult<Payload>;

    async fn listen_payment_response(&self, key: String) -> ConnectorResult<Payload>;
}
