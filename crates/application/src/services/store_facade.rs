//! Store Facade
//!
//! Domain-shaped entry point for catalog, basket, comparison, user, order
//! and payment operations. Every method issues exactly one connector call
//! and returns the connector's result untouched, errors included. The only
//! logic of its own is building the search requests for product and order
//! lookups (see [`query_builder`](super::query_builder)).

use common::OperationTimer;
use domain::config::DEFAULT_SEARCH_INDEX;
use domain::{DocType, FacadeConfig, Payload, QueryObject};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::query_builder;
use crate::errors::{ApplicationError, ConnectorResult};
use crate::ports::{Connector, SessionFlow};
use crate::ApplicationResult;

/// Facade over a single injected [`Connector`]
///
/// Stateless apart from the connector handle and the search index name, so
/// it is cheap to clone and safe to share between tasks as long as the
/// connector is.
#[derive(Clone)]
pub struct StoreFacade {
    connector: Arc<dyn Connector>,
    index: String,
}

impl StoreFacade {
    /// Facade using `index` exactly as given
    ///
    /// No checks happen here. Use [`StoreFacade::builder`] to reject a
    /// missing connector or a blank index up front.
    pub fn new(connector: Arc<dyn Connector>, index: impl Into<String>) -> Self {
        Self {
            connector,
            index: index.into(),
        }
    }

    /// Facade using the index from loaded configuration
    pub fn from_config(connector: Arc<dyn Connector>, config: &FacadeConfig) -> Self {
        Self::new(connector, config.search.index.clone())
    }

    pub fn builder() -> StoreFacadeBuilder {
        StoreFacadeBuilder::default()
    }

    /// Search index used for the queries the facade builds
    pub fn index(&self) -> &str {
        &self.index
    }

    // Catalog writes

    #[instrument(level = "debug", skip_all)]
    pub async fn add_general_category(&self, form: Payload) -> ConnectorResult<Payload> {
        observe(
            "add_general_category",
            self.connector.add_general_category(form),
        )
        .await
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn add_category(&self, form: Payload) -> ConnectorResult<Payload> {
        observe("add_category", self.connector.add_category(form)).await
    }

    #[instrument(level = "debug", skip(self, form))]
    pub async fn add_attribute(
        &self,
        form: Payload,
        category_id: &str,
    ) -> ConnectorResult<Payload> {
        observe(
            "add_attribute",
            self.connector.add_attribute(form, category_id.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip(self, form))]
    pub async fn add_tag(&self, form: Payload, category_id: &str) -> ConnectorResult<Payload> {
        observe(
            "add_tag",
            self.connector.add_tag(form, category_id.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn add_product(&self, product: Payload) -> ConnectorResult<Payload> {
        observe("add_product", self.connector.add_product(product)).await
    }

    // Catalog reads

    /// Fetch one product through an exact `_id` term query
    ///
    /// The raw id never reaches the connector, only the search request.
    #[instrument(level = "debug", skip(self), fields(index = %self.index))]
    pub async fn get_one_product(&self, product_id: &str) -> ConnectorResult<Payload> {
        let request = query_builder::product_by_id(&self.index, product_id);
        observe("get_one_product", self.connector.get_one_product(request)).await
    }

    /// Products matching a query prepared by a higher-level service
    #[instrument(level = "debug", skip_all, fields(index = %self.index))]
    pub async fn get_products_by_ids(&self, query: QueryObject) -> ConnectorResult<Payload> {
        self.request_pinned("get_products_by_ids", DocType::Product, query)
            .await
    }

    #[instrument(level = "debug", skip_all, fields(index = %self.index))]
    pub async fn get_tags(&self, query: QueryObject) -> ConnectorResult<Payload> {
        self.request_pinned("get_tags", DocType::Tags, query).await
    }

    #[instrument(level = "debug", skip_all, fields(index = %self.index))]
    pub async fn get_attributes(&self, query: QueryObject) -> ConnectorResult<Payload> {
        self.request_pinned("get_attributes", DocType::Attributes, query)
            .await
    }

    #[instrument(level = "debug", skip(self, query))]
    pub async fn request_data(
        &self,
        index: &str,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload> {
        observe(
            "request_data",
            self.connector
                .request_data(index.to_string(), doc_type, query),
        )
        .await
    }

    #[instrument(level = "debug", skip(self, query))]
    pub async fn request_full_data(
        &self,
        index: &str,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload> {
        observe(
            "request_full_data",
            self.connector
                .request_full_data(index.to_string(), doc_type, query),
        )
        .await
    }

    /// Hit count for `query`, always against the caller's `doc_type`
    #[instrument(level = "debug", skip(self, query))]
    pub async fn request_items_total(
        &self,
        index: &str,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload> {
        observe(
            "request_items_total",
            self.connector
                .request_items_total(index.to_string(), doc_type, query),
        )
        .await
    }

    // Basket

    #[instrument(level = "debug", skip(self))]
    pub async fn get_basket_content(&self, id: &str) -> ConnectorResult<Payload> {
        observe(
            "get_basket_content",
            self.connector.get_basket_content(id.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_basket_history_by_id(&self, id: &str) -> ConnectorResult<Payload> {
        observe(
            "get_basket_history_by_id",
            self.connector.get_basket_history_by_id(id.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip(self, basket))]
    pub async fn set_new_basket(&self, id: &str, basket: Payload) -> ConnectorResult<Payload> {
        observe(
            "set_new_basket",
            self.connector.set_new_basket(id.to_string(), basket),
        )
        .await
    }

    // Comparison

    #[instrument(level = "debug", skip(self))]
    pub async fn get_comparison(&self, id: &str) -> ConnectorResult<Payload> {
        observe(
            "get_comparison",
            self.connector.get_comparison(id.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip(self, product))]
    pub async fn add_product_to_comparison(
        &self,
        id: &str,
        product: Payload,
    ) -> ConnectorResult<Payload> {
        observe(
            "add_product_to_comparison",
            self.connector
                .add_product_to_comparison(id.to_string(), product),
        )
        .await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn remove_product_from_comparison(
        &self,
        id: &str,
        item_id: &str,
    ) -> ConnectorResult<Payload> {
        observe(
            "remove_product_from_comparison",
            self.connector
                .remove_product_from_comparison(id.to_string(), item_id.to_string()),
        )
        .await
    }

    // Users and sessions

    #[instrument(level = "debug", skip_all)]
    pub async fn register(&self, email: &str, password: &str) -> ConnectorResult<Payload> {
        observe(
            "register",
            self.connector
                .register(email.to_string(), password.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn register_user(&self, form: Payload) -> ConnectorResult<Payload> {
        observe("register_user", self.connector.register_user(form)).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_user_data(&self, uid: &str) -> ConnectorResult<Payload> {
        observe(
            "get_user_data",
            self.connector.get_user_data(uid.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn login_email(&self, email: &str, password: &str) -> ConnectorResult<Payload> {
        observe(
            "login_email",
            self.connector
                .login_email(email.to_string(), password.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn logout(&self) -> ConnectorResult<Payload> {
        observe("logout", self.connector.logout()).await
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn reset_password(&self, email: &str) -> ConnectorResult<Payload> {
        observe(
            "reset_password",
            self.connector.reset_password(email.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn check_old_session_flow(&self, device_id: &str) -> ConnectorResult<Payload> {
        observe(
            "check_old_session_flow",
            self.connector
                .check_old_session_flow(device_id.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip(self, tracker))]
    pub async fn connect_session_flow_to_db(
        &self,
        tracker: Arc<dyn SessionFlow>,
        device_id: &str,
        session_id: &str,
    ) -> ConnectorResult<Payload> {
        observe(
            "connect_session_flow_to_db",
            self.connector.connect_session_flow_to_db(
                tracker,
                device_id.to_string(),
                session_id.to_string(),
            ),
        )
        .await
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn get_visited_routes(&self) -> ConnectorResult<Payload> {
        observe("get_visited_routes", self.connector.get_visited_routes()).await
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn get_user_clicks(&self) -> ConnectorResult<Payload> {
        observe("get_user_clicks", self.connector.get_user_clicks()).await
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn get_auth(&self) -> ConnectorResult<Payload> {
        observe("get_auth", self.connector.get_auth()).await
    }

    // Orders and payments

    #[instrument(level = "debug", skip_all)]
    pub async fn save_order(&self, order: Payload) -> ConnectorResult<Payload> {
        observe("save_order", self.connector.save_order(order)).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_order_by_id(&self, id: &str) -> ConnectorResult<Payload> {
        observe(
            "get_order_by_id",
            self.connector.get_order_by_id(id.to_string()),
        )
        .await
    }

    /// Orders of one user through a `userId` match query
    #[instrument(level = "debug", skip(self), fields(index = %self.index))]
    pub async fn get_orders_by_user_id(&self, user_id: &str) -> ConnectorResult<Payload> {
        let query = query_builder::orders_by_user(user_id);
        observe(
            "get_orders_by_user_id",
            self.connector
                .request_data(self.index.clone(), DocType::Orders, query),
        )
        .await
    }

    #[instrument(level = "debug", skip(self, data))]
    pub async fn add_payment_request(
        &self,
        data: Payload,
        method: &str,
    ) -> ConnectorResult<Payload> {
        observe(
            "add_payment_request",
            self.connector
                .add_payment_request(data, method.to_string()),
        )
        .await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn listen_payment_response(&self, key: &str) -> ConnectorResult<Payload> {
        observe(
            "listen_payment_response",
            self.connector.listen_payment_response(key.to_string()),
        )
        .await
    }

    async fn request_pinned(
        &self,
        operation: &'static str,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload> {
        observe(
            operation,
            self.connector
                .request_data(self.index.clone(), doc_type, query),
        )
        .await
    }
}

impl fmt::Debug for StoreFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreFacade")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Await one connector call, log its duration and outcome, hand it back as is
async fn observe<F>(operation: &'static str, call: F) -> ConnectorResult<Payload>
where
    F: Future<Output = ConnectorResult<Payload>>,
{
    let mut timer = OperationTimer::new(operation);
    let result = call.await;

    if let Err(e) = &result {
        timer.add_field("category", e.category());
    }
    timer.finish_with_result(&result);

    result
}

/// Builder that refuses to produce a facade without a connector
#[derive(Default)]
pub struct StoreFacadeBuilder {
    connector: Option<Arc<dyn Connector>>,
    index: Option<String>,
}

impl StoreFacadeBuilder {
    pub fn connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = Some(connector);
        self
    }

    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Take the index name from loaded configuration
    pub fn config(self, config: &FacadeConfig) -> Self {
        self.index(config.search.index.clone())
    }

    pub fn build(self) -> ApplicationResult<StoreFacade> {
        let connector = self.connector.ok_or(ApplicationError::MissingConnector)?;
        let index = self
            .index
            .unwrap_or_else(|| DEFAULT_SEARCH_INDEX.to_string());

        if index.trim().is_empty() {
            return Err(ApplicationError::configuration(
                "search index name cannot be empty",
            ));
        }

        debug!(index = %index, "store facade assembled");
        Ok(StoreFacade::new(connector, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConnectorError;
    use crate::ports::MockConnector;
    use mockall::predicate::eq;
    use serde_json::json;

    fn facade(mock: MockConnector) -> StoreFacade {
        StoreFacade::new(Arc::new(mock), "firebase")
    }

    #[tokio::test]
    async fn test_get_one_product_sends_term_query() {
        let mut mock = MockConnector::new();
        mock.expect_get_one_product()
            .withf(|request| {
                request.to_value()
                    == json!({
                        "index": "firebase",
                        "type": "product",
                        "query": {"query": {"term": {"_id": "abc123"}}}
                    })
            })
            .times(1)
            .returning(|_| Ok(json!({"name": "Lamp"})));

        let result = facade(mock).get_one_product("abc123").await.unwrap();
        assert_eq!(result, json!({"name": "Lamp"}));
    }

    #[tokio::test]
    async fn test_get_orders_by_user_id_goes_through_request_data() {
        let mut mock = MockConnector::new();
        mock.expect_request_data()
            .with(
                eq("firebase".to_string()),
                eq(DocType::Orders),
                eq(QueryObject::from_value(
                    json!({"query": {"match": {"userId": "u42"}}}),
                )),
            )
            .times(1)
            .returning(|_, _, _| Ok(json!([])));

        facade(mock).get_orders_by_user_id("u42").await.unwrap();
    }

    #[tokio::test]
    async fn test_pinned_reads_select_type() {
        let query = QueryObject::from_value(json!({"query": {"ids": {"values": ["p1", "p2"]}}}));

        for (doc_type, which) in [
            (DocType::Product, 0),
            (DocType::Tags, 1),
            (DocType::Attributes, 2),
        ] {
            let mut mock = MockConnector::new();
            mock.expect_request_data()
                .with(eq("catalog".to_string()), eq(doc_type), eq(query.clone()))
                .times(1)
                .returning(|_, _, _| Ok(json!({"hits": []})));

            let facade = StoreFacade::new(Arc::new(mock), "catalog");
            let result = match which {
                0 => facade.get_products_by_ids(query.clone()).await,
                1 => facade.get_tags(query.clone()).await,
                _ => facade.get_attributes(query.clone()).await,
            };
            assert_eq!(result.unwrap(), json!({"hits": []}));
        }
    }

    #[tokio::test]
    async fn test_request_items_total_keeps_caller_type() {
        let query = QueryObject::matching("category", "lamps");
        let mut mock = MockConnector::new();
        mock.expect_request_items_total()
            .with(
                eq("firebase".to_string()),
                eq(DocType::Tags),
                eq(query.clone()),
            )
            .times(1)
            .returning(|_, _, _| Ok(json!(12)));

        let total = facade(mock)
            .request_items_total("firebase", DocType::Tags, query)
            .await
            .unwrap();
        assert_eq!(total, json!(12));
    }

    #[tokio::test]
    async fn test_add_attribute_forwards_form_and_category() {
        let form = json!({"name": "colour", "values": ["red", "blue"]});
        let mut mock = MockConnector::new();
        mock.expect_add_attribute()
            .with(eq(form.clone()), eq("cat-9".to_string()))
            .times(1)
            .returning(|_, _| Ok(json!({"key": "attr-1"})));

        let handle = facade(mock).add_attribute(form, "cat-9").await.unwrap();
        assert_eq!(handle, json!({"key": "attr-1"}));
    }

    #[tokio::test]
    async fn test_login_failure_is_returned_unchanged() {
        let failure = ConnectorError::unauthorized("auth/wrong-password");
        let returned = failure.clone();

        let mut mock = MockConnector::new();
        mock.expect_login_email()
            .times(1)
            .returning(move |_, _| Err(returned.clone()));

        let err = facade(mock)
            .login_email("ann@example.com", "hunter2")
            .await
            .unwrap_err();
        assert_eq!(err, failure);
    }

    #[test]
    fn test_builder_requires_connector() {
        let err = StoreFacade::builder().index("firebase").build().unwrap_err();
        assert!(matches!(err, ApplicationError::MissingConnector));
    }

    #[test]
    fn test_builder_rejects_blank_index() {
        let err = StoreFacade::builder()
            .connector(Arc::new(MockConnector::new()))
            .index("  ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration { .. }));
    }

    #[test]
    fn test_builder_uses_configured_index() {
        let mut config = FacadeConfig::default();
        config.search.index = "shop".to_string();

        let facade = StoreFacade::builder()
            .connector(Arc::new(MockConnector::new()))
            .config(&config)
            .build()
            .unwrap();
        assert_eq!(facade.index(), "shop");

        let facade = StoreFacade::builder()
            .connector(Arc::new(MockConnector::new()))
            .build()
            .unwrap();
        assert_eq!(facade.index(), DEFAULT_SEARCH_INDEX);
    }

    #[test]
    fn test_new_keeps_index_verbatim_while_builder_checks_it() {
        let facade = StoreFacade::new(Arc::new(MockConnector::new()), "");
        assert_eq!(facade.index(), "");

        let built = StoreFacade::builder()
            .connector(Arc::new(MockConnector::new()))
            .index("")
            .build();
        assert!(matches!(built, Err(ApplicationError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_observe_hands_back_outcome_unchanged() {
        let ok = observe("get_auth", async { Ok(json!({"uid": "u1"})) }).await;
        assert_eq!(ok, Ok(json!({"uid": "u1"})));

        let failure = ConnectorError::not_found("order", "o-1");
        let err = observe("get_order_by_id", async { Err(failure.clone()) }).await;
        assert_eq!(err, Err(failure));
    }
}
