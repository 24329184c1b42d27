//! Recording connector for tests
//!
//! Implements the full [`Connector`] contract without a backend: every call
//! is appended to a log as a [`ConnectorCall`] and answered with a canned
//! payload or a canned error.

use async_trait::async_trait;
use domain::{DocType, Payload, QueryObject, SearchRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::{ConnectorError, ConnectorResult};
use crate::ports::{Connector, SessionFlow};

/// One recorded connector invocation with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorCall {
    AddGeneralCategory { form: Payload },
    AddCategory { form: Payload },
    AddAttribute { form: Payload, category_id: String },
    AddTag { form: Payload, category_id: String },
    AddProduct { product: Payload },
    GetOneProduct { request: SearchRequest },
    RequestData { index: String, doc_type: DocType, query: QueryObject },
    RequestFullData { index: String, doc_type: DocType, query: QueryObject },
    RequestItemsTotal { index: String, doc_type: DocType, query: QueryObject },
    GetBasketContent { id: String },
    GetBasketHistoryById { id: String },
    SetNewBasket { id: String, basket: Payload },
    GetComparison { id: String },
    AddProductToComparison { id: String, product: Payload },
    RemoveProductFromComparison { id: String, item_id: String },
    Register { email: String, password: String },
    RegisterUser { form: Payload },
    GetUserData { uid: String },
    LoginEmail { email: String, password: String },
    Logout,
    ResetPassword { email: String },
    CheckOldSessionFlow { device_id: String },
    ConnectSessionFlowToDb {
        /// Device the tracker itself reports
        tracker_device_id: String,
        device_id: String,
        session_id: String,
    },
    GetVisitedRoutes,
    GetUserClicks,
    GetAuth,
    SaveOrder { order: Payload },
    GetOrderById { id: String },
    AddPaymentRequest { data: Payload, method: String },
    ListenPaymentResponse { key: String },
}

impl ConnectorCall {
    /// Connector method name of this call
    pub fn operation(&self) -> &'static str {
        match self {
            Self::AddGeneralCategory { .. } => "add_general_category",
            Self::AddCategory { .. } => "add_category",
            Self::AddAttribute { .. } => "add_attribute",
            Self::AddTag { .. } => "add_tag",
            Self::AddProduct { .. } => "add_product",
            Self::GetOneProduct { .. } => "get_one_product",
            Self::RequestData { .. } => "request_data",
            Self::RequestFullData { .. } => "request_full_data",
            Self::RequestItemsTotal { .. } => "request_items_total",
            Self::GetBasketContent { .. } => "get_basket_content",
            Self::GetBasketHistoryById { .. } => "get_basket_history_by_id",
            Self::SetNewBasket { .. } => "set_new_basket",
            Self::GetComparison { .. } => "get_comparison",
            Self::AddProductToComparison { .. } => "add_product_to_comparison",
            Self::RemoveProductFromComparison { .. } => "remove_product_from_comparison",
            Self::Register { .. } => "register",
            Self::RegisterUser { .. } => "register_user",
            Self::GetUserData { .. } => "get_user_data",
            Self::LoginEmail { .. } => "login_email",
            Self::Logout => "logout",
            Self::ResetPassword { .. } => "reset_password",
            Self::CheckOldSessionFlow { .. } => "check_old_session_flow",
            Self::ConnectSessionFlowToDb { .. } => "connect_session_flow_to_db",
            Self::GetVisitedRoutes => "get_visited_routes",
            Self::GetUserClicks => "get_user_clicks",
            Self::GetAuth => "get_auth",
            Self::SaveOrder { .. } => "save_order",
            Self::GetOrderById { .. } => "get_order_by_id",
            Self::AddPaymentRequest { .. } => "add_payment_request",
            Self::ListenPaymentResponse { .. } => "listen_payment_response",
        }
    }
}

#[derive(Default)]
struct Script {
    response: Payload,
    failure: Option<ConnectorError>,
    failures_by_operation: HashMap<&'static str, ConnectorError>,
}

/// Connector double that records calls and replays canned outcomes
#[derive(Clone, Default)]
pub struct RecordingConnector {
    calls: Arc<Mutex<Vec<ConnectorCall>>>,
    script: Arc<Mutex<Script>>,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every successful call with `response` (default `null`)
    pub fn respond_with(self, response: Payload) -> Self {
        lock(&self.script).response = response;
        self
    }

    /// Fail every call with `error`
    pub fn fail_with(self, error: ConnectorError) -> Self {
        lock(&self.script).failure = Some(error);
        self
    }

    /// Fail only calls to `operation`
    pub fn fail_operation(self, operation: &'static str, error: ConnectorError) -> Self {
        lock(&self.script)
            .failures_by_operation
            .insert(operation, error);
        self
    }

    /// Snapshot of every call so far, oldest first
    pub fn calls(&self) -> Vec<ConnectorCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Number of recorded calls to one connector method
    pub fn count_of(&self, operation: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    pub fn last_call(&self) -> Option<ConnectorCall> {
        lock(&self.calls).last().cloned()
    }

    fn record(&self, call: ConnectorCall) -> ConnectorResult<Payload> {
        let operation = call.operation();
        lock(&self.calls).push(call);

        let script = lock(&self.script);
        if let Some(error) = script.failures_by_operation.get(operation) {
            return Err(error.clone());
        }
        match &script.failure {
            Some(error) => Err(error.clone()),
            None => Ok(script.response.clone()),
        }
    }
}

// A panicking test must not hide the calls recorded before it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Connector for RecordingConnector {
    async fn add_general_category(&self, form: Payload) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::AddGeneralCategory { form })
    }

    async fn add_category(&self, form: Payload) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::AddCategory { form })
    }

    async fn add_attribute(&self, form: Payload, category_id: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::AddAttribute { form, category_id })
    }

    async fn add_tag(&self, form: Payload, category_id: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::AddTag { form, category_id })
    }

    async fn add_product(&self, product: Payload) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::AddProduct { product })
    }

    async fn get_one_product(&self, request: SearchRequest) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::GetOneProduct { request })
    }

    async fn request_data(
        &self,
        index: String,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::RequestData {
            index,
            doc_type,
            query,
        })
    }

    async fn request_full_data(
        &self,
        index: String,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::RequestFullData {
            index,
            doc_type,
            query,
        })
    }

    async fn request_items_total(
        &self,
        index: String,
        doc_type: DocType,
        query: QueryObject,
    ) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::RequestItemsTotal {
            index,
            doc_type,
            query,
        })
    }

    async fn get_basket_content(&self, id: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::GetBasketContent { id })
    }

    async fn get_basket_history_by_id(&self, id: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::GetBasketHistoryById { id })
    }

    async fn set_new_basket(&self, id: String, basket: Payload) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::SetNewBasket { id, basket })
    }

    async fn get_comparison(&self, id: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::GetComparison { id })
    }

    async fn add_product_to_comparison(
        &self,
        id: String,
        product: Payload,
    ) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::AddProductToComparison { id, product })
    }

    async fn remove_product_from_comparison(
        &self,
        id: String,
        item_id: String,
    ) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::RemoveProductFromComparison { id, item_id })
    }

    async fn register(&self, email: String, password: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::Register { email, password })
    }

    async fn register_user(&self, form: Payload) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::RegisterUser { form })
    }

    async fn get_user_data(&self, uid: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::GetUserData { uid })
    }

    async fn login_email(&self, email: String, password: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::LoginEmail { email, password })
    }

    async fn logout(&self) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::Logout)
    }

    async fn reset_password(&self, email: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::ResetPassword { email })
    }

    async fn check_old_session_flow(&self, device_id: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::CheckOldSessionFlow { device_id })
    }

    async fn connect_session_flow_to_db(
        &self,
        tracker: Arc<dyn SessionFlow>,
        device_id: String,
        session_id: String,
    ) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::ConnectSessionFlowToDb {
            tracker_device_id: tracker.device_id().to_string(),
            device_id,
            session_id,
        })
    }

    async fn get_visited_routes(&self) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::GetVisitedRoutes)
    }

    async fn get_user_clicks(&self) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::GetUserClicks)
    }

    async fn get_auth(&self) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::GetAuth)
    }

    async fn save_order(&self, order: Payload) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::SaveOrder { order })
    }

    async fn get_order_by_id(&self, id: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::GetOrderById { id })
    }

    async fn add_payment_request(&self, data: Payload, method: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::AddPaymentRequest { data, method })
    }

    async fn listen_payment_response(&self, key: String) -> ConnectorResult<Payload> {
        self.record(ConnectorCall::ListenPaymentResponse { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_and_replays() {
        let connector = RecordingConnector::new().respond_with(json!({"ok": true}));

        let result = connector.get_basket_content("dev-1".to_string()).await;
        assert_eq!(result.unwrap(), json!({"ok": true}));
        assert_eq!(
            connector.last_call(),
            Some(ConnectorCall::GetBasketContent {
                id: "dev-1".to_string()
            })
        );
        assert_eq!(connector.count_of("get_basket_content"), 1);
    }

    #[tokio::test]
    async fn test_failure_for_one_operation_only() {
        let connector = RecordingConnector::new()
            .fail_operation("logout", ConnectorError::network("offline"));

        assert!(connector.logout().await.is_err());
        assert!(connector.get_auth().await.is_ok());
        assert_eq!(connector.call_count(), 2);
    }
}
