//! 結合テスト共通のスタブとヘルパー
//!
//! 下流サービスはすべて [`StubBackend`] 1 つで代替し、呼び出し回数と
//! 送信されたリクエストを記録する。

#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use gatehouse_bff::{
    app_builder::{AppDependencies, build_app},
    client::{
        AuthServiceClient,
        AuthServiceError,
        ById,
        CartClient,
        NoPayload,
        OrderClient,
        PolicyClient,
        RemoteRequest,
        ReviewClient,
        RpcError,
        SubscriptionClient,
        UpstreamError,
        UpstreamForwarder,
        UpstreamRequest,
        UpstreamResponse,
        VnpayConfigClient,
        booking_service::{CreateReview, ReviewQuery, UpdateReview},
        ecommerce_service::{
            AddCartItem,
            CancelOrder,
            CreateOrder,
            OrderQuery,
            UpdateCartItem,
            UpdateOrderStatus,
        },
        tenant_service::{
            CreatePolicy,
            CreateSubscription,
            CreateVnpayConfig,
            PolicyLookup,
            SubscriptionQuery,
            UpdatePolicy,
            UpdateSubscription,
            UpdateVnpayConfig,
        },
    },
    config::ServiceUrlMap,
    handler::ReadinessState,
    middleware::request_id::current_request_id,
};
use gatehouse_domain::{Principal, Role};
use serde::Serialize;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const USER_TOKEN: &str = "user-token";
pub const TENANT_TOKEN: &str = "tenant-token";
pub const ADMIN_TOKEN: &str = "admin-token";
/// Auth Service が到達不能になるトークン
pub const AUTH_DOWN_TOKEN: &str = "down";

pub const VALID_ID: &str = "0190a6b2-7c4e-7a1b-9d3f-2e5c8b1a4f60";

// --- Auth Service スタブ ---

pub struct StubAuthServiceClient;

#[async_trait]
impl AuthServiceClient for StubAuthServiceClient {
    async fn verify_token(&self, access_token: &str) -> Result<Principal, AuthServiceError> {
        let role = match access_token {
            USER_TOKEN => Role::User,
            TENANT_TOKEN => Role::Tenant,
            ADMIN_TOKEN => Role::Admin,
            AUTH_DOWN_TOKEN => return Err(AuthServiceError::ServiceUnavailable),
            _ => return Err(AuthServiceError::InvalidToken),
        };
        Ok(Principal::new(
            format!("{}@example.com", role.to_string().to_lowercase()),
            "salon.example.com",
            role,
            access_token,
        ))
    }
}

// --- 下流サービススタブ ---

/// 記録された RPC 呼び出し
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation:  &'static str,
    pub payload:    Value,
    pub request_id: Option<String>,
}

/// すべての下流クライアントトレイトを実装するスタブ
pub struct StubBackend {
    reply: Mutex<Result<Value, RpcError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Ok(json!({ "id": VALID_ID }))),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn reply_with(&self, reply: Result<Value, RpcError>) {
        *self.reply.lock().unwrap() = reply;
    }

    /// `{"error": "<code>"}` で失敗させる
    pub fn fail_with_code(&self, code: &str) {
        self.fail_with_details(&json!({ "error": code }).to_string());
    }

    pub fn fail_with_details(&self, details: &str) {
        self.reply_with(Err(RpcError::Remote {
            status:  400,
            details: details.to_string(),
        }));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record<T: Serialize>(
        &self,
        operation: &'static str,
        req: &RemoteRequest<T>,
    ) -> Result<Value, RpcError> {
        self.calls.lock().unwrap().push(RecordedCall {
            operation,
            payload: serde_json::to_value(req).unwrap(),
            request_id: current_request_id(),
        });
        self.reply.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewClient for StubBackend {
    async fn create_review(&self, req: &RemoteRequest<CreateReview>) -> Result<Value, RpcError> {
        self.record("ReviewService/Create", req)
    }

    async fn find_review(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.record("ReviewService/FindOne", req)
    }

    async fn update_review(&self, req: &RemoteRequest<UpdateReview>) -> Result<Value, RpcError> {
        self.record("ReviewService/Update", req)
    }

    async fn delete_review(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.record("ReviewService/Delete", req)
    }

    async fn list_reviews(&self, req: &RemoteRequest<ReviewQuery>) -> Result<Value, RpcError> {
        self.record("ReviewService/FindAll", req)
    }
}

#[async_trait]
impl CartClient for StubBackend {
    async fn add_item(&self, req: &RemoteRequest<AddCartItem>) -> Result<Value, RpcError> {
        self.record("CartService/AddItem", req)
    }

    async fn get_cart(&self, req: &RemoteRequest<NoPayload>) -> Result<Value, RpcError> {
        self.record("CartService/Get", req)
    }

    async fn update_item(&self, req: &RemoteRequest<UpdateCartItem>) -> Result<Value, RpcError> {
        self.record("CartService/UpdateItem", req)
    }

    async fn remove_item(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.record("CartService/RemoveItem", req)
    }
}

#[async_trait]
impl OrderClient for StubBackend {
    async fn create_order(&self, req: &RemoteRequest<CreateOrder>) -> Result<Value, RpcError> {
        self.record("OrderService/Create", req)
    }

    async fn find_order(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.record("OrderService/FindOne", req)
    }

    async fn list_orders(&self, req: &RemoteRequest<OrderQuery>) -> Result<Value, RpcError> {
        self.record("OrderService/FindAll", req)
    }

    async fn cancel_order(&self, req: &RemoteRequest<CancelOrder>) -> Result<Value, RpcError> {
        self.record("OrderService/Cancel", req)
    }

    async fn update_order_status(
        &self,
        req: &RemoteRequest<UpdateOrderStatus>,
    ) -> Result<Value, RpcError> {
        self.record("OrderService/UpdateStatus", req)
    }
}

#[async_trait]
impl SubscriptionClient for StubBackend {
    async fn create_subscription(
        &self,
        req: &RemoteRequest<CreateSubscription>,
    ) -> Result<Value, RpcError> {
        self.record("SubscriptionService/Create", req)
    }

    async fn find_subscription(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.record("SubscriptionService/FindOne", req)
    }

    async fn update_subscription(
        &self,
        req: &RemoteRequest<UpdateSubscription>,
    ) -> Result<Value, RpcError> {
        self.record("SubscriptionService/Update", req)
    }

    async fn delete_subscription(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.record("SubscriptionService/Delete", req)
    }

    async fn list_subscriptions(
        &self,
        req: &RemoteRequest<SubscriptionQuery>,
    ) -> Result<Value, RpcError> {
        self.record("SubscriptionService/FindAll", req)
    }
}

#[async_trait]
impl PolicyClient for StubBackend {
    async fn create_policy(&self, req: &RemoteRequest<CreatePolicy>) -> Result<Value, RpcError> {
        self.record("PolicyService/Create", req)
    }

    async fn find_policy(&self, req: &RemoteRequest<PolicyLookup>) -> Result<Value, RpcError> {
        self.record("PolicyService/FindOne", req)
    }

    async fn update_policy(&self, req: &RemoteRequest<UpdatePolicy>) -> Result<Value, RpcError> {
        self.record("PolicyService/Update", req)
    }

    async fn delete_policy(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.record("PolicyService/Delete", req)
    }
}

#[async_trait]
impl VnpayConfigClient for StubBackend {
    async fn create_vnpay_config(
        &self,
        req: &RemoteRequest<CreateVnpayConfig>,
    ) -> Result<Value, RpcError> {
        self.record("VnpayConfigService/Create", req)
    }

    async fn find_vnpay_config(&self, req: &RemoteRequest<NoPayload>) -> Result<Value, RpcError> {
        self.record("VnpayConfigService/FindOne", req)
    }

    async fn update_vnpay_config(
        &self,
        req: &RemoteRequest<UpdateVnpayConfig>,
    ) -> Result<Value, RpcError> {
        self.record("VnpayConfigService/Update", req)
    }

    async fn delete_vnpay_config(
        &self,
        req: &RemoteRequest<NoPayload>,
    ) -> Result<Value, RpcError> {
        self.record("VnpayConfigService/Delete", req)
    }
}

// --- 汎用プロキシの転送スタブ ---

/// 転送リクエストを記録し、固定のレスポンスを返すスタブ
pub struct RecordingForwarder {
    pub forwarded: Mutex<Vec<UpstreamRequest>>,
}

impl RecordingForwarder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            forwarded: Mutex::new(Vec::new()),
        })
    }

    pub fn forward_count(&self) -> usize {
        self.forwarded.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamForwarder for RecordingForwarder {
    async fn forward(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.forwarded.lock().unwrap().push(request);
        Ok(UpstreamResponse {
            status:       StatusCode::ACCEPTED,
            content_type: Some(header::HeaderValue::from_static("application/json")),
            body:         r#"{"forwarded":true}"#.into(),
        })
    }
}

// --- アプリ構築 ---

/// テスト用の依存一式
pub struct TestDeps {
    pub backend:          Arc<StubBackend>,
    pub forwarder:        Arc<dyn UpstreamForwarder>,
    pub gateway_services: ServiceUrlMap,
    pub well_known_dir:   PathBuf,
    pub readiness:        Vec<(String, String)>,
}

impl TestDeps {
    pub fn new(backend: Arc<StubBackend>) -> Self {
        Self {
            backend,
            forwarder: RecordingForwarder::new(),
            gateway_services: ServiceUrlMap::from_pairs([("payment", "http://payment.internal")]),
            well_known_dir: PathBuf::from("./well-known"),
            readiness: Vec::new(),
        }
    }

    pub fn build(self) -> Router {
        build_app(AppDependencies {
            auth_service_client: Arc::new(StubAuthServiceClient),
            review_client:       self.backend.clone(),
            cart_client:         self.backend.clone(),
            order_client:        self.backend.clone(),
            subscription_client: self.backend.clone(),
            policy_client:       self.backend.clone(),
            vnpay_config_client: self.backend,
            forwarder:           self.forwarder,
            gateway_services:    self.gateway_services,
            well_known_dir:      self.well_known_dir,
            readiness:           ReadinessState {
                http_client: reqwest::Client::new(),
                services:    self.readiness,
            },
        })
    }
}

/// スタブバックエンドでアプリを構築する
pub fn create_test_app(backend: &Arc<StubBackend>) -> Router {
    TestDeps::new(backend.clone()).build()
}

// --- リクエストヘルパー ---

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

/// リクエストを送り、ステータスと JSON ボディを返す
pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = send(app, request).await;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// テストごとに独立した一時ディレクトリを作る
pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::now_v7()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
