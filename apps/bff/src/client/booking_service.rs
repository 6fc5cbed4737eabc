//! # Booking Service クライアント
//!
//! レビュー（`ReviewService`）の RPC を担当する。

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::rpc::{ById, RemoteRequest, RpcError, RpcTransport};

const REVIEW_SERVICE: &str = "ReviewService";

// --- リクエスト型 ---

/// レビュー作成
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub service_id: Uuid,
    pub review:     String,
    pub rating:     i64,
}

/// レビュー更新（未指定の項目は変更しない）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReview {
    pub id:     Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}

/// レビュー一覧の絞り込み
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page:       Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit:      Option<i64>,
}

/// レビュー関連の Booking Service クライアントトレイト
#[async_trait]
pub trait ReviewClient: Send + Sync {
    async fn create_review(&self, req: &RemoteRequest<CreateReview>) -> Result<Value, RpcError>;

    async fn find_review(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError>;

    async fn update_review(&self, req: &RemoteRequest<UpdateReview>) -> Result<Value, RpcError>;

    async fn delete_review(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError>;

    async fn list_reviews(&self, req: &RemoteRequest<ReviewQuery>) -> Result<Value, RpcError>;
}

/// Booking Service クライアント実装
#[derive(Debug, Clone)]
pub struct BookingServiceClientImpl {
    rpc: RpcTransport,
}

impl BookingServiceClientImpl {
    /// # 引数
    ///
    /// - `base_url`: Booking Service のベース URL（例: `http://localhost:4002`）
    pub fn new(base_url: &str) -> Self {
        Self {
            rpc: RpcTransport::new(base_url),
        }
    }
}

#[async_trait]
impl ReviewClient for BookingServiceClientImpl {
    async fn create_review(&self, req: &RemoteRequest<CreateReview>) -> Result<Value, RpcError> {
        self.rpc.call(REVIEW_SERVICE, "CreateReview", req).await
    }

    async fn find_review(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.rpc.call(REVIEW_SERVICE, "FindReview", req).await
    }

    async fn update_review(&self, req: &RemoteRequest<UpdateReview>) -> Result<Value, RpcError> {
        self.rpc.call(REVIEW_SERVICE, "UpdateReview", req).await
    }

    async fn delete_review(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.rpc.call(REVIEW_SERVICE, "DeleteReview", req).await
    }

    async fn list_reviews(&self, req: &RemoteRequest<ReviewQuery>) -> Result<Value, RpcError> {
        self.rpc.call(REVIEW_SERVICE, "ListReviews", req).await
    }
}
