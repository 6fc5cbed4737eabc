//! # E-commerce Service クライアント
//!
//! カート（`CartService`）と注文（`OrderService`）の RPC を担当する。

use async_trait::async_trait;
use gatehouse_domain::order::{OrderStatus, PaymentMethod};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::rpc::{ById, NoPayload, RemoteRequest, RpcError, RpcTransport};

const CART_SERVICE: &str = "CartService";
const ORDER_SERVICE: &str = "OrderService";

// --- リクエスト型 ---

/// カートへの商品追加
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItem {
    pub product_id: Uuid,
    pub quantity:   i64,
}

/// カート内商品の数量変更
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItem {
    pub item_id:  Uuid,
    pub quantity: i64,
}

/// 注文作成（カート内の商品から注文する）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub item_ids:         Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_id:       Option<Uuid>,
    pub payment_method:   PaymentMethod,
    pub delivery_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note:             Option<String>,
}

/// 注文一覧の絞り込み
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page:   Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit:  Option<i64>,
}

/// 注文キャンセル
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrder {
    pub order_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason:   Option<String>,
}

/// 注文ステータス更新
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatus {
    pub order_id: Uuid,
    pub status:   OrderStatus,
}

/// カート関連の E-commerce Service クライアントトレイト
#[async_trait]
pub trait CartClient: Send + Sync {
    async fn add_item(&self, req: &RemoteRequest<AddCartItem>) -> Result<Value, RpcError>;

    async fn get_cart(&self, req: &RemoteRequest<NoPayload>) -> Result<Value, RpcError>;

    async fn update_item(&self, req: &RemoteRequest<UpdateCartItem>) -> Result<Value, RpcError>;

    async fn remove_item(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError>;
}

/// 注文関連の E-commerce Service クライアントトレイト
#[async_trait]
pub trait OrderClient: Send + Sync {
    async fn create_order(&self, req: &RemoteRequest<CreateOrder>) -> Result<Value, RpcError>;

    async fn find_order(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError>;

    async fn list_orders(&self, req: &RemoteRequest<OrderQuery>) -> Result<Value, RpcError>;

    async fn cancel_order(&self, req: &RemoteRequest<CancelOrder>) -> Result<Value, RpcError>;

    async fn update_order_status(
        &self,
        req: &RemoteRequest<UpdateOrderStatus>,
    ) -> Result<Value, RpcError>;
}

/// E-commerce Service クライアント実装
///
/// カートと注文の両トレイトを実装する。
#[derive(Debug, Clone)]
pub struct EcommerceServiceClientImpl {
    rpc: RpcTransport,
}

impl EcommerceServiceClientImpl {
    /// # 引数
    ///
    /// - `base_url`: E-commerce Service のベース URL（例: `http://localhost:4003`）
    pub fn new(base_url: &str) -> Self {
        Self {
            rpc: RpcTransport::new(base_url),
        }
    }
}

#[async_trait]
impl CartClient for EcommerceServiceClientImpl {
    async fn add_item(&self, req: &RemoteRequest<AddCartItem>) -> Result<Value, RpcError> {
        self.rpc.call(CART_SERVICE, "AddItem", req).await
    }

    async fn get_cart(&self, req: &RemoteRequest<NoPayload>) -> Result<Value, RpcError> {
        self.rpc.call(CART_SERVICE, "GetCart", req).await
    }

    async fn update_item(&self, req: &RemoteRequest<UpdateCartItem>) -> Result<Value, RpcError> {
        self.rpc.call(CART_SERVICE, "UpdateItem", req).await
    }

    async fn remove_item(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.rpc.call(CART_SERVICE, "RemoveItem", req).await
    }
}

#[async_trait]
impl OrderClient for EcommerceServiceClientImpl {
    async fn create_order(&self, req: &RemoteRequest<CreateOrder>) -> Result<Value, RpcError> {
        self.rpc.call(ORDER_SERVICE, "CreateOrder", req).await
    }

    async fn find_order(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.rpc.call(ORDER_SERVICE, "FindOrder", req).await
    }

    async fn list_orders(&self, req: &RemoteRequest<OrderQuery>) -> Result<Value, RpcError> {
        self.rpc.call(ORDER_SERVICE, "ListOrders", req).await
    }

    async fn cancel_order(&self, req: &RemoteRequest<CancelOrder>) -> Result<Value, RpcError> {
        self.rpc.call(ORDER_SERVICE, "CancelOrder", req).await
    }

    async fn update_order_status(
        &self,
        req: &RemoteRequest<UpdateOrderStatus>,
    ) -> Result<Value, RpcError> {
        self.rpc.call(ORDER_SERVICE, "UpdateOrderStatus", req).await
    }
}
