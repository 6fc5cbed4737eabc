//! # 注文 API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /ecommerce/order/create` - 注文作成（USER）
//! - `GET /ecommerce/order/list` - 注文一覧（USER / TENANT / ADMIN）
//! - `GET /ecommerce/order/{id}` - 注文取得（USER / TENANT / ADMIN）
//! - `PUT /ecommerce/order/cancel` - 注文キャンセル（USER）
//! - `PUT /ecommerce/order/update-status` - ステータス更新（TENANT）

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{
        Path,
        Query,
        State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use gatehouse_domain::{
    Principal,
    Validate,
    ValidationErrors,
    Violations,
    order::{OrderStatus, PaymentMethod},
};
use serde::Deserialize;

use super::paging;
use crate::{
    adapter::OrderAdapter,
    client::{
        ById,
        ecommerce_service::{CancelOrder, CreateOrder, OrderQuery, UpdateOrderStatus},
    },
    error::BffError,
    extract::{validated_id, validated_json, validated_query},
    middleware::ApiSuccess,
};

/// 注文 API の共有状態
pub struct OrderState {
    pub adapter: OrderAdapter,
}

// --- リクエスト型 ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub item_ids:         Option<Vec<String>>,
    pub voucher_id:       Option<String>,
    pub payment_method:   Option<String>,
    pub delivery_address: Option<String>,
    pub note:             Option<String>,
}

impl Validate for CreateOrderBody {
    type Output = CreateOrder;

    fn validate(self) -> Result<CreateOrder, ValidationErrors> {
        let mut v = Violations::new();
        let item_ids = v.non_empty("itemIds", self.item_ids).and_then(|ids| {
            // 1 件でも不正なら違反は 1 つにまとめる
            let parsed: Option<Vec<_>> = ids
                .iter()
                .map(|id| uuid::Uuid::parse_str(id).ok())
                .collect();
            if parsed.is_none() {
                v.push("each value in itemIds must be a UUID");
            }
            parsed
        });
        let voucher_id = self
            .voucher_id
            .and_then(|id| v.uuid("voucherId", &id));
        let payment_method = v
            .required("paymentMethod", self.payment_method)
            .and_then(|m| v.one_of::<PaymentMethod>("paymentMethod", &m));
        let delivery_address = v.required_text("deliveryAddress", self.delivery_address);
        v.finish(|| {
            Some(CreateOrder {
                item_ids: item_ids?,
                voucher_id,
                payment_method: payment_method?,
                delivery_address: delivery_address?,
                note: self.note,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<String>,
    pub page:   Option<String>,
    pub limit:  Option<String>,
}

impl Validate for ListOrdersQuery {
    type Output = OrderQuery;

    fn validate(self) -> Result<OrderQuery, ValidationErrors> {
        let mut v = Violations::new();
        let status = self
            .status
            .and_then(|s| v.one_of::<OrderStatus>("status", &s));
        let (page, limit) = paging(&mut v, self.page, self.limit);
        v.finish(|| {
            Some(OrderQuery {
                status,
                page,
                limit,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderBody {
    pub order_id: Option<String>,
    pub reason:   Option<String>,
}

impl Validate for CancelOrderBody {
    type Output = CancelOrder;

    fn validate(self) -> Result<CancelOrder, ValidationErrors> {
        let mut v = Violations::new();
        let order_id = v
            .required("orderId", self.order_id)
            .and_then(|id| v.uuid("orderId", &id));
        v.finish(|| {
            Some(CancelOrder {
                order_id: order_id?,
                reason:   self.reason,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusBody {
    pub order_id: Option<String>,
    pub status:   Option<String>,
}

impl Validate for UpdateOrderStatusBody {
    type Output = UpdateOrderStatus;

    fn validate(self) -> Result<UpdateOrderStatus, ValidationErrors> {
        let mut v = Violations::new();
        let order_id = v
            .required("orderId", self.order_id)
            .and_then(|id| v.uuid("orderId", &id));
        let status = v
            .required("status", self.status)
            .and_then(|s| v.one_of::<OrderStatus>("status", &s));
        v.finish(|| {
            Some(UpdateOrderStatus {
                order_id: order_id?,
                status:   status?,
            })
        })
    }
}

// --- ハンドラ ---

/// POST /ecommerce/order/create
#[tracing::instrument(skip_all)]
pub async fn create_order(
    State(state): State<Arc<OrderState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<CreateOrderBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let order = state.adapter.create(input, &principal).await?;
    Ok(ApiSuccess::created(order))
}

/// GET /ecommerce/order/list
#[tracing::instrument(skip_all)]
pub async fn list_orders(
    State(state): State<Arc<OrderState>>,
    Extension(principal): Extension<Principal>,
    query: Result<Query<ListOrdersQuery>, QueryRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_query(query)?;
    let orders = state.adapter.list(input, &principal).await?;
    Ok(ApiSuccess::ok(orders))
}

/// GET /ecommerce/order/{id}
#[tracing::instrument(skip_all)]
pub async fn get_order(
    State(state): State<Arc<OrderState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess, BffError> {
    let id = validated_id("id", &id)?;
    let order = state.adapter.find(ById { id }, &principal).await?;
    Ok(ApiSuccess::ok(order))
}

/// PUT /ecommerce/order/cancel
#[tracing::instrument(skip_all)]
pub async fn cancel_order(
    State(state): State<Arc<OrderState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<CancelOrderBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let order = state.adapter.cancel(input, &principal).await?;
    Ok(ApiSuccess::ok(order))
}

/// PUT /ecommerce/order/update-status
#[tracing::instrument(skip_all)]
pub async fn update_order_status(
    State(state): State<Arc<OrderState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<UpdateOrderStatusBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let order = state.adapter.update_status(input, &principal).await?;
    Ok(ApiSuccess::ok(order))
}
