//! # 注文アダプタ
//!
//! 注文の作成・参照・キャンセル・ステータス更新を E-commerce Service の
//! `OrderService` に委譲する。ステータス遷移の妥当性は下流が判定し、
//! BFF は `INVALID_STATUS_TRANSITION` を 403 として返すだけにとどめる。

use std::sync::Arc;

use gatehouse_domain::Principal;
use serde_json::Value;

use super::remote_error::{ErrorRule, translate_remote_error};
use crate::{
    client::{
        ById,
        OrderClient,
        RemoteRequest,
        ecommerce_service::{CancelOrder, CreateOrder, OrderQuery, UpdateOrderStatus},
    },
    error::BffError,
};

const CREATE_ERRORS: &[ErrorRule] = &[
    ErrorRule::unauthorized("CART_ITEM_NOT_FOUND", "Cart item not found"),
    ErrorRule::unauthorized("VOUCHER_NOT_FOUND", "Voucher not found"),
    ErrorRule::forbidden("OUT_OF_STOCK", "Product is out of stock"),
    ErrorRule::forbidden("VOUCHER_EXPIRED", "Voucher has expired"),
];
const FIND_ERRORS: &[ErrorRule] = &[ErrorRule::unauthorized("ORDER_NOT_FOUND", "Order not found")];
const LIST_ERRORS: &[ErrorRule] = &[];
const CANCEL_ERRORS: &[ErrorRule] = &[
    ErrorRule::unauthorized("ORDER_NOT_FOUND", "Order not found"),
    ErrorRule::forbidden("ORDER_CANNOT_BE_CANCELLED", "Order cannot be cancelled"),
];
const UPDATE_STATUS_ERRORS: &[ErrorRule] = &[
    ErrorRule::unauthorized("ORDER_NOT_FOUND", "Order not found"),
    ErrorRule::forbidden("INVALID_STATUS_TRANSITION", "Invalid order status transition"),
];

#[derive(Clone)]
pub struct OrderAdapter {
    client: Arc<dyn OrderClient>,
}

impl OrderAdapter {
    pub fn new(client: Arc<dyn OrderClient>) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        input: CreateOrder,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .create_order(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, CREATE_ERRORS))
    }

    pub async fn find(&self, input: ById, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .find_order(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, FIND_ERRORS))
    }

    /// 注文一覧を取得する
    ///
    /// 対象範囲（自分の注文 / テナントの注文 / 全件）は呼び出し元のロールに応じて下流が決める。
    pub async fn list(&self, input: OrderQuery, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .list_orders(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, LIST_ERRORS))
    }

    pub async fn cancel(
        &self,
        input: CancelOrder,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .cancel_order(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, CANCEL_ERRORS))
    }

    pub async fn update_status(
        &self,
        input: UpdateOrderStatus,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .update_order_status(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, UPDATE_STATUS_ERRORS))
    }
}
