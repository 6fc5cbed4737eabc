//! # カートアダプタ

use std::sync::Arc;

use gatehouse_domain::Principal;
use serde_json::Value;

use super::remote_error::{ErrorRule, translate_remote_error};
use crate::{
    client::{
        ById,
        CartClient,
        NoPayload,
        RemoteRequest,
        ecommerce_service::{AddCartItem, UpdateCartItem},
    },
    error::BffError,
};

const ADD_ERRORS: &[ErrorRule] = &[
    ErrorRule::unauthorized("PRODUCT_NOT_FOUND", "Product not found"),
    ErrorRule::forbidden("OUT_OF_STOCK", "Product is out of stock"),
];
const GET_ERRORS: &[ErrorRule] = &[ErrorRule::unauthorized("CART_NOT_FOUND", "Cart not found")];
const UPDATE_ERRORS: &[ErrorRule] = &[
    ErrorRule::unauthorized("CART_ITEM_NOT_FOUND", "Cart item not found"),
    ErrorRule::forbidden("OUT_OF_STOCK", "Product is out of stock"),
];
const REMOVE_ERRORS: &[ErrorRule] =
    &[ErrorRule::unauthorized("CART_ITEM_NOT_FOUND", "Cart item not found")];

#[derive(Clone)]
pub struct CartAdapter {
    client: Arc<dyn CartClient>,
}

impl CartAdapter {
    pub fn new(client: Arc<dyn CartClient>) -> Self {
        Self { client }
    }

    pub async fn add_item(
        &self,
        input: AddCartItem,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .add_item(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, ADD_ERRORS))
    }

    /// 呼び出し元自身のカートを取得する
    pub async fn get_cart(&self, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .get_cart(&RemoteRequest::new(NoPayload {}, principal))
            .await
            .map_err(|e| translate_remote_error(e, GET_ERRORS))
    }

    pub async fn update_item(
        &self,
        input: UpdateCartItem,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .update_item(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, UPDATE_ERRORS))
    }

    pub async fn remove_item(&self, input: ById, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .remove_item(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, REMOVE_ERRORS))
    }
}
