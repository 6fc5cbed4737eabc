//! # カート API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /ecommerce/cart/add` - 商品追加
//! - `GET /ecommerce/cart` - カート取得
//! - `PUT /ecommerce/cart/update` - 数量変更
//! - `DELETE /ecommerce/cart/item/{id}` - 商品削除
//!
//! いずれも USER ロールのみ。

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use gatehouse_domain::{Principal, Validate, ValidationErrors, Violations};
use serde::Deserialize;

use crate::{
    adapter::CartAdapter,
    client::{
        ById,
        ecommerce_service::{AddCartItem, UpdateCartItem},
    },
    error::BffError,
    extract::{validated_id, validated_json},
    middleware::ApiSuccess,
};

/// カート API の共有状態
pub struct CartState {
    pub adapter: CartAdapter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemBody {
    pub product_id: Option<String>,
    pub quantity:   Option<i64>,
}

impl Validate for AddCartItemBody {
    type Output = AddCartItem;

    fn validate(self) -> Result<AddCartItem, ValidationErrors> {
        let mut v = Violations::new();
        let product_id = v
            .required("productId", self.product_id)
            .and_then(|id| v.uuid("productId", &id));
        let quantity = v
            .required("quantity", self.quantity)
            .and_then(|q| v.range("quantity", q, Some(1), None));
        v.finish(|| {
            Some(AddCartItem {
                product_id: product_id?,
                quantity:   quantity?,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemBody {
    pub item_id:  Option<String>,
    pub quantity: Option<i64>,
}

impl Validate for UpdateCartItemBody {
    type Output = UpdateCartItem;

    fn validate(self) -> Result<UpdateCartItem, ValidationErrors> {
        let mut v = Violations::new();
        let item_id = v
            .required("itemId", self.item_id)
            .and_then(|id| v.uuid("itemId", &id));
        let quantity = v
            .required("quantity", self.quantity)
            .and_then(|q| v.range("quantity", q, Some(1), None));
        v.finish(|| {
            Some(UpdateCartItem {
                item_id:  item_id?,
                quantity: quantity?,
            })
        })
    }
}

/// POST /ecommerce/cart/add
#[tracing::instrument(skip_all)]
pub async fn add_cart_item(
    State(state): State<Arc<CartState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<AddCartItemBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let cart = state.adapter.add_item(input, &principal).await?;
    Ok(ApiSuccess::created(cart))
}

/// GET /ecommerce/cart
#[tracing::instrument(skip_all)]
pub async fn get_cart(
    State(state): State<Arc<CartState>>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess, BffError> {
    let cart = state.adapter.get_cart(&principal).await?;
    Ok(ApiSuccess::ok(cart))
}

/// PUT /ecommerce/cart/update
#[tracing::instrument(skip_all)]
pub async fn update_cart_item(
    State(state): State<Arc<CartState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<UpdateCartItemBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let cart = state.adapter.update_item(input, &principal).await?;
    Ok(ApiSuccess::ok(cart))
}

/// DELETE /ecommerce/cart/item/{id}
#[tracing::instrument(skip_all)]
pub async fn remove_cart_item(
    State(state): State<Arc<CartState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess, BffError> {
    let id = validated_id("id", &id)?;
    let cart = state.adapter.remove_item(ById { id }, &principal).await?;
    Ok(ApiSuccess::ok(cart))
}
