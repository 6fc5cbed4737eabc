//! # VNPay 設定 API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /tenant/vnpay-config/create` - 作成
//! - `GET /tenant/vnpay-config` - 取得
//! - `PUT /tenant/vnpay-config/update` - 更新
//! - `DELETE /tenant/vnpay-config` - 削除
//!
//! いずれも TENANT ロールのみ。対象は呼び出し元のテナント。

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{State, rejection::JsonRejection},
};
use gatehouse_domain::{Principal, Validate, ValidationErrors, Violations};
use serde::Deserialize;

use crate::{
    adapter::VnpayConfigAdapter,
    client::tenant_service::{CreateVnpayConfig, UpdateVnpayConfig},
    error::BffError,
    extract::validated_json,
    middleware::ApiSuccess,
};

/// VNPay 設定 API の共有状態
pub struct VnpayConfigState {
    pub adapter: VnpayConfigAdapter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVnpayConfigBody {
    pub tmn_code:    Option<String>,
    pub hash_secret: Option<String>,
    pub payment_url: Option<String>,
    pub return_url:  Option<String>,
}

impl Validate for CreateVnpayConfigBody {
    type Output = CreateVnpayConfig;

    fn validate(self) -> Result<CreateVnpayConfig, ValidationErrors> {
        let mut v = Violations::new();
        let tmn_code = v.required_text("tmnCode", self.tmn_code);
        let hash_secret = v.required_text("hashSecret", self.hash_secret);
        let payment_url = v
            .required("paymentUrl", self.payment_url)
            .and_then(|u| v.url("paymentUrl", &u));
        let return_url = v
            .required("returnUrl", self.return_url)
            .and_then(|u| v.url("returnUrl", &u));
        v.finish(|| {
            Some(CreateVnpayConfig {
                tmn_code:    tmn_code?,
                hash_secret: hash_secret?,
                payment_url: payment_url?,
                return_url:  return_url?,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVnpayConfigBody {
    pub tmn_code:    Option<String>,
    pub hash_secret: Option<String>,
    pub payment_url: Option<String>,
    pub return_url:  Option<String>,
}

impl Validate for UpdateVnpayConfigBody {
    type Output = UpdateVnpayConfig;

    fn validate(self) -> Result<UpdateVnpayConfig, ValidationErrors> {
        let mut v = Violations::new();
        let payment_url = self.payment_url.and_then(|u| v.url("paymentUrl", &u));
        let return_url = self.return_url.and_then(|u| v.url("returnUrl", &u));
        v.finish(|| {
            Some(UpdateVnpayConfig {
                tmn_code: self.tmn_code,
                hash_secret: self.hash_secret,
                payment_url,
                return_url,
            })
        })
    }
}

/// POST /tenant/vnpay-config/create
#[tracing::instrument(skip_all)]
pub async fn create_vnpay_config(
    State(state): State<Arc<VnpayConfigState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<CreateVnpayConfigBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let config = state.adapter.create(input, &principal).await?;
    Ok(ApiSuccess::created(config))
}

/// GET /tenant/vnpay-config
#[tracing::instrument(skip_all)]
pub async fn get_vnpay_config(
    State(state): State<Arc<VnpayConfigState>>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess, BffError> {
    let config = state.adapter.find(&principal).await?;
    Ok(ApiSuccess::ok(config))
}

/// PUT /tenant/vnpay-config/update
#[tracing::instrument(skip_all)]
pub async fn update_vnpay_config(
    State(state): State<Arc<VnpayConfigState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<UpdateVnpayConfigBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let config = state.adapter.update(input, &principal).await?;
    Ok(ApiSuccess::ok(config))
}

/// DELETE /tenant/vnpay-config
#[tracing::instrument(skip_all)]
pub async fn delete_vnpay_config(
    State(state): State<Arc<VnpayConfigState>>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess, BffError> {
    let result = state.adapter.delete(&principal).await?;
    Ok(ApiSuccess::ok(result))
}
