//! # VNPay 設定アダプタ
//!
//! 設定はテナントにつき 1 件。対象テナントは呼び出し元の `domain` で決まるため、
//! 取得と削除は入力項目を持たない。

use std::sync::Arc;

use gatehouse_domain::Principal;
use serde_json::Value;

use super::remote_error::{ErrorRule, translate_remote_error};
use crate::{
    client::{
        NoPayload,
        RemoteRequest,
        VnpayConfigClient,
        tenant_service::{CreateVnpayConfig, UpdateVnpayConfig},
    },
    error::BffError,
};

const CREATE_ERRORS: &[ErrorRule] = &[
    ErrorRule::unauthorized("TENANT_NOT_FOUND", "Tenant not found"),
    ErrorRule::forbidden("CONFIG_ALREADY_EXISTS", "Config already exists"),
];
const CONFIG_ERRORS: &[ErrorRule] =
    &[ErrorRule::unauthorized("CONFIG_NOT_FOUND", "Config not found")];

#[derive(Clone)]
pub struct VnpayConfigAdapter {
    client: Arc<dyn VnpayConfigClient>,
}

impl VnpayConfigAdapter {
    pub fn new(client: Arc<dyn VnpayConfigClient>) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        input: CreateVnpayConfig,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .create_vnpay_config(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, CREATE_ERRORS))
    }

    pub async fn find(&self, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .find_vnpay_config(&RemoteRequest::new(NoPayload {}, principal))
            .await
            .map_err(|e| translate_remote_error(e, CONFIG_ERRORS))
    }

    pub async fn update(
        &self,
        input: UpdateVnpayConfig,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .update_vnpay_config(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, CONFIG_ERRORS))
    }

    pub async fn delete(&self, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .delete_vnpay_config(&RemoteRequest::new(NoPayload {}, principal))
            .await
            .map_err(|e| translate_remote_error(e, CONFIG_ERRORS))
    }
}
