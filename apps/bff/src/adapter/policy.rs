//! # ポリシーアダプタ
//!
//! 検索はテナント ID とドメインのどちらでも引けるため、
//! `TENANT_NOT_FOUND` と `POLICY_NOT_FOUND` の両方を 401 として扱う。

use std::sync::Arc;

use gatehouse_domain::Principal;
use serde_json::Value;

use super::remote_error::{ErrorRule, translate_remote_error};
use crate::{
    client::{
        ById,
        PolicyClient,
        RemoteRequest,
        tenant_service::{CreatePolicy, PolicyLookup, UpdatePolicy},
    },
    error::BffError,
};

const CREATE_ERRORS: &[ErrorRule] = &[
    ErrorRule::unauthorized("TENANT_NOT_FOUND", "Tenant not found"),
    ErrorRule::forbidden("POLICY_ALREADY_EXISTS", "Policy already exists"),
];
const FIND_ERRORS: &[ErrorRule] = &[
    ErrorRule::unauthorized("TENANT_NOT_FOUND", "Tenant not found"),
    ErrorRule::unauthorized("POLICY_NOT_FOUND", "Policy not found"),
];
const POLICY_ERRORS: &[ErrorRule] =
    &[ErrorRule::unauthorized("POLICY_NOT_FOUND", "Policy not found")];

#[derive(Clone)]
pub struct PolicyAdapter {
    client: Arc<dyn PolicyClient>,
}

impl PolicyAdapter {
    pub fn new(client: Arc<dyn PolicyClient>) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        input: CreatePolicy,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .create_policy(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, CREATE_ERRORS))
    }

    pub async fn find(
        &self,
        input: PolicyLookup,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .find_policy(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, FIND_ERRORS))
    }

    pub async fn update(
        &self,
        input: UpdatePolicy,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .update_policy(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, POLICY_ERRORS))
    }

    pub async fn delete(&self, input: ById, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .delete_policy(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, POLICY_ERRORS))
    }
}
