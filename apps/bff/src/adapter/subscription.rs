//! # サブスクリプションアダプタ

use std::sync::Arc;

use gatehouse_domain::Principal;
use serde_json::Value;

use super::remote_error::{ErrorRule, translate_remote_error};
use crate::{
    client::{
        ById,
        RemoteRequest,
        SubscriptionClient,
        tenant_service::{CreateSubscription, SubscriptionQuery, UpdateSubscription},
    },
    error::BffError,
};

const CREATE_ERRORS: &[ErrorRule] = &[ErrorRule::forbidden(
    "SUBSCRIPTION_ALREADY_EXISTS",
    "Subscription already exists",
)];
const SUBSCRIPTION_ERRORS: &[ErrorRule] = &[ErrorRule::unauthorized(
    "SUBSCRIPTION_NOT_FOUND",
    "Subscription not found",
)];
const LIST_ERRORS: &[ErrorRule] = &[];

#[derive(Clone)]
pub struct SubscriptionAdapter {
    client: Arc<dyn SubscriptionClient>,
}

impl SubscriptionAdapter {
    pub fn new(client: Arc<dyn SubscriptionClient>) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        input: CreateSubscription,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .create_subscription(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, CREATE_ERRORS))
    }

    pub async fn find(&self, input: ById, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .find_subscription(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, SUBSCRIPTION_ERRORS))
    }

    pub async fn update(
        &self,
        input: UpdateSubscription,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .update_subscription(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, SUBSCRIPTION_ERRORS))
    }

    pub async fn delete(&self, input: ById, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .delete_subscription(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, SUBSCRIPTION_ERRORS))
    }

    pub async fn list(
        &self,
        input: SubscriptionQuery,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .list_subscriptions(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, LIST_ERRORS))
    }
}
