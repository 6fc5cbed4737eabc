//! # レビューアダプタ
//!
//! Booking Service の `ReviewService` を 1 操作 1 RPC で呼び出し、
//! 失敗を操作ごとの対応表で変換する。

use std::sync::Arc;

use gatehouse_domain::Principal;
use serde_json::Value;

use super::remote_error::{ErrorRule, translate_remote_error};
use crate::{
    client::{
        ById,
        RemoteRequest,
        ReviewClient,
        booking_service::{CreateReview, ReviewQuery, UpdateReview},
    },
    error::BffError,
};

const CREATE_ERRORS: &[ErrorRule] = &[
    ErrorRule::unauthorized("SERVICE_NOT_FOUND", "Service not found"),
    ErrorRule::forbidden("REVIEW_ALREADY_EXISTS", "Review already exists"),
];
const REVIEW_ERRORS: &[ErrorRule] =
    &[ErrorRule::unauthorized("REVIEW_NOT_FOUND", "Review not found")];
const LIST_ERRORS: &[ErrorRule] =
    &[ErrorRule::unauthorized("SERVICE_NOT_FOUND", "Service not found")];

#[derive(Clone)]
pub struct ReviewAdapter {
    client: Arc<dyn ReviewClient>,
}

impl ReviewAdapter {
    pub fn new(client: Arc<dyn ReviewClient>) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        input: CreateReview,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .create_review(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, CREATE_ERRORS))
    }

    pub async fn find(&self, input: ById, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .find_review(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, REVIEW_ERRORS))
    }

    pub async fn update(
        &self,
        input: UpdateReview,
        principal: &Principal,
    ) -> Result<Value, BffError> {
        self.client
            .update_review(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, REVIEW_ERRORS))
    }

    pub async fn delete(&self, input: ById, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .delete_review(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, REVIEW_ERRORS))
    }

    pub async fn list(&self, input: ReviewQuery, principal: &Principal) -> Result<Value, BffError> {
        self.client
            .list_reviews(&RemoteRequest::new(input, principal))
            .await
            .map_err(|e| translate_remote_error(e, LIST_ERRORS))
    }
}
