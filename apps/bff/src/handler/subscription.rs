//! # サブスクリプション API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /tenant/subscription/create` - 作成（ADMIN）
//! - `GET /tenant/subscription/list` - 一覧
//! - `GET /tenant/subscription/{id}` - 取得
//! - `PUT /tenant/subscription/update` - 更新（ADMIN）
//! - `DELETE /tenant/subscription/{id}` - 削除（ADMIN）

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
use gatehouse_domain::{Principal, Validate, ValidationErrors, Violations};
use serde::Deserialize;

use super::paging;
use crate::{
    adapter::SubscriptionAdapter,
    client::{
        ById,
        tenant_service::{CreateSubscription, SubscriptionQuery, UpdateSubscription},
    },
    error::BffError,
    extract::{validated_id, validated_json, validated_query},
    middleware::ApiSuccess,
};

/// サブスクリプション API の共有状態
pub struct SubscriptionState {
    pub adapter: SubscriptionAdapter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionBody {
    pub tenant_id:  Option<String>,
    pub plan_name:  Option<String>,
    pub price:      Option<f64>,
    pub start_date: Option<String>,
    pub end_date:   Option<String>,
}

impl Validate for CreateSubscriptionBody {
    type Output = CreateSubscription;

    fn validate(self) -> Result<CreateSubscription, ValidationErrors> {
        let mut v = Violations::new();
        let tenant_id = v
            .required("tenantId", self.tenant_id)
            .and_then(|id| v.uuid("tenantId", &id));
        let plan_name = v.required_text("planName", self.plan_name);
        let price = v
            .required("price", self.price)
            .and_then(|p| v.range("price", p, Some(0.0), None));
        let start_date = v
            .required("startDate", self.start_date)
            .and_then(|d| v.iso_date("startDate", &d));
        let end_date = v
            .required("endDate", self.end_date)
            .and_then(|d| v.iso_date("endDate", &d));
        v.finish(|| {
            Some(CreateSubscription {
                tenant_id:  tenant_id?,
                plan_name:  plan_name?,
                price:      price?,
                start_date: start_date?,
                end_date:   end_date?,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionBody {
    pub id:        Option<String>,
    pub plan_name: Option<String>,
    pub price:     Option<f64>,
    pub end_date:  Option<String>,
}

impl Validate for UpdateSubscriptionBody {
    type Output = UpdateSubscription;

    fn validate(self) -> Result<UpdateSubscription, ValidationErrors> {
        let mut v = Violations::new();
        let id = v.required("id", self.id).and_then(|id| v.uuid("id", &id));
        let price = self
            .price
            .and_then(|p| v.range("price", p, Some(0.0), None));
        let end_date = self.end_date.and_then(|d| v.iso_date("endDate", &d));
        v.finish(|| {
            Some(UpdateSubscription {
                id: id?,
                plan_name: self.plan_name,
                price,
                end_date,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubscriptionsQuery {
    pub tenant_id: Option<String>,
    pub page:      Option<String>,
    pub limit:     Option<String>,
}

impl Validate for ListSubscriptionsQuery {
    type Output = SubscriptionQuery;

    fn validate(self) -> Result<SubscriptionQuery, ValidationErrors> {
        let mut v = Violations::new();
        let tenant_id = self.tenant_id.and_then(|id| v.uuid("tenantId", &id));
        let (page, limit) = paging(&mut v, self.page, self.limit);
        v.finish(|| {
            Some(SubscriptionQuery {
                tenant_id,
                page,
                limit,
            })
        })
    }
}

/// POST /tenant/subscription/create
#[tracing::instrument(skip_all)]
pub async fn create_subscription(
    State(state): State<Arc<SubscriptionState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<CreateSubscriptionBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let subscription = state.adapter.create(input, &principal).await?;
    Ok(ApiSuccess::created(subscription))
}

/// GET /tenant/subscription/list
#[tracing::instrument(skip_all)]
pub async fn list_subscriptions(
    State(state): State<Arc<SubscriptionState>>,
    Extension(principal): Extension<Principal>,
    query: Result<Query<ListSubscriptionsQuery>, QueryRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_query(query)?;
    let subscriptions = state.adapter.list(input, &principal).await?;
    Ok(ApiSuccess::ok(subscriptions))
}

/// GET /tenant/subscription/{id}
#[tracing::instrument(skip_all)]
pub async fn get_subscription(
    State(state): State<Arc<SubscriptionState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess, BffError> {
    let id = validated_id("id", &id)?;
    let subscription = state.adapter.find(ById { id }, &principal).await?;
    Ok(ApiSuccess::ok(subscription))
}

/// PUT /tenant/subscription/update
#[tracing::instrument(skip_all)]
pub async fn update_subscription(
    State(state): State<Arc<SubscriptionState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<UpdateSubscriptionBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let subscription = state.adapter.update(input, &principal).await?;
    Ok(ApiSuccess::ok(subscription))
}

/// DELETE /tenant/subscription/{id}
#[tracing::instrument(skip_all)]
pub async fn delete_subscription(
    State(state): State<Arc<SubscriptionState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess, BffError> {
    let id = validated_id("id", &id)?;
    let result = state.adapter.delete(ById { id }, &principal).await?;
    Ok(ApiSuccess::ok(result))
}
