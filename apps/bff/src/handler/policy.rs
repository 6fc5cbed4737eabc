//! # ポリシー API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /tenant/policy/create` - 作成（TENANT / ADMIN）
//! - `GET /tenant/policy/find` - テナント ID またはドメインで検索
//! - `PUT /tenant/policy/update` - 更新（TENANT / ADMIN）
//! - `DELETE /tenant/policy/{id}` - 削除（TENANT / ADMIN）

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
use gatehouse_domain::{Principal, Validate, ValidationErrors, Violations, policy::PolicyType};
use serde::Deserialize;

use crate::{
    adapter::PolicyAdapter,
    client::{
        ById,
        tenant_service::{CreatePolicy, PolicyLookup, UpdatePolicy},
    },
    error::BffError,
    extract::{validated_id, validated_json, validated_query},
    middleware::ApiSuccess,
};

/// ポリシー API の共有状態
pub struct PolicyState {
    pub adapter: PolicyAdapter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolicyBody {
    pub tenant_id:      Option<String>,
    #[serde(rename = "type")]
    pub policy_type:    Option<String>,
    pub content:        Option<String>,
    pub effective_date: Option<String>,
    pub document_url:   Option<String>,
}

impl Validate for CreatePolicyBody {
    type Output = CreatePolicy;

    fn validate(self) -> Result<CreatePolicy, ValidationErrors> {
        let mut v = Violations::new();
        let tenant_id = v
            .required("tenantId", self.tenant_id)
            .and_then(|id| v.uuid("tenantId", &id));
        let policy_type = v
            .required("type", self.policy_type)
            .and_then(|t| v.one_of::<PolicyType>("type", &t));
        let content = v.required_text("content", self.content);
        let effective_date = v
            .required("effectiveDate", self.effective_date)
            .and_then(|d| v.iso_date("effectiveDate", &d));
        let document_url = self
            .document_url
            .and_then(|u| v.url("documentUrl", &u));
        v.finish(|| {
            Some(CreatePolicy {
                tenant_id: tenant_id?,
                policy_type: policy_type?,
                content: content?,
                effective_date: effective_date?,
                document_url,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindPolicyQuery {
    pub tenant_id: Option<String>,
    pub domain:    Option<String>,
}

impl Validate for FindPolicyQuery {
    type Output = PolicyLookup;

    fn validate(self) -> Result<PolicyLookup, ValidationErrors> {
        let mut v = Violations::new();
        let domain = self.domain.filter(|d| !d.trim().is_empty());
        v.at_least_one(
            ("tenantId", self.tenant_id.is_some()),
            ("domain", domain.is_some()),
        );
        let tenant_id = self.tenant_id.and_then(|id| v.uuid("tenantId", &id));
        v.finish(|| Some(PolicyLookup { tenant_id, domain }))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePolicyBody {
    pub id:             Option<String>,
    pub content:        Option<String>,
    pub effective_date: Option<String>,
    pub document_url:   Option<String>,
}

impl Validate for UpdatePolicyBody {
    type Output = UpdatePolicy;

    fn validate(self) -> Result<UpdatePolicy, ValidationErrors> {
        let mut v = Violations::new();
        let id = v.required("id", self.id).and_then(|id| v.uuid("id", &id));
        let effective_date = self
            .effective_date
            .and_then(|d| v.iso_date("effectiveDate", &d));
        let document_url = self
            .document_url
            .and_then(|u| v.url("documentUrl", &u));
        v.finish(|| {
            Some(UpdatePolicy {
                id: id?,
                content: self.content,
                effective_date,
                document_url,
            })
        })
    }
}

/// POST /tenant/policy/create
#[tracing::instrument(skip_all)]
pub async fn create_policy(
    State(state): State<Arc<PolicyState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<CreatePolicyBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let policy = state.adapter.create(input, &principal).await?;
    Ok(ApiSuccess::created(policy))
}

/// GET /tenant/policy/find
#[tracing::instrument(skip_all)]
pub async fn find_policy(
    State(state): State<Arc<PolicyState>>,
    Extension(principal): Extension<Principal>,
    query: Result<Query<FindPolicyQuery>, QueryRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_query(query)?;
    let policy = state.adapter.find(input, &principal).await?;
    Ok(ApiSuccess::ok(policy))
}

/// PUT /tenant/policy/update
#[tracing::instrument(skip_all)]
pub async fn update_policy(
    State(state): State<Arc<PolicyState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<UpdatePolicyBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let policy = state.adapter.update(input, &principal).await?;
    Ok(ApiSuccess::ok(policy))
}

/// DELETE /tenant/policy/{id}
#[tracing::instrument(skip_all)]
pub async fn delete_policy(
    State(state): State<Arc<PolicyState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess, BffError> {
    let id = validated_id("id", &id)?;
    let result = state.adapter.delete(ById { id }, &principal).await?;
    Ok(ApiSuccess::ok(result))
}
