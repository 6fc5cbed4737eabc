//! # Tenant Service クライアント
//!
//! サブスクリプション（`SubscriptionService`）、ポリシー（`PolicyService`）、
//! VNPay 設定（`VnpayConfigService`）の RPC を担当する。
//!
//! VNPay 設定はテナントにつき 1 件で、対象テナントは呼び出し元の `domain` から
//! Tenant Service 側で決定する。

use async_trait::async_trait;
use gatehouse_domain::policy::PolicyType;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::rpc::{ById, NoPayload, RemoteRequest, RpcError, RpcTransport};

const SUBSCRIPTION_SERVICE: &str = "SubscriptionService";
const POLICY_SERVICE: &str = "PolicyService";
const VNPAY_CONFIG_SERVICE: &str = "VnpayConfigService";

// --- サブスクリプション ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscription {
    pub tenant_id:  Uuid,
    pub plan_name:  String,
    pub price:      f64,
    pub start_date: String,
    pub end_date:   String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscription {
    pub id:        Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price:     Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date:  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page:      Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit:     Option<i64>,
}

// --- ポリシー ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolicy {
    pub tenant_id:      Uuid,
    #[serde(rename = "type")]
    pub policy_type:    PolicyType,
    pub content:        String,
    pub effective_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url:   Option<String>,
}

/// ポリシー検索（テナント ID とドメインの少なくとも一方を指定）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePolicy {
    pub id:             Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url:   Option<String>,
}

// --- VNPay 設定 ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVnpayConfig {
    pub tmn_code:    String,
    pub hash_secret: String,
    pub payment_url: String,
    pub return_url:  String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVnpayConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmn_code:    Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url:  Option<String>,
}

// --- クライアントトレイト ---

#[async_trait]
pub trait SubscriptionClient: Send + Sync {
    async fn create_subscription(
        &self,
        req: &RemoteRequest<CreateSubscription>,
    ) -> Result<Value, RpcError>;

    async fn find_subscription(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError>;

    async fn update_subscription(
        &self,
        req: &RemoteRequest<UpdateSubscription>,
    ) -> Result<Value, RpcError>;

    async fn delete_subscription(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError>;

    async fn list_subscriptions(
        &self,
        req: &RemoteRequest<SubscriptionQuery>,
    ) -> Result<Value, RpcError>;
}

#[async_trait]
pub trait PolicyClient: Send + Sync {
    async fn create_policy(&self, req: &RemoteRequest<CreatePolicy>) -> Result<Value, RpcError>;

    async fn find_policy(&self, req: &RemoteRequest<PolicyLookup>) -> Result<Value, RpcError>;

    async fn update_policy(&self, req: &RemoteRequest<UpdatePolicy>) -> Result<Value, RpcError>;

    async fn delete_policy(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError>;
}

#[async_trait]
pub trait VnpayConfigClient: Send + Sync {
    async fn create_vnpay_config(
        &self,
        req: &RemoteRequest<CreateVnpayConfig>,
    ) -> Result<Value, RpcError>;

    async fn find_vnpay_config(&self, req: &RemoteRequest<NoPayload>) -> Result<Value, RpcError>;

    async fn update_vnpay_config(
        &self,
        req: &RemoteRequest<UpdateVnpayConfig>,
    ) -> Result<Value, RpcError>;

    async fn delete_vnpay_config(
        &self,
        req: &RemoteRequest<NoPayload>,
    ) -> Result<Value, RpcError>;
}

/// Tenant Service クライアント実装
#[derive(Debug, Clone)]
pub struct TenantServiceClientImpl {
    rpc: RpcTransport,
}

impl TenantServiceClientImpl {
    /// # 引数
    ///
    /// - `base_url`: Tenant Service のベース URL（例: `http://localhost:4004`）
    pub fn new(base_url: &str) -> Self {
        Self {
            rpc: RpcTransport::new(base_url),
        }
    }
}

#[async_trait]
impl SubscriptionClient for TenantServiceClientImpl {
    async fn create_subscription(
        &self,
        req: &RemoteRequest<CreateSubscription>,
    ) -> Result<Value, RpcError> {
        self.rpc
            .call(SUBSCRIPTION_SERVICE, "CreateSubscription", req)
            .await
    }

    async fn find_subscription(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.rpc
            .call(SUBSCRIPTION_SERVICE, "FindSubscription", req)
            .await
    }

    async fn update_subscription(
        &self,
        req: &RemoteRequest<UpdateSubscription>,
    ) -> Result<Value, RpcError> {
        self.rpc
            .call(SUBSCRIPTION_SERVICE, "UpdateSubscription", req)
            .await
    }

    async fn delete_subscription(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.rpc
            .call(SUBSCRIPTION_SERVICE, "DeleteSubscription", req)
            .await
    }

    async fn list_subscriptions(
        &self,
        req: &RemoteRequest<SubscriptionQuery>,
    ) -> Result<Value, RpcError> {
        self.rpc
            .call(SUBSCRIPTION_SERVICE, "ListSubscriptions", req)
            .await
    }
}

#[async_trait]
impl PolicyClient for TenantServiceClientImpl {
    async fn create_policy(&self, req: &RemoteRequest<CreatePolicy>) -> Result<Value, RpcError> {
        self.rpc.call(POLICY_SERVICE, "CreatePolicy", req).await
    }

    async fn find_policy(&self, req: &RemoteRequest<PolicyLookup>) -> Result<Value, RpcError> {
        self.rpc.call(POLICY_SERVICE, "FindPolicy", req).await
    }

    async fn update_policy(&self, req: &RemoteRequest<UpdatePolicy>) -> Result<Value, RpcError> {
        self.rpc.call(POLICY_SERVICE, "UpdatePolicy", req).await
    }

    async fn delete_policy(&self, req: &RemoteRequest<ById>) -> Result<Value, RpcError> {
        self.rpc.call(POLICY_SERVICE, "DeletePolicy", req).await
    }
}

#[async_trait]
impl VnpayConfigClient for TenantServiceClientImpl {
    async fn create_vnpay_config(
        &self,
        req: &RemoteRequest<CreateVnpayConfig>,
    ) -> Result<Value, RpcError> {
        self.rpc
            .call(VNPAY_CONFIG_SERVICE, "CreateConfig", req)
            .await
    }

    async fn find_vnpay_config(&self, req: &RemoteRequest<NoPayload>) -> Result<Value, RpcError> {
        self.rpc.call(VNPAY_CONFIG_SERVICE, "FindConfig", req).await
    }

    async fn update_vnpay_config(
        &self,
        req: &RemoteRequest<UpdateVnpayConfig>,
    ) -> Result<Value, RpcError> {
        self.rpc
            .call(VNPAY_CONFIG_SERVICE, "UpdateConfig", req)
            .await
    }

    async fn delete_vnpay_config(
        &self,
        req: &RemoteRequest<NoPayload>,
    ) -> Result<Value, RpcError> {
        self.rpc
            .call(VNPAY_CONFIG_SERVICE, "DeleteConfig", req)
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_create_policyの種別はtypeとして送る() {
        let req = CreatePolicy {
            tenant_id:      Uuid::nil(),
            policy_type:    PolicyType::Refund,
            content:        "Refunds within 7 days".to_string(),
            effective_date: "2026-01-01".to_string(),
            document_url:   None,
        };

        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["type"], "REFUND");
        assert_eq!(json["effectiveDate"], "2026-01-01");
        assert!(json.get("documentUrl").is_none());
    }

    #[test]
    fn test_update_vnpay_configは指定した項目のみ送る() {
        let req = UpdateVnpayConfig {
            return_url: Some("https://shop.example/return".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"returnUrl": "https://shop.example/return"})
        );
    }
}
