//! # Auth Service クライアント
//!
//! BFF から Auth Service へのトークン検証を担当する。
//!
//! ## RPC
//!
//! - `AuthService/VerifyToken` - アクセストークンを検証し、呼び出し元の情報を返す

use async_trait::async_trait;
use gatehouse_domain::{Principal, Role};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rpc::{RpcError, RpcTransport};

/// Auth Service クライアントエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthServiceError {
    /// トークンが無効（期限切れ・改ざん・失効）
    #[error("トークンが無効です")]
    InvalidToken,

    /// Auth Service に到達できない
    #[error("Auth Service が一時的に利用できません")]
    ServiceUnavailable,

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl From<RpcError> for AuthServiceError {
    fn from(err: RpcError) -> Self {
        match err {
            // 4xx はトークンの拒否、5xx は Auth Service 側の障害
            RpcError::Remote { status, .. } if (400..500).contains(&status) => {
                AuthServiceError::InvalidToken
            }
            RpcError::Remote { status, .. } if status >= 500 => {
                AuthServiceError::ServiceUnavailable
            }
            RpcError::Remote { status, details } => {
                AuthServiceError::Unexpected(format!("{status}: {details}"))
            }
            RpcError::Unavailable(_) => AuthServiceError::ServiceUnavailable,
            RpcError::Network(detail) => AuthServiceError::Unexpected(detail),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyTokenRequest<'a> {
    access_token: &'a str,
}

/// トークン検証レスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyTokenResponse {
    pub email:  String,
    pub domain: String,
    pub role:   Role,
}

/// Auth Service クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait AuthServiceClient: Send + Sync {
    /// アクセストークンを検証し、呼び出し元を返す
    async fn verify_token(&self, access_token: &str) -> Result<Principal, AuthServiceError>;
}

/// Auth Service クライアント実装
#[derive(Debug, Clone)]
pub struct AuthServiceClientImpl {
    rpc: RpcTransport,
}

impl AuthServiceClientImpl {
    /// # 引数
    ///
    /// - `base_url`: Auth Service のベース URL（例: `http://localhost:4001`）
    pub fn new(base_url: &str) -> Self {
        Self {
            rpc: RpcTransport::new(base_url),
        }
    }
}

#[async_trait]
impl AuthServiceClient for AuthServiceClientImpl {
    async fn verify_token(&self, access_token: &str) -> Result<Principal, AuthServiceError> {
        let verified: VerifyTokenResponse = self
            .rpc
            .call(
                "AuthService",
                "VerifyToken",
                &VerifyTokenRequest { access_token },
            )
            .await?;

        Ok(Principal::new(
            verified.email,
            verified.domain,
            verified.role,
            access_token,
        ))
    }
}
