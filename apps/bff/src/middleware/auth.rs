//! # トークンガード
//!
//! `Authorization: Bearer <token>` を Auth Service で検証し、
//! 呼び出し元の [`Principal`] をリクエスト拡張に格納する。
//!
//! | 状況 | 結果 |
//! |------|------|
//! | ヘッダーなし・形式不正・空トークン | 401 `Unauthorized` |
//! | Auth Service がトークンを拒否 | 401 `Invalid token` |
//! | Auth Service に到達できない | 503 `Auth service unavailable` |

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use gatehouse_domain::Principal;

use crate::{
    client::{AuthServiceClient, AuthServiceError},
    error::BffError,
};

/// トークンガードの状態
#[derive(Clone)]
pub struct AuthState {
    pub auth_service_client: Arc<dyn AuthServiceClient>,
}

/// Bearer トークンを取り出す（空トークンは未指定とみなす）
fn bearer_token<B>(request: &Request<B>) -> Option<String> {
    let Authorization(bearer) = request.headers().typed_get::<Authorization<Bearer>>()?;
    let token = bearer.token().trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// トークンガードミドルウェア
pub async fn require_token(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, BffError> {
    let Some(token) = bearer_token(&request) else {
        return Err(BffError::Unauthorized("Unauthorized".to_string()));
    };

    let principal: Principal = match state.auth_service_client.verify_token(&token).await {
        Ok(principal) => principal,
        Err(AuthServiceError::InvalidToken) => {
            return Err(BffError::Unauthorized("Invalid token".to_string()));
        }
        Err(e) => {
            tracing::error!(
                error.category = "external_service",
                error.kind = "auth_service",
                "トークン検証で Auth Service の呼び出しに失敗: {}",
                e
            );
            return Err(BffError::AuthUnavailable);
        }
    };

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
