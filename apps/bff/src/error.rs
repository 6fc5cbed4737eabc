//! # BFF エラーハンドリング
//!
//! 公開 API のエラー定義と、axum レスポンスへの変換。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | バリアント | ステータス | 発生箇所 |
//! |-----------|-----------|---------|
//! | `ValidationFailed` | 400 | 入力検証（下流呼び出し前） |
//! | `Unauthorized` | 401 | トークンガード |
//! | `AccessDenied` | 403 | ロールガード（`Forbidden resource`。認証済みでロール不一致のため 401 ではなく 403） |
//! | `RemoteUnauthorized` | 401 | 下流サービスの権限拒否・リソース不在 |
//! | `RemoteForbidden` | 403 | 下流サービスの業務上の競合 |
//! | `RemoteUnrecognized` | 404 | 未知のエラーコード、解析不能なエラー |
//! | `UpstreamUnavailable` | 500 | 汎用プロキシの転送失敗 |
//! | `RouteNotFound` | 404 | 汎用プロキシの転送先が未登録 |
//! | `AuthUnavailable` | 503 | Auth Service に到達できない |
//! | `NotFound` | 404 | 未定義ルート、静的ファイル不在 |
//!
//! レスポンスボディは `{ message, error }` で、エンベロープミドルウェアが
//! `statusCode` / `timestamp` / `path` を補って最終形にする。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_domain::ValidationErrors;
use gatehouse_shared::Message;
use serde::Serialize;
use thiserror::Error;

use crate::middleware::envelope::EnvelopePayload;

/// BFF の公開 API エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BffError {
    #[error("入力検証エラー: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),

    #[error("認証エラー: {0}")]
    Unauthorized(String),

    #[error("アクセス権限がありません")]
    AccessDenied,

    #[error("下流サービスが認可エラーを返しました: {0}")]
    RemoteUnauthorized(String),

    #[error("下流サービスが操作を拒否しました: {0}")]
    RemoteForbidden(String),

    #[error("下流サービスのエラーを解釈できません: {message} ({raw})")]
    RemoteUnrecognized { message: String, raw: String },

    #[error("転送先サービスに到達できません")]
    UpstreamUnavailable,

    #[error("転送先サービスが登録されていません")]
    RouteNotFound,

    #[error("Auth Service が利用できません")]
    AuthUnavailable,

    #[error("リソースが見つかりません: {0}")]
    NotFound(String),
}

/// エラーレスポンスのボディ
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: Message,
    error:   String,
}

impl BffError {
    pub fn status(&self) -> StatusCode {
        match self {
            BffError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            BffError::Unauthorized(_) | BffError::RemoteUnauthorized(_) => StatusCode::UNAUTHORIZED,
            BffError::AccessDenied | BffError::RemoteForbidden(_) => StatusCode::FORBIDDEN,
            BffError::RemoteUnrecognized { .. }
            | BffError::RouteNotFound
            | BffError::NotFound(_) => StatusCode::NOT_FOUND,
            BffError::UpstreamUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            BffError::AuthUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// クライアントに返す `message`
    pub fn message(&self) -> Message {
        match self {
            BffError::ValidationFailed(messages) => Message::List(messages.clone()),
            BffError::Unauthorized(message)
            | BffError::RemoteUnauthorized(message)
            | BffError::RemoteForbidden(message)
            | BffError::RemoteUnrecognized { message, .. }
            | BffError::NotFound(message) => Message::from(message.as_str()),
            BffError::AccessDenied => Message::from("Forbidden resource"),
            BffError::UpstreamUnavailable => Message::from("Failed to reach upstream service"),
            BffError::RouteNotFound => Message::from("Service not found"),
            BffError::AuthUnavailable => Message::from("Auth service unavailable"),
        }
    }

    /// クライアントに返す `error`
    ///
    /// 通常は HTTP の理由句。解釈できなかった下流エラーは生のテキストをそのまま返す。
    pub fn error_text(&self) -> String {
        match self {
            BffError::RemoteUnrecognized { raw, .. } => raw.clone(),
            other => other
                .status()
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
        }
    }
}

impl From<ValidationErrors> for BffError {
    fn from(errors: ValidationErrors) -> Self {
        BffError::ValidationFailed(errors.into_messages())
    }
}

impl IntoResponse for BffError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        let error = self.error_text();

        let mut response = (
            status,
            Json(ErrorBody {
                message: message.clone(),
                error:   error.clone(),
            }),
        )
            .into_response();
        response.extensions_mut().insert(EnvelopePayload {
            message,
            error: Some(error),
            data: None,
        });
        response
    }
}
