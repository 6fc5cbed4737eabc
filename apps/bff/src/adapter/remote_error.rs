//! # 下流サービスエラーの変換
//!
//! RPC 失敗時の `details`（`{"error": "<CODE>"}` 形式の JSON テキスト）を解釈し、
//! 操作ごとの対応表に従って [`BffError`] に変換する。
//!
//! | エラーコード | 結果 |
//! |-------------|------|
//! | `PERMISSION_DENIED`（全操作共通） | 401 `Unauthorized Role` |
//! | 対応表にあるコード | 対応表の 401 / 403 とメッセージ |
//! | それ以外 | 404 `Unhandled error type: <code>` |
//! | 解析不能 / `error` が文字列でない / 通信失敗 | 404 `Error not recognized`（生テキスト付き） |
//!
//! どの入力でも必ずいずれかのエラーになる。

use serde::Deserialize;

use crate::{client::RpcError, error::BffError};

/// 全操作で共通に扱うコード
pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";

/// 対応表のエントリが示す変換先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// 401（リソース不在など）
    Unauthorized(&'static str),
    /// 403（業務上の競合）
    Forbidden(&'static str),
}

/// エラーコード → 変換先の対応表エントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorRule {
    pub code:    &'static str,
    pub outcome: RemoteOutcome,
}

impl ErrorRule {
    /// 401 に変換するエントリ（`*_NOT_FOUND` など）
    pub const fn unauthorized(code: &'static str, message: &'static str) -> Self {
        Self {
            code,
            outcome: RemoteOutcome::Unauthorized(message),
        }
    }

    /// 403 に変換するエントリ（`*_ALREADY_EXISTS` や業務上の競合）
    pub const fn forbidden(code: &'static str, message: &'static str) -> Self {
        Self {
            code,
            outcome: RemoteOutcome::Forbidden(message),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RemoteErrorPayload {
    error: Option<serde_json::Value>,
}

/// `details` からエラーコードを取り出す
///
/// JSON オブジェクトでない、`error` がない、または文字列でない場合は `None`。
fn parse_error_code(details: &str) -> Option<String> {
    let payload: RemoteErrorPayload = serde_json::from_str(details).ok()?;
    match payload.error? {
        serde_json::Value::String(code) => Some(code),
        _ => None,
    }
}

fn unrecognized(raw: String) -> BffError {
    BffError::RemoteUnrecognized {
        message: "Error not recognized".to_string(),
        raw,
    }
}

/// RPC エラーを公開 API のエラーに変換する
pub fn translate_remote_error(err: RpcError, table: &[ErrorRule]) -> BffError {
    let details = match err {
        RpcError::Remote { details, .. } => details,
        RpcError::Unavailable(detail) | RpcError::Network(detail) => {
            tracing::error!(
                error.category = "external_service",
                error.kind = "service_communication",
                "下流サービスとの通信に失敗: {}",
                detail
            );
            return unrecognized(detail);
        }
    };

    let Some(code) = parse_error_code(&details) else {
        tracing::warn!(
            error.category = "external_service",
            error.kind = "unparseable_error",
            "下流サービスのエラーを解析できません: {}",
            details
        );
        return unrecognized(details);
    };

    if code == PERMISSION_DENIED {
        return BffError::RemoteUnauthorized("Unauthorized Role".to_string());
    }

    match table.iter().find(|rule| rule.code == code) {
        Some(rule) => match rule.outcome {
            RemoteOutcome::Unauthorized(message) => {
                BffError::RemoteUnauthorized(message.to_string())
            }
            RemoteOutcome::Forbidden(message) => BffError::RemoteForbidden(message.to_string()),
        },
        None => {
            tracing::warn!(
                error.category = "external_service",
                error.kind = "unhandled_error_code",
                "対応表にないエラーコード: {}",
                code
            );
            BffError::RemoteUnrecognized {
                message: format!("Unhandled error type: {code}"),
                raw:     details,
            }
        }
    }
}
