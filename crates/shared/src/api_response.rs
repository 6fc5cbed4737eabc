//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式を提供する。
//!
//! ```json
//! {
//!   "statusCode": 201,
//!   "timestamp": "2026-01-01T00:00:00+00:00",
//!   "path": "/booking/review/create",
//!   "message": "Success",
//!   "error": null,
//!   "data": { ... }
//! }
//! ```
//!
//! 成功・失敗のどちらも同じ形をとる。失敗時は `data` が `null`、
//! `error` に HTTP の理由句（または下流サービスの生エラー）が入る。

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 成功レスポンスのデフォルトメッセージ
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// エンベロープの `message` フィールド
///
/// 通常は 1 つの文字列だが、バリデーションエラーでは違反メッセージの配列になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    List(Vec<String>),
}

impl Message {
    /// メッセージに指定した文字列が含まれるか判定する
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Message::Text(text) => text.contains(needle),
            Message::List(items) => items.iter().any(|item| item.contains(needle)),
        }
    }
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Message::Text(value.to_string())
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Message::Text(value)
    }
}

impl From<Vec<String>> for Message {
    fn from(value: Vec<String>) -> Self {
        Message::List(value)
    }
}

/// 公開 API の統一レスポンス型
///
/// BFF のエンベロープミドルウェアがハンドラの戻り値を包む際に使用する。
/// テストでは `Deserialize` でレスポンスボディを検証する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub timestamp:   String,
    pub path:        String,
    pub message:     Message,
    pub error:       Option<String>,
    pub data:        Option<T>,
}

impl<T> ApiResponse<T> {
    /// 各フィールドを指定して作成する（`timestamp` は現在時刻）
    pub fn new(
        status_code: u16,
        path: impl Into<String>,
        message: impl Into<Message>,
        error: Option<String>,
        data: Option<T>,
    ) -> Self {
        Self {
            status_code,
            timestamp: Utc::now().to_rfc3339(),
            path: path.into(),
            message: message.into(),
            error,
            data,
        }
    }

    /// 成功レスポンスを作成する
    pub fn success(
        status_code: u16,
        path: impl Into<String>,
        message: impl Into<Message>,
        data: T,
    ) -> Self {
        Self::new(status_code, path, message, None, Some(data))
    }

    /// 失敗レスポンスを作成する
    pub fn failure(
        status_code: u16,
        path: impl Into<String>,
        message: impl Into<Message>,
        error: impl Into<String>,
    ) -> Self {
        Self::new(status_code, path, message, Some(error.into()), None)
    }
}
