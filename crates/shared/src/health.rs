//! # ヘルスチェック共通型
//!
//! BFF と下流サービスのヘルスチェックエンドポイントで使用される共通レスポンス型。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// `status` はサービスの稼働状態、`version` は Cargo.toml のバージョンを示す。
///
/// ## 使用例
///
/// ```
/// use gatehouse_shared::HealthResponse;
///
/// let response = HealthResponse {
///     status:  "healthy".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` または `"unhealthy"`）
    pub status:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// 全下流サービスが利用可能
    Ready,
    /// 一部の下流サービスが利用不可
    NotReady,
}

/// Readiness Check レスポンス
///
/// `checks` のキーは下流サービス名（`auth`, `booking` など）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: ReadinessStatus,
    pub checks: HashMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// 個別チェック結果から全体ステータスを決定する
    pub fn from_checks(checks: HashMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|s| *s == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_responseのserializeで正しいjson形状にする() {
        let response = HealthResponse {
            status:  "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "version": "0.1.0"
            })
        );
    }

    #[test]
    fn test_全チェックokならreadyになる() {
        let checks = HashMap::from([
            ("auth".to_string(), CheckStatus::Ok),
            ("booking".to_string(), CheckStatus::Ok),
        ]);

        let response = ReadinessResponse::from_checks(checks);

        assert!(response.is_ready());
    }

    #[test]
    fn test_1つでもerrorならnot_readyになる() {
        let checks = HashMap::from([
            ("auth".to_string(), CheckStatus::Ok),
            ("tenant".to_string(), CheckStatus::Error),
        ]);

        let response = ReadinessResponse::from_checks(checks);
        let json = serde_json::to_value(&response).unwrap();

        assert!(!response.is_ready());
        assert_eq!(json["status"], "not_ready");
        assert_eq!(json["checks"]["tenant"], "error");
    }
}
