//! # ヘルスチェックハンドラ
//!
//! BFF の稼働状態を確認するためのエンドポイント。
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready`: Readiness Check（下流サービスそれぞれの `/health` を確認）
//!
//! レスポンス型は [`gatehouse_shared::HealthResponse`] / [`gatehouse_shared::ReadinessResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_shared::{CheckStatus, HealthResponse, ReadinessResponse};
use tokio::task::JoinSet;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// BFF のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub http_client: reqwest::Client,
    /// 確認対象（サービス名, ベース URL）
    pub services:    Vec<(String, String)>,
}

/// BFF の Readiness Check エンドポイント
///
/// 下流サービスの接続状態を並行チェックする。
/// 全チェック OK → 200、1 つでも失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut probes = JoinSet::new();
    for (name, base_url) in &state.services {
        let client = state.http_client.clone();
        let name = name.clone();
        let url = format!("{base_url}/health");
        probes.spawn(async move { (name, probe(&client, &url).await) });
    }

    let mut checks = HashMap::new();
    while let Some(joined) = probes.join_next().await {
        match joined {
            Ok((name, status)) => {
                checks.insert(name, status);
            }
            Err(e) => tracing::warn!(error = %e, "readiness check: probe task failed"),
        }
    }
    // タスクが異常終了したサービスも結果に含める
    for (name, _) in &state.services {
        checks.entry(name.clone()).or_insert(CheckStatus::Error);
    }

    let response = ReadinessResponse::from_checks(checks);
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

/// 下流サービスの `/health` を呼ぶ（タイムアウト: 5 秒）
async fn probe(client: &reqwest::Client, url: &str) -> CheckStatus {
    match tokio::time::timeout(PROBE_TIMEOUT, client.get(url).send()).await {
        Ok(Ok(response)) if response.status().is_success() => CheckStatus::Ok,
        Ok(Ok(response)) => {
            tracing::warn!(url, status = %response.status(), "readiness check: unhealthy response");
            CheckStatus::Error
        }
        Ok(Err(e)) => {
            tracing::warn!(url, error = %e, "readiness check: request failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!(url, "readiness check: timed out");
            CheckStatus::Error
        }
    }
}
