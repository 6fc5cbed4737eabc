//! # 汎用プロキシハンドラ
//!
//! `/api/gateway/{service}/{*path}` を、登録済みサービスのベース URL に転送する。
//!
//! 1. サービス名を解決する（未登録なら 404 `Service not found`、転送は行わない）
//! 2. メソッド・パス・クエリ文字列・ボディ・`content-type` をそのまま転送する
//! 3. 上流のステータスとボディを加工せずに返す（エンベロープで包まない）
//!
//! パスはデコードせず、受信したエンコード済みの形で転送する。
//! `..` などのドットセグメントを含むパスはベース URL の外に出られるため 400 で拒否する。
//!
//! トークンガードの対象外。

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, Uri, header},
    response::{IntoResponse, Response},
};

use crate::{
    client::{UpstreamForwarder, UpstreamRequest},
    config::ServiceUrlMap,
    error::BffError,
};

/// 汎用プロキシの共有状態
pub struct GatewayState {
    pub services:  Arc<ServiceUrlMap>,
    pub forwarder: Arc<dyn UpstreamForwarder>,
}

const GATEWAY_PREFIX: &str = "/api/gateway/";

/// 受信パスから `{service}/` 以降をエンコードされたまま取り出す
fn raw_remainder(raw_path: &str) -> &str {
    raw_path
        .strip_prefix(GATEWAY_PREFIX)
        .and_then(|rest| rest.split_once('/'))
        .map_or("", |(_, remainder)| remainder)
}

/// URL の正規化で親ディレクトリへの移動として扱われるセグメントか
fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

/// 転送先 URL を組み立てる
fn target_url(base_url: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{base_url}/{path}?{query}"),
        _ => format!("{base_url}/{path}"),
    }
}

/// ANY /api/gateway/{service}/{*path}
///
/// `/api/gateway/{service}/`（残りのパスが空）はベース URL の直下に転送する。
#[tracing::instrument(skip_all, fields(service = tracing::field::Empty))]
pub async fn forward(
    State(state): State<Arc<GatewayState>>,
    Path(params): Path<HashMap<String, String>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, BffError> {
    let service = params.get("service").map_or("", String::as_str);
    tracing::Span::current().record("service", service);

    let Some(base_url) = state.services.resolve(service) else {
        tracing::debug!("転送先サービスが未登録");
        return Err(BffError::RouteNotFound);
    };

    let path = raw_remainder(uri.path());
    if path.split('/').any(is_dot_segment) {
        tracing::warn!(path, "ドットセグメントを含むパスの転送を拒否");
        return Err(BffError::ValidationFailed(vec![
            "path must not contain dot segments".to_string(),
        ]));
    }

    let request = UpstreamRequest {
        method,
        url: target_url(base_url, path, uri.query()),
        content_type: headers.get(header::CONTENT_TYPE).cloned(),
        body,
    };

    let upstream = state.forwarder.forward(request).await.map_err(|e| {
        tracing::error!(
            error.category = "external_service",
            error.kind = "upstream_unreachable",
            "上流サービスへの転送に失敗: {}",
            e
        );
        BffError::UpstreamUnavailable
    })?;

    let mut response = (upstream.status, upstream.body).into_response();
    if let Some(content_type) = upstream.content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}
