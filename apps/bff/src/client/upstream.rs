//! # 汎用プロキシの転送クライアント
//!
//! 受信した HTTP リクエストを上流サービスにそのまま転送し、
//! ステータスとボディを返す。リトライは行わず、タイムアウトは reqwest の既定値に従う。

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderValue, Method, StatusCode, header};
use thiserror::Error;

use crate::middleware::request_id::inject_request_id;

/// 転送失敗
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// 上流サービスに到達できない、またはレスポンスを読み切れない
    #[error("上流サービスとの通信に失敗しました: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.to_string())
    }
}

/// 転送するリクエスト
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method:       Method,
    /// クエリ文字列を含む転送先 URL
    pub url:          String,
    pub content_type: Option<HeaderValue>,
    pub body:         Bytes,
}

/// 上流サービスのレスポンス
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status:       StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body:         Bytes,
}

/// 転送クライアントトレイト
///
/// テスト時に転送の有無を観測できるようトレイトで定義。
#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    async fn forward(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}

/// reqwest による転送クライアント実装
#[derive(Debug, Clone, Default)]
pub struct ReqwestForwarder {
    client: reqwest::Client,
}

impl ReqwestForwarder {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UpstreamForwarder for ReqwestForwarder {
    async fn forward(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let mut builder = self.client.request(request.method, &request.url);
        if let Some(content_type) = request.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = inject_request_id(builder).send().await?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
