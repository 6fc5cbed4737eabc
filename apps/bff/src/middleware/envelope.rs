//! # レスポンスエンベロープミドルウェア
//!
//! ハンドラ・ガードが返したレスポンスを統一形式
//! `{ statusCode, timestamp, path, message, error, data }` に包み直す。
//!
//! 包む対象は [`EnvelopePayload`] 拡張を持つレスポンスのみ。
//! 汎用プロキシの中継レスポンスと静的ファイルは拡張を持たないため、そのまま返る。

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use gatehouse_shared::{ApiResponse, DEFAULT_SUCCESS_MESSAGE, Message};

/// エンベロープに載せる内容
///
/// レスポンス拡張として運ばれ、ミドルウェアが取り出して最終的なボディを組み立てる。
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopePayload {
    pub message: Message,
    pub error:   Option<String>,
    pub data:    Option<serde_json::Value>,
}

/// 成功レスポンス
///
/// 下流サービスの結果オブジェクトをそのまま `data` に載せる。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSuccess {
    status: StatusCode,
    data:   serde_json::Value,
}

impl ApiSuccess {
    /// 200 OK
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 Created
    pub fn created(data: serde_json::Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

impl IntoResponse for ApiSuccess {
    fn into_response(self) -> Response {
        let payload = EnvelopePayload {
            message: Message::from(DEFAULT_SUCCESS_MESSAGE),
            error:   None,
            data:    Some(self.data.clone()),
        };
        let mut response = (self.status, Json(self.data)).into_response();
        response.extensions_mut().insert(payload);
        response
    }
}

/// [`EnvelopePayload`] を持つレスポンスをエンベロープで包む
pub async fn wrap_envelope(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    let Some(payload) = response.extensions_mut().remove::<EnvelopePayload>() else {
        return response;
    };

    let status = response.status();
    let body = ApiResponse::new(
        status.as_u16(),
        path,
        payload.message,
        payload.error,
        payload.data,
    );

    let mut enveloped = (status, Json(body)).into_response();
    for (name, value) in response.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            enveloped.headers_mut().append(name.clone(), value.clone());
        }
    }
    enveloped
}
