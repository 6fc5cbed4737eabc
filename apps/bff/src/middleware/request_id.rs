//! # Request ID 伝播ミドルウェア
//!
//! 受信リクエストの Request ID を、下流サービスへの RPC と汎用プロキシの転送に引き継ぐ。
//!
//! 1. [`store_request_id`] が `SetRequestIdLayer` の付与した ID を task-local に保存する
//! 2. クライアント層は [`inject_request_id`] で送信リクエストに `x-request-id` を付ける
//!
//! 全クライアントメソッドの引数に ID を追加せずに済むよう task-local を使う。

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use gatehouse_shared::observability::REQUEST_ID_HEADER;
use tower_http::request_id::RequestId;

tokio::task_local! {
    static REQUEST_ID: String;
}

/// 処理中リクエストの Request ID（task-local スコープ外では `None`）
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(Clone::clone).ok()
}

/// Request ID を task-local に保存するミドルウェア
pub async fn store_request_id(request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("-")
        .to_string();

    REQUEST_ID.scope(request_id, next.run(request)).await
}

/// 送信リクエストに `x-request-id` ヘッダーを付与する
pub fn inject_request_id(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match current_request_id() {
        Some(id) => builder.header(REQUEST_ID_HEADER, id),
        None => builder,
    }
}
