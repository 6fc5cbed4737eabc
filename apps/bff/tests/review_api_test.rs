//! # レビュー API の結合テスト
//!
//! トークンガード → ロールガード → 入力検証 → 下流呼び出し → エンベロープの
//! 一連の流れをルーター全体で検証する。

mod common;

use axum::http::{Method, StatusCode};
use common::{ADMIN_TOKEN, StubBackend, USER_TOKEN, VALID_ID, create_test_app, request, send_json};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_レビュー作成が201でエンベロープに包まれて返る() {
    // Given
    let backend = StubBackend::new();
    backend.reply_with(Ok(json!({ "id": "r-1", "rating": 5 })));
    let sut = create_test_app(&backend);

    // When
    let (status, body) = send_json(
        sut,
        request(
            Method::POST,
            "/booking/review/create",
            Some(USER_TOKEN),
            Some(json!({ "serviceId": VALID_ID, "review": "Great", "rating": 5 })),
        ),
    )
    .await;

    // Then
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["path"], "/booking/review/create");
    assert_eq!(body["message"], "Success");
    assert_eq!(body["error"], serde_json::Value::Null);
    assert_eq!(body["data"], json!({ "id": "r-1", "rating": 5 }));
    assert!(body["timestamp"].is_string());

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].operation, "ReviewService/Create");
    assert_eq!(calls[0].payload["serviceId"], VALID_ID);
    assert_eq!(calls[0].payload["rating"], 5);
    assert_eq!(calls[0].payload["user"]["role"], "USER");
    assert_eq!(calls[0].payload["user"]["email"], "user@example.com");
}

#[tokio::test]
async fn test_評価が未指定だと400で下流を呼ばない() {
    // Given
    let backend = StubBackend::new();
    let sut = create_test_app(&backend);

    // When
    let (status, body) = send_json(
        sut,
        request(
            Method::POST,
            "/booking/review/create",
            Some(USER_TOKEN),
            Some(json!({ "serviceId": VALID_ID, "review": "Great" })),
        ),
    )
    .await;

    // Then
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], json!(["rating should not be empty"]));
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["data"], serde_json::Value::Null);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_不正なjsonボディは400で下流を呼ばない() {
    let backend = StubBackend::new();
    let sut = create_test_app(&backend);
    let mut req = request(Method::POST, "/booking/review/create", Some(USER_TOKEN), None);
    *req.body_mut() = axum::body::Body::from("{ not json");
    req.headers_mut().insert(
        axum::http::header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("application/json"),
    );

    let (status, body) = send_json(sut, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_array());
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_パスのidがuuidでなければ400で下流を呼ばない() {
    let backend = StubBackend::new();
    let sut = create_test_app(&backend);

    let (status, body) = send_json(
        sut,
        request(Method::GET, "/booking/review/42", Some(USER_TOKEN), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!(["id must be a UUID"]));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_レビュー削除は管理者も実行できる() {
    let backend = StubBackend::new();
    let sut = create_test_app(&backend);

    let (status, _) = send_json(
        sut,
        request(
            Method::DELETE,
            &format!("/booking/review/{VALID_ID}"),
            Some(ADMIN_TOKEN),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.calls()[0].operation, "ReviewService/Delete");
    assert_eq!(backend.calls()[0].payload["id"], VALID_ID);
}

#[tokio::test]
async fn test_一覧クエリの数値はテキストから変換して送る() {
    let backend = StubBackend::new();
    let sut = create_test_app(&backend);

    let (status, _) = send_json(
        sut,
        request(
            Method::GET,
            &format!("/booking/review/list?serviceId={VALID_ID}&page=2&limit=20"),
            Some(ADMIN_TOKEN),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let payload = &backend.calls()[0].payload;
    assert_eq!(payload["page"], 2);
    assert_eq!(payload["limit"], 20);
    assert_eq!(payload["serviceId"], VALID_ID);
}

#[tokio::test]
async fn test_既存レビューの作成は403になる() {
    let backend = StubBackend::new();
    backend.fail_with_code("REVIEW_ALREADY_EXISTS");
    let sut = create_test_app(&backend);

    let (status, body) = send_json(
        sut,
        request(
            Method::POST,
            "/booking/review/create",
            Some(USER_TOKEN),
            Some(json!({ "serviceId": VALID_ID, "review": "Again", "rating": 3 })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Review already exists");
    assert_eq!(body["error"], "Forbidden");
}
