//! # 入力検証の結合テスト
//!
//! 違反があれば違反したフィールド名を含む 400 を返し、下流サービスは呼ばれない。

mod common;

use axum::http::{Method, StatusCode};
use common::{
    ADMIN_TOKEN,
    StubBackend,
    TENANT_TOKEN,
    USER_TOKEN,
    create_test_app,
    request,
    send_json,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case::uuid(
    Method::POST,
    "/ecommerce/cart/add",
    USER_TOKEN,
    json!({ "productId": "p-1", "quantity": 1 }),
    "productId must be a UUID"
)]
#[case::url(
    Method::POST,
    "/tenant/vnpay-config/create",
    TENANT_TOKEN,
    json!({
        "tmnCode": "DEMO",
        "hashSecret": "s",
        "paymentUrl": "https://sandbox.vnpayment.vn/pay",
        "returnUrl": "salon/return"
    }),
    "returnUrl must be a URL address"
)]
#[case::列挙値(
    Method::PUT,
    "/ecommerce/order/update-status",
    TENANT_TOKEN,
    json!({ "orderId": "0190a6b2-7c4e-7a1b-9d3f-2e5c8b1a4f60", "status": "LOST" }),
    "status must be one of the following values: PENDING, CONFIRMED, SHIPPING, DELIVERED, CANCELLED"
)]
#[case::日付(
    Method::POST,
    "/tenant/policy/create",
    ADMIN_TOKEN,
    json!({
        "tenantId": "0190a6b2-7c4e-7a1b-9d3f-2e5c8b1a4f60",
        "type": "REFUND",
        "content": "7 days",
        "effectiveDate": "next monday"
    }),
    "effectiveDate must be a valid ISO 8601 date string"
)]
#[case::空配列(
    Method::POST,
    "/ecommerce/order/create",
    USER_TOKEN,
    json!({ "itemIds": [], "paymentMethod": "COD", "deliveryAddress": "12 Nguyen Hue" }),
    "itemIds should not be empty"
)]
#[tokio::test]
async fn test_違反はフィールド名を含み下流を呼ばない(
    #[case] method: Method,
    #[case] uri: &str,
    #[case] token: &str,
    #[case] body: Value,
    #[case] expected: &str,
) {
    // Given
    let backend = StubBackend::new();

    // When
    let (status, response) = send_json(
        create_test_app(&backend),
        request(method, uri, Some(token), Some(body)),
    )
    .await;

    // Then
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], json!([expected]));
    assert_eq!(backend.call_count(), 0);
}

#[rstest]
#[case("/tenant/subscription/list?page=abc", "page must be a number")]
#[case("/tenant/subscription/list?limit=500", "limit must not be greater than 100")]
#[case("/tenant/subscription/list?tenantId=t-1", "tenantId must be a UUID")]
#[case("/tenant/policy/find", "either tenantId or domain must be provided")]
#[case("/ecommerce/order/list?status=LOST", "status must be one of the following values: PENDING, CONFIRMED, SHIPPING, DELIVERED, CANCELLED")]
#[tokio::test]
async fn test_クエリパラメータの違反(#[case] uri: &str, #[case] expected: &str) {
    let backend = StubBackend::new();

    let (status, response) = send_json(
        create_test_app(&backend),
        request(Method::GET, uri, Some(ADMIN_TOKEN), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], json!([expected]));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_すべての違反をまとめて返す() {
    let backend = StubBackend::new();

    let (status, response) = send_json(
        create_test_app(&backend),
        request(
            Method::POST,
            "/tenant/subscription/create",
            Some(ADMIN_TOKEN),
            Some(json!({ "price": -5 })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["message"],
        json!([
            "tenantId should not be empty",
            "planName should not be empty",
            "price must not be less than 0",
            "startDate should not be empty",
            "endDate should not be empty"
        ])
    );
    assert_eq!(backend.call_count(), 0);
}
