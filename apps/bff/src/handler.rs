//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、入力検証の後は下流サービスに委譲する
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `review`: レビュー（Booking Service）
//! - `cart` / `order`: カート・注文（E-commerce Service）
//! - `subscription` / `policy` / `vnpay_config`: テナント関連（Tenant Service）
//! - `gateway`: 汎用プロキシ
//! - `well_known`: ディープリンク検証ファイル

pub mod cart;
pub mod gateway;
pub mod health;
pub mod order;
pub mod policy;
pub mod review;
pub mod subscription;
pub mod vnpay_config;
pub mod well_known;

use axum::http::{Method, Uri};
use gatehouse_domain::Violations;

pub use cart::{CartState, add_cart_item, get_cart, remove_cart_item, update_cart_item};
pub use gateway::{GatewayState, forward};
pub use health::{ReadinessState, health_check, readiness_check};
pub use order::{
    OrderState,
    cancel_order,
    create_order,
    get_order,
    list_orders,
    update_order_status,
};
pub use policy::{PolicyState, create_policy, delete_policy, find_policy, update_policy};
pub use review::{
    ReviewState,
    create_review,
    delete_review,
    get_review,
    list_reviews,
    update_review,
};
pub use subscription::{
    SubscriptionState,
    create_subscription,
    delete_subscription,
    get_subscription,
    list_subscriptions,
    update_subscription,
};
pub use vnpay_config::{
    VnpayConfigState,
    create_vnpay_config,
    delete_vnpay_config,
    get_vnpay_config,
    update_vnpay_config,
};
pub use well_known::{WellKnownState, serve_well_known};

use crate::error::BffError;

const MAX_LIMIT: i64 = 100;

/// 一覧系クエリの `page` / `limit` を検証する
///
/// `page` は 1 以上、`limit` は 1 以上 100 以下の整数。
pub(crate) fn paging(
    v: &mut Violations,
    page: Option<String>,
    limit: Option<String>,
) -> (Option<i64>, Option<i64>) {
    let page = page
        .and_then(|raw| v.integer("page", &raw))
        .and_then(|n| v.range("page", n, Some(1), None));
    let limit = limit
        .and_then(|raw| v.integer("limit", &raw))
        .and_then(|n| v.range("limit", n, Some(1), Some(MAX_LIMIT)));
    (page, limit)
}

/// 未定義ルートのフォールバック
pub async fn not_found(method: Method, uri: Uri) -> BffError {
    BffError::NotFound(format!("Cannot {method} {}", uri.path()))
}
