//! # BFF アプリケーション構築
//!
//! DI（クライアント・State）の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{any, delete, get, post, put},
};
use gatehouse_domain::{Role, RouteRoles};
use gatehouse_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    adapter::{
        CartAdapter,
        OrderAdapter,
        PolicyAdapter,
        ReviewAdapter,
        SubscriptionAdapter,
        VnpayConfigAdapter,
    },
    client::{
        AuthServiceClient,
        AuthServiceClientImpl,
        BookingServiceClientImpl,
        CartClient,
        EcommerceServiceClientImpl,
        OrderClient,
        PolicyClient,
        ReqwestForwarder,
        ReviewClient,
        SubscriptionClient,
        TenantServiceClientImpl,
        UpstreamForwarder,
        VnpayConfigClient,
    },
    config::{BffConfig, ServiceUrlMap},
    handler::{
        CartState,
        GatewayState,
        OrderState,
        PolicyState,
        ReadinessState,
        ReviewState,
        SubscriptionState,
        VnpayConfigState,
        WellKnownState,
        add_cart_item,
        cancel_order,
        create_order,
        create_policy,
        create_review,
        create_subscription,
        create_vnpay_config,
        delete_policy,
        delete_review,
        delete_subscription,
        delete_vnpay_config,
        find_policy,
        forward,
        get_cart,
        get_order,
        get_review,
        get_subscription,
        get_vnpay_config,
        health_check,
        list_orders,
        list_reviews,
        list_subscriptions,
        not_found,
        readiness_check,
        remove_cart_item,
        serve_well_known,
        update_cart_item,
        update_order_status,
        update_policy,
        update_review,
        update_subscription,
        update_vnpay_config,
    },
    middleware::{
        AuthState,
        no_cache,
        request_id::store_request_id,
        require_role,
        require_token,
        wrap_envelope,
    },
};

/// ルーター構築に必要な依存
///
/// 下流サービスのクライアントはトレイトオブジェクトで受け取り、
/// テストではスタブに差し替える。
pub struct AppDependencies {
    pub auth_service_client: Arc<dyn AuthServiceClient>,
    pub review_client:       Arc<dyn ReviewClient>,
    pub cart_client:         Arc<dyn CartClient>,
    pub order_client:        Arc<dyn OrderClient>,
    pub subscription_client: Arc<dyn SubscriptionClient>,
    pub policy_client:       Arc<dyn PolicyClient>,
    pub vnpay_config_client: Arc<dyn VnpayConfigClient>,
    pub forwarder:           Arc<dyn UpstreamForwarder>,
    pub gateway_services:    ServiceUrlMap,
    pub well_known_dir:      PathBuf,
    pub readiness:           ReadinessState,
}

impl AppDependencies {
    /// 設定から本番用のクライアントを組み立てる
    pub fn from_config(config: &BffConfig) -> Self {
        // 具象型で保持し、各フィールドで必要なトレイトオブジェクトへ coerce する
        let booking = Arc::new(BookingServiceClientImpl::new(&config.booking_url));
        let ecommerce = Arc::new(EcommerceServiceClientImpl::new(&config.ecommerce_url));
        let tenant = Arc::new(TenantServiceClientImpl::new(&config.tenant_url));

        Self {
            auth_service_client: Arc::new(AuthServiceClientImpl::new(&config.auth_url)),
            review_client:       booking,
            cart_client:         ecommerce.clone(),
            order_client:        ecommerce,
            subscription_client: tenant.clone(),
            policy_client:       tenant.clone(),
            vnpay_config_client: tenant,
            forwarder:           Arc::new(ReqwestForwarder::new()),
            gateway_services:    config.gateway_services.clone(),
            well_known_dir:      config.well_known_dir.clone(),
            readiness:           ReadinessState {
                http_client: reqwest::Client::new(),
                services:    vec![
                    ("auth".to_string(), config.auth_url.clone()),
                    ("booking".to_string(), config.booking_url.clone()),
                    ("ecommerce".to_string(), config.ecommerce_url.clone()),
                    ("tenant".to_string(), config.tenant_url.clone()),
                ],
            },
        }
    }
}

/// ドメイン API のロール要件
///
/// ここに登録のないドメイン API はトークンガードのみ（全ロールが利用可能）。
pub fn route_roles() -> RouteRoles {
    use Role::{Admin, Tenant, User};

    RouteRoles::new()
        // レビュー
        .require("POST", "/booking/review/create", [User])
        .require("PUT", "/booking/review/update", [User])
        .require("DELETE", "/booking/review/{id}", [User, Admin])
        // カート
        .require("POST", "/ecommerce/cart/add", [User])
        .require("GET", "/ecommerce/cart", [User])
        .require("PUT", "/ecommerce/cart/update", [User])
        .require("DELETE", "/ecommerce/cart/item/{id}", [User])
        // 注文
        .require("POST", "/ecommerce/order/create", [User])
        .require("GET", "/ecommerce/order/list", [User, Tenant, Admin])
        .require("GET", "/ecommerce/order/{id}", [User, Tenant, Admin])
        .require("PUT", "/ecommerce/order/cancel", [User])
        .require("PUT", "/ecommerce/order/update-status", [Tenant])
        // サブスクリプション
        .require("POST", "/tenant/subscription/create", [Admin])
        .require("PUT", "/tenant/subscription/update", [Admin])
        .require("DELETE", "/tenant/subscription/{id}", [Admin])
        // ポリシー
        .require("POST", "/tenant/policy/create", [Tenant, Admin])
        .require("PUT", "/tenant/policy/update", [Tenant, Admin])
        .require("DELETE", "/tenant/policy/{id}", [Tenant, Admin])
        // VNPay 設定
        .require("POST", "/tenant/vnpay-config/create", [Tenant])
        .require("GET", "/tenant/vnpay-config", [Tenant])
        .require("PUT", "/tenant/vnpay-config/update", [Tenant])
        .require("DELETE", "/tenant/vnpay-config", [Tenant])
}

/// ドメイン API のルーター（トークンガード・ロールガード適用）
fn domain_routes(deps: &AppDependencies) -> Router {
    let review_state = Arc::new(ReviewState {
        adapter: ReviewAdapter::new(deps.review_client.clone()),
    });
    let cart_state = Arc::new(CartState {
        adapter: CartAdapter::new(deps.cart_client.clone()),
    });
    let order_state = Arc::new(OrderState {
        adapter: OrderAdapter::new(deps.order_client.clone()),
    });
    let subscription_state = Arc::new(SubscriptionState {
        adapter: SubscriptionAdapter::new(deps.subscription_client.clone()),
    });
    let policy_state = Arc::new(PolicyState {
        adapter: PolicyAdapter::new(deps.policy_client.clone()),
    });
    let vnpay_config_state = Arc::new(VnpayConfigState {
        adapter: VnpayConfigAdapter::new(deps.vnpay_config_client.clone()),
    });
    let auth_state = AuthState {
        auth_service_client: deps.auth_service_client.clone(),
    };

    Router::new()
        // Booking Service
        .merge(
            Router::new()
                .route("/booking/review/create", post(create_review))
                .route("/booking/review/list", get(list_reviews))
                .route("/booking/review/update", put(update_review))
                .route(
                    "/booking/review/{id}",
                    get(get_review).delete(delete_review),
                )
                .with_state(review_state),
        )
        // E-commerce Service
        .merge(
            Router::new()
                .route("/ecommerce/cart", get(get_cart))
                .route("/ecommerce/cart/add", post(add_cart_item))
                .route("/ecommerce/cart/update", put(update_cart_item))
                .route("/ecommerce/cart/item/{id}", delete(remove_cart_item))
                .with_state(cart_state),
        )
        .merge(
            Router::new()
                .route("/ecommerce/order/create", post(create_order))
                .route("/ecommerce/order/list", get(list_orders))
                .route("/ecommerce/order/cancel", put(cancel_order))
                .route("/ecommerce/order/update-status", put(update_order_status))
                .route("/ecommerce/order/{id}", get(get_order))
                .with_state(order_state),
        )
        // Tenant Service
        .merge(
            Router::new()
                .route("/tenant/subscription/create", post(create_subscription))
                .route("/tenant/subscription/list", get(list_subscriptions))
                .route("/tenant/subscription/update", put(update_subscription))
                .route(
                    "/tenant/subscription/{id}",
                    get(get_subscription).delete(delete_subscription),
                )
                .with_state(subscription_state),
        )
        .merge(
            Router::new()
                .route("/tenant/policy/create", post(create_policy))
                .route("/tenant/policy/find", get(find_policy))
                .route("/tenant/policy/update", put(update_policy))
                .route("/tenant/policy/{id}", delete(delete_policy))
                .with_state(policy_state),
        )
        .merge(
            Router::new()
                .route(
                    "/tenant/vnpay-config",
                    get(get_vnpay_config).delete(delete_vnpay_config),
                )
                .route("/tenant/vnpay-config/create", post(create_vnpay_config))
                .route("/tenant/vnpay-config/update", put(update_vnpay_config))
                .with_state(vnpay_config_state),
        )
        // route_layer は下に書いたものが外側: トークンガード → ロールガード → ハンドラ
        .route_layer(from_fn_with_state(Arc::new(route_roles()), require_role))
        .route_layer(from_fn_with_state(auth_state, require_token))
}

/// ルーターを構築する
pub fn build_app(deps: AppDependencies) -> Router {
    let domain = domain_routes(&deps);

    let gateway_state = Arc::new(GatewayState {
        services:  Arc::new(deps.gateway_services),
        forwarder: deps.forwarder,
    });
    let well_known_state = Arc::new(WellKnownState {
        dir: deps.well_known_dir,
    });
    let readiness_state = Arc::new(deps.readiness);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/.well-known/{file}", get(serve_well_known))
                .with_state(well_known_state),
        )
        .merge(
            Router::new()
                .route("/api/gateway/{service}/", any(forward))
                .route("/api/gateway/{service}/{*path}", any(forward))
                .with_state(gateway_state),
        )
        .merge(domain)
        .fallback(not_found)
        // 統一形式への包み直し（中継レスポンス・静的ファイルは対象外）
        .layer(from_fn(wrap_envelope))
        // キャッシュ制御: 動的 API レスポンスがブラウザにキャッシュされないようにする
        .layer(from_fn(no_cache))
        .layer(cors)
        // Request ID レイヤー（レイヤー順序が重要: 下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: リクエスト受信時に UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
        // 3. CanonicalLogLineLayer: リクエスト完了時に1行サマリログを出力（スパン内）
        // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        // 5. store_request_id: task-local に保存し、BFF → 下流サービスのヘッダー伝播に使用
        .layer(from_fn(store_request_id))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
