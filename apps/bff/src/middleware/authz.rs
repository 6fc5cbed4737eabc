//! # ロールガード
//!
//! ルート登録表（[`RouteRoles`]）から、マッチしたルートの必要ロールを引き、
//! 呼び出し元のロールが含まれなければハンドラ実行前に 403 を返す。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .route("/booking/review/create", post(review::create_review))
//!     .route_layer(from_fn_with_state(Arc::new(route_roles()), require_role))
//!     .route_layer(from_fn_with_state(auth_state, require_token))
//! ```
//!
//! `MatchedPath` を参照するため `route_layer` で適用する。

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use gatehouse_domain::{Principal, RouteRoles, authorize};

use crate::error::BffError;

/// ロールガードミドルウェア
pub async fn require_role(
    State(route_roles): State<Arc<RouteRoles>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, BffError> {
    let method = request.method().as_str();
    let requirement = request
        .extensions()
        .get::<MatchedPath>()
        .and_then(|matched| route_roles.requirement(method, matched.as_str()));
    let principal = request.extensions().get::<Principal>();

    if !authorize(requirement, principal) {
        let role = principal.map(|p| p.role().to_string());
        tracing::warn!(
            http.method = %method,
            user.role = role.as_deref().unwrap_or("-"),
            "必要なロールを持たないためアクセスを拒否"
        );
        return Err(BffError::AccessDenied);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::{Method, StatusCode},
        middleware::{from_fn, from_fn_with_state},
        routing::{delete, get},
    };
    use gatehouse_domain::Role;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;

    async fn dummy_handler() -> StatusCode {
        StatusCode::OK
    }

    fn roles() -> RouteRoles {
        RouteRoles::new()
            .require("DELETE", "/reviews/{id}", [Role::User, Role::Admin])
    }

    /// 指定ロールの呼び出し元を拡張に入れてからロールガードを通すアプリ
    fn app(role: Option<Role>) -> Router {
        let with_principal = move |mut request: Request<Body>, next: Next| async move {
            if let Some(role) = role {
                request
                    .extensions_mut()
                    .insert(Principal::new("a@example.com", "example.com", role, "tok"));
            }
            next.run(request).await
        };

        Router::new()
            .route("/reviews/{id}", delete(dummy_handler))
            .route("/reviews/{id}", get(dummy_handler))
            .route("/open", get(dummy_handler))
            .route_layer(from_fn_with_state(Arc::new(roles()), require_role))
            .layer(from_fn(with_principal))
    }

    async fn call(role: Option<Role>, method: Method, uri: &str) -> StatusCode {
        app(role)
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[rstest]
    #[case(Some(Role::User), StatusCode::OK)]
    #[case(Some(Role::Admin), StatusCode::OK)]
    #[case(Some(Role::Tenant), StatusCode::FORBIDDEN)]
    #[case(None, StatusCode::FORBIDDEN)]
    #[tokio::test]
    async fn test_必要ロールの判定(#[case] role: Option<Role>, #[case] expected: StatusCode) {
        assert_eq!(call(role, Method::DELETE, "/reviews/123").await, expected);
    }

    #[tokio::test]
    async fn test_登録表で制限のないメソッドは全ロールが通過する() {
        assert_eq!(
            call(Some(Role::Tenant), Method::GET, "/reviews/123").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_登録表にないルートは制限なしとして通過する() {
        assert_eq!(call(None, Method::GET, "/open").await, StatusCode::OK);
    }
}
