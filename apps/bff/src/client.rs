//! # 外部サービスクライアント
//!
//! 下流サービス（Auth / Booking / E-commerce / Tenant）への RPC と、
//! 汎用プロキシの転送を担当する。

pub mod auth_service;
pub mod booking_service;
pub mod ecommerce_service;
pub mod rpc;
pub mod tenant_service;
pub mod upstream;

pub use auth_service::{AuthServiceClient, AuthServiceClientImpl, AuthServiceError};
pub use booking_service::{BookingServiceClientImpl, ReviewClient};
pub use ecommerce_service::{CartClient, EcommerceServiceClientImpl, OrderClient};
pub use rpc::{ById, NoPayload, RemoteRequest, RpcError, RpcTransport};
pub use tenant_service::{
    PolicyClient,
    SubscriptionClient,
    TenantServiceClientImpl,
    VnpayConfigClient,
};
pub use upstream::{
    ReqwestForwarder,
    UpstreamError,
    UpstreamForwarder,
    UpstreamRequest,
    UpstreamResponse,
};
