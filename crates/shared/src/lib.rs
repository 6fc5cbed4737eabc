//! # Gatehouse 共有ユーティリティ
//!
//! BFF と周辺ツールで共通に使うユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換は BFF の責務）
//! - tracing / tower 系の依存は `observability` feature に閉じ込める

pub mod api_response;
#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod health;
pub mod observability;

pub use api_response::{ApiResponse, DEFAULT_SUCCESS_MESSAGE, Message};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
