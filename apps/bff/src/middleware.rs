//! # BFF ミドルウェア
//!
//! - `auth`: トークンガード
//! - `authz`: ロールガード
//! - `cache_control`: API レスポンスのキャッシュ抑止
//! - `envelope`: レスポンスの統一形式への包み直し
//! - `request_id`: Request ID の下流への伝播

pub mod auth;
pub mod authz;
pub mod cache_control;
pub mod envelope;
pub mod request_id;

pub use auth::{AuthState, require_token};
pub use authz::require_role;
pub use cache_control::no_cache;
pub use envelope::{ApiSuccess, EnvelopePayload, wrap_envelope};
pub use request_id::store_request_id;
