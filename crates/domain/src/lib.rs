//! # Gatehouse ドメイン層
//!
//! BFF が扱う業務上の概念を、HTTP やトランスポートから独立した純粋な型として定義する。
//!
//! ## 設計方針
//!
//! - I/O を一切持たない（判定・検証はすべて純粋関数）
//! - 公開 API の入力検証ルールとロール要件をここに集約し、BFF はそれを呼び出すだけにする
//!
//! ## モジュール構成
//!
//! - [`principal`] - 認証済み呼び出し元（Principal）とロール
//! - [`route_roles`] - ルートごとのロール要件と認可判定
//! - [`validation`] - 入力検証ルールと違反メッセージ
//! - [`order`] - 注文ステータス・支払い方法
//! - [`policy`] - テナントポリシー種別
//!
//! ## 使用例
//!
//! ```rust
//! use gatehouse_domain::{
//!     principal::{Principal, Role},
//!     route_roles::{RouteRoles, authorize},
//! };
//!
//! let roles = RouteRoles::new().require("POST", "/booking/review/create", [Role::User]);
//! let principal = Principal::new("a@example.com", "example.com", Role::User, "token");
//!
//! let requirement = roles.requirement("POST", "/booking/review/create");
//! assert!(authorize(requirement, Some(&principal)));
//! ```

pub mod order;
pub mod policy;
pub mod principal;
pub mod route_roles;
pub mod validation;

pub use principal::{Principal, Role};
pub use route_roles::{RoleSet, RouteRoles, authorize};
pub use validation::{Validate, ValidationErrors, Violations};
