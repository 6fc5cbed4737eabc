//! # Principal（認証済み呼び出し元）
//!
//! トークンガードが認証サービスの検証結果から組み立て、リクエスト拡張に格納する。
//! ハンドラとアダプタは読み取り専用で参照し、下流サービスへのリクエストに
//! `user` フィールドとして同梱する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Role`] | ロール | `USER` / `TENANT` / `ADMIN` のいずれか |
//! | [`Principal`] | 呼び出し元 | メールアドレス、テナントドメイン、ロール、アクセストークン |

use serde::{Deserialize, Serialize};

/// ロール
///
/// 認証サービスと下流サービスの間では大文字スネークケース（`"USER"` 等）でやり取りする。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// 一般利用者
    User,
    /// テナント（店舗運営者）
    Tenant,
    /// システム管理者
    Admin,
}

/// 認証済み呼び出し元
///
/// 1 リクエストにつき 1 つ生成され、リクエスト完了とともに破棄される。
/// アクセストークンは下流サービスでの再検証用に保持するが、`Debug` 出力には含めない。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    email:        String,
    domain:       String,
    role:         Role,
    access_token: String,
}

impl Principal {
    pub fn new(
        email: impl Into<String>,
        domain: impl Into<String>,
        role: Role,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            domain: domain.into(),
            role,
            access_token: access_token.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// テナントのスコープを表すドメイン文字列
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Principal")
            .field("email", &self.email)
            .field("domain", &self.domain)
            .field("role", &self.role)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
