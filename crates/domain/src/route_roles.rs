//! # ルート別ロール要件
//!
//! 起動時にルート（HTTP メソッド + パステンプレート）ごとの必須ロールを登録し、
//! ロールガードがリクエストごとに参照する。テーブルは構築後に変更しない。
//!
//! ## 判定ルール
//!
//! | 要件 | 呼び出し元 | 結果 |
//! |------|-----------|------|
//! | なし | 任意 | 許可 |
//! | あり | ロールが集合に含まれる | 許可 |
//! | あり | 未認証、またはロールが集合外 | 拒否 |

use std::collections::{BTreeSet, HashMap};

use derive_more::Display;

use crate::principal::{Principal, Role};

/// ルートを一意に識別するキー（例: `POST /booking/review/create`）
///
/// `path` には実パスではなくルーター登録時のテンプレート（`/booking/review/{id}`）を使う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{method} {path}")]
pub struct RouteKey {
    method: String,
    path:   String,
}

impl RouteKey {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            path:   path.into(),
        }
    }
}

/// ルートに要求されるロールの集合
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        roles.into_iter().collect()
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// ルート別ロール要件テーブル
///
/// ## 使用例
///
/// ```rust
/// use gatehouse_domain::{Role, RouteRoles};
///
/// let roles = RouteRoles::new()
///     .require("DELETE", "/booking/review/{id}", [Role::User, Role::Admin])
///     .require("POST", "/booking/review/create", [Role::User]);
///
/// assert!(roles.requirement("GET", "/booking/review/list").is_none());
/// assert!(roles.requirement("DELETE", "/booking/review/{id}").unwrap().contains(Role::Admin));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteRoles {
    table: HashMap<RouteKey, RoleSet>,
}

impl RouteRoles {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルートにロール要件を登録する
    ///
    /// 同じルートを再登録した場合は後勝ち。
    pub fn require(
        mut self,
        method: &str,
        path: &str,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        self.table
            .insert(RouteKey::new(method, path), RoleSet::new(roles));
        self
    }

    /// ルートのロール要件を取得する（未登録なら `None` = 制限なし）
    pub fn requirement(&self, method: &str, path: &str) -> Option<&RoleSet> {
        self.table.get(&RouteKey::new(method, path))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// ロール要件に対して呼び出し元を認可する
///
/// 入力の全組み合わせで値を返す全域関数。
pub fn authorize(requirement: Option<&RoleSet>, principal: Option<&Principal>) -> bool {
    match (requirement, principal) {
        (None, _) => true,
        (Some(required), Some(principal)) => required.contains(principal.role()),
        (Some(_), None) => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn principal(role: Role) -> Principal {
        Principal::new("a@example.com", "example.com", role, "tok")
    }

    #[rstest]
    #[case::要件なし_未認証(None, None, true)]
    #[case::要件なし_認証済み(None, Some(Role::User), true)]
    #[case::要件あり_未認証(Some(vec![Role::User]), None, false)]
    #[case::要件あり_ロール一致(Some(vec![Role::User]), Some(Role::User), true)]
    #[case::要件あり_ロール不一致(Some(vec![Role::User]), Some(Role::Tenant), false)]
    #[case::複数ロール_いずれか一致(Some(vec![Role::User, Role::Admin]), Some(Role::Admin), true)]
    #[case::複数ロール_一致なし(Some(vec![Role::Tenant, Role::Admin]), Some(Role::User), false)]
    #[case::空集合(Some(vec![]), Some(Role::Admin), false)]
    fn test_authorizeは全組み合わせで判定結果を返す(
        #[case] required: Option<Vec<Role>>,
        #[case] caller: Option<Role>,
        #[case] expected: bool,
    ) {
        let requirement = required.map(RoleSet::new);
        let principal = caller.map(principal);

        assert_eq!(
            authorize(requirement.as_ref(), principal.as_ref()),
            expected
        );
    }

    #[test]
    fn test_requirementはメソッドの大文字小文字を区別しない() {
        let roles = RouteRoles::new().require("put", "/tenant/policy/update", [Role::Tenant]);

        assert!(roles.requirement("PUT", "/tenant/policy/update").is_some());
    }

    #[test]
    fn test_requirementはメソッドが異なれば別ルートとして扱う() {
        let roles =
            RouteRoles::new().require("DELETE", "/tenant/subscription/{id}", [Role::Admin]);

        assert!(roles.requirement("GET", "/tenant/subscription/{id}").is_none());
        assert_eq!(roles.len(), 1);
    }

    #[test]
    fn test_route_keyはメソッドとパスで表示される() {
        let key = RouteKey::new("get", "/ecommerce/order/{id}");

        assert_eq!(key.to_string(), "GET /ecommerce/order/{id}");
    }
}
