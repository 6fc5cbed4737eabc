//! # 入力検証
//!
//! 公開 API の入力（JSON ボディ、パス・クエリパラメータ）を型付きの値に変換しつつ、
//! 違反をすべて収集する。違反が 1 つでもあれば下流サービスへの呼び出しは行わない。
//!
//! ## 違反メッセージ
//!
//! | ルール | メッセージ |
//! |--------|-----------|
//! | 必須 | `<field> should not be empty` |
//! | UUID | `<field> must be a UUID` |
//! | URL | `<field> must be a URL address` |
//! | 列挙値 | `<field> must be one of the following values: A, B` |
//! | ISO 8601 日付 | `<field> must be a valid ISO 8601 date string` |
//! | 下限・上限 | `<field> must not be less than N` / `<field> must not be greater than N` |
//! | 数値変換 | `<field> must be a number` |
//! | 整数 | `<field> must be an integer number` |
//! | いずれか必須 | `either <a> or <b> must be provided` |
//!
//! ## 使用例
//!
//! ```rust
//! use gatehouse_domain::validation::{Validate, ValidationErrors, Violations};
//!
//! struct Body {
//!     service_id: Option<String>,
//!     rating:     Option<i64>,
//! }
//!
//! impl Validate for Body {
//!     type Output = (uuid::Uuid, i64);
//!
//!     fn validate(self) -> Result<Self::Output, ValidationErrors> {
//!         let mut v = Violations::new();
//!         let service_id = v
//!             .required("serviceId", self.service_id)
//!             .and_then(|id| v.uuid("serviceId", &id));
//!         let rating = v
//!             .required("rating", self.rating)
//!             .and_then(|r| v.range("rating", r, Some(1), Some(5)));
//!         v.finish(|| Some((service_id?, rating?)))
//!     }
//! }
//!
//! let err = Body { service_id: Some("x".into()), rating: None }.validate().unwrap_err();
//! assert_eq!(
//!     err.messages(),
//!     ["serviceId must be a UUID", "rating should not be empty"]
//! );
//! ```

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

/// 入力検証の失敗（違反メッセージの一覧）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("入力検証エラー: {}", .0.join(", "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new(messages: Vec<String>) -> Self {
        Self(messages)
    }

    /// 単一メッセージの検証エラーを作成する（JSON パース失敗など）
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

/// リクエスト型ごとの検証
///
/// 入力を消費して、検証済みの型付き値を返す。リフレクションに頼らず、
/// 型ごとに明示的に実装する。
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationErrors>;
}

/// 違反メッセージの収集器
///
/// 各ルールは成功時に変換後の値を `Some` で返し、失敗時は違反を記録して `None` を返す。
/// すべての項目を検査してから [`finish`](Violations::finish) で結果を確定する。
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 必須項目
    pub fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(format!("{field} should not be empty"));
        }
        value
    }

    /// 必須の文字列項目（空白のみも未入力とみなす）
    pub fn required_text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(text) if !text.trim().is_empty() => Some(text),
            _ => {
                self.push(format!("{field} should not be empty"));
                None
            }
        }
    }

    /// 空でない配列
    pub fn non_empty<T>(&mut self, field: &str, value: Option<Vec<T>>) -> Option<Vec<T>> {
        match value {
            Some(items) if !items.is_empty() => Some(items),
            _ => {
                self.push(format!("{field} should not be empty"));
                None
            }
        }
    }

    pub fn uuid(&mut self, field: &str, value: &str) -> Option<Uuid> {
        match Uuid::parse_str(value) {
            Ok(uuid) => Some(uuid),
            Err(_) => {
                self.push(format!("{field} must be a UUID"));
                None
            }
        }
    }

    /// http / https の絶対 URL
    pub fn url(&mut self, field: &str, value: &str) -> Option<String> {
        let valid = url::Url::parse(value)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
            .unwrap_or(false);
        if valid {
            Some(value.to_string())
        } else {
            self.push(format!("{field} must be a URL address"));
            None
        }
    }

    /// 列挙値（許可値は `E` のバリアント名）
    pub fn one_of<E>(&mut self, field: &str, value: &str) -> Option<E>
    where
        E: FromStr + strum::VariantNames,
    {
        match E::from_str(value) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.push(format!(
                    "{field} must be one of the following values: {}",
                    E::VARIANTS.join(", ")
                ));
                None
            }
        }
    }

    /// ISO 8601 の日付（`2026-01-31`）または日時（`2026-01-31T10:00:00Z` 等）
    pub fn iso_date(&mut self, field: &str, value: &str) -> Option<String> {
        let valid = DateTime::parse_from_rfc3339(value).is_ok()
            || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
            || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok();
        if valid {
            Some(value.to_string())
        } else {
            self.push(format!("{field} must be a valid ISO 8601 date string"));
            None
        }
    }

    /// 下限・上限（いずれも境界値を含む）
    pub fn range<T>(&mut self, field: &str, value: T, min: Option<T>, max: Option<T>) -> Option<T>
    where
        T: PartialOrd + Display + Copy,
    {
        if let Some(min) = min
            && value < min
        {
            self.push(format!("{field} must not be less than {min}"));
            return None;
        }
        if let Some(max) = max
            && value > max
        {
            self.push(format!("{field} must not be greater than {max}"));
            return None;
        }
        Some(value)
    }

    /// テキストで届いた数値（クエリパラメータ）を数値に変換する
    pub fn number(&mut self, field: &str, raw: &str) -> Option<f64> {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                self.push(format!("{field} must be a number"));
                None
            }
        }
    }

    /// テキストで届いた整数（ページ番号など）を変換する
    pub fn integer(&mut self, field: &str, raw: &str) -> Option<i64> {
        let n = self.number(field, raw)?;
        // i64::MAX as f64 は 2^63 に丸められ、i64 の範囲外になる
        if n.fract() != 0.0 || n < i64::MIN as f64 || n >= i64::MAX as f64 {
            self.push(format!("{field} must be an integer number"));
            return None;
        }
        Some(n as i64)
    }

    /// 2 つの任意項目のうち少なくとも一方が必要
    pub fn at_least_one(&mut self, a: (&str, bool), b: (&str, bool)) -> bool {
        let present = a.1 || b.1;
        if !present {
            self.push(format!("either {} or {} must be provided", a.0, b.0));
        }
        present
    }

    /// 検証結果を確定する
    ///
    /// 違反がなければ `build` で検証済みの値を組み立てる。`build` は各ルールが返した
    /// `Option` を `?` で取り出す想定で、違反なしなら必ず `Some` になる。
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.0.is_empty() {
            return Err(ValidationErrors(self.0));
        }
        build().ok_or_else(|| ValidationErrors::single("request is incomplete"))
    }
}
