//! # テナントポリシー種別

use serde::{Deserialize, Serialize};

/// テナントが公開するポリシー文書の種別
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyType {
    Privacy,
    TermsOfService,
    Refund,
    Cancellation,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::VariantNames;

    use super::*;

    #[test]
    fn test_policy_typeは大文字スネークケースで扱う() {
        assert_eq!(
            PolicyType::from_str("TERMS_OF_SERVICE").unwrap(),
            PolicyType::TermsOfService
        );
        assert!(PolicyType::VARIANTS.contains(&"REFUND"));
    }
}
