//! # 注文関連の列挙値
//!
//! 注文 API の入力検証で許可する値を定義する。
//! 状態遷移の妥当性は EC サービスが判定するため、ここでは値の列挙のみを持つ。

use serde::{Deserialize, Serialize};

/// 注文ステータス
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
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
}

/// 支払い方法
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
pub enum PaymentMethod {
    /// 代金引換
    Cod,
    /// VNPay オンライン決済
    Vnpay,
}
