//! # リモート呼び出しアダプタ
//!
//! ドメイン領域ごとに 1 つのアダプタを置く。各メソッドは検証済みの入力と
//! 呼び出し元を受け取り、RPC を 1 回だけ行い、失敗は操作ごとの対応表で
//! [`BffError`](crate::error::BffError) に変換する。
//!
//! リトライ・キャッシュ・共有される可変状態は持たない。

pub mod cart;
pub mod order;
pub mod policy;
pub mod remote_error;
pub mod review;
pub mod subscription;
pub mod vnpay_config;

pub use cart::CartAdapter;
pub use order::OrderAdapter;
pub use policy::PolicyAdapter;
pub use remote_error::{ErrorRule, RemoteOutcome, translate_remote_error};
pub use review::ReviewAdapter;
pub use subscription::SubscriptionAdapter;
pub use vnpay_config::VnpayConfigAdapter;
