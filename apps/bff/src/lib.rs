//! # Gatehouse BFF ライブラリ
//!
//! モバイル・Web クライアント向けの API ゲートウェイのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `adapter`: 下流サービス呼び出しとエラー変換
//! - `app_builder`: 依存の組み立てとルーター構築
//! - `client`: 下流サービスの RPC クライアント、汎用プロキシの転送クライアント
//! - `config`: 環境変数からの設定読み込み
//! - `error`: 公開 API のエラー
//! - `extract`: 入力の取り出しと検証
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（トークンガード、ロールガード、エンベロープ等）

pub mod adapter;
pub mod app_builder;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
