//! # Gatehouse BFF サーバー
//!
//! モバイル・Web クライアントと下流サービスの間に立つ API ゲートウェイ。
//!
//! ## 役割
//!
//! - **認証**: Bearer トークンを Auth Service で検証する
//! - **認可**: ルートごとのロール要件を検証する
//! - **入力検証**: 不正な入力は下流サービスを呼ばずに 400 で返す
//! - **エラー変換**: 下流サービスのエラーコードを HTTP ステータスに変換する
//! - **汎用プロキシ**: `/api/gateway/{service}/*` を登録済みサービスへ転送する
//!
//! ## アーキテクチャ
//!
//! ```text
//!                              ┌──────────────────┐
//!                         ┌───▶│  Auth Service    │
//! ┌──────────────┐     ┌──┴───┐└──────────────────┘
//! │ Mobile / Web │────▶│ BFF  │───▶ Booking / E-commerce / Tenant Service
//! └──────────────┘     └──┬───┘
//!                         └───▶ 汎用プロキシの転送先
//! ```
//!
//! 環境変数は [`config`](gatehouse_bff::config) を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p gatehouse-bff
//!
//! # 本番環境（環境変数を直接指定）
//! BFF_PORT=3000 AUTH_URL=http://... cargo run -p gatehouse-bff --release
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use gatehouse_bff::{
    app_builder::{AppDependencies, build_app},
    config::BffConfig,
};
use gatehouse_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// BFF サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("bff"));
    let _tracing_guard = tracing::info_span!("app", service = "bff").entered();

    let config = BffConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!("BFF サーバーを起動します: {}:{}", config.host, config.port);
    tracing::info!(
        gateway_services = config.gateway_services.len(),
        well_known_dir = %config.well_known_dir.display(),
        "汎用プロキシと静的ファイルの設定"
    );

    let app = build_app(AppDependencies::from_config(&config));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("BFF サーバーが起動しました: {}", addr);

    // Graceful shutdown は axum::serve が自動的に処理する
    axum::serve(listener, app).await?;

    Ok(())
}
