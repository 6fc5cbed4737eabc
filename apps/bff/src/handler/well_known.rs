//! # ディープリンク検証ファイル
//!
//! モバイルアプリのディープリンク検証用ファイルを設定ディレクトリから返す。
//! `application/json` で返し、エンベロープでは包まない。

use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::BffError;

/// 配信を許可するファイル名
const SERVED_FILES: &[&str] = &["apple-app-site-association", "assetlinks.json"];

/// 静的ファイル配信の共有状態
pub struct WellKnownState {
    pub dir: PathBuf,
}

/// GET /.well-known/{file}
#[tracing::instrument(skip_all)]
pub async fn serve_well_known(
    State(state): State<Arc<WellKnownState>>,
    Path(file): Path<String>,
) -> Result<Response, BffError> {
    let not_found = || BffError::NotFound(format!("Cannot GET /.well-known/{file}"));

    if !SERVED_FILES.contains(&file.as_str()) {
        return Err(not_found());
    }

    let contents = tokio::fs::read(state.dir.join(&file)).await.map_err(|e| {
        tracing::warn!(error = %e, file = %file, "ディープリンク検証ファイルを読み込めません");
        not_found()
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], contents).into_response())
}
