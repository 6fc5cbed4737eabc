//! # 入力の取り出しと検証
//!
//! ハンドラは axum の抽出結果を `Result` のまま受け取り、ここで
//! デシリアライズ失敗と検証違反を [`BffError::ValidationFailed`] に揃える。
//!
//! ```ignore
//! async fn handler(body: Result<Json<CreateReviewBody>, JsonRejection>) -> Result<ApiSuccess, BffError> {
//!     let input = validated_json(body)?;
//!     // ...
//! }
//! ```

use axum::{
    Json,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
};
use gatehouse_domain::{Validate, Violations};
use uuid::Uuid;

use crate::error::BffError;

/// JSON ボディを取り出して検証する
pub fn validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T::Output, BffError> {
    let Json(body) = result.map_err(|err| BffError::ValidationFailed(vec![err.body_text()]))?;
    Ok(body.validate()?)
}

/// クエリパラメータを取り出して検証する
pub fn validated_query<T: Validate>(
    result: Result<Query<T>, QueryRejection>,
) -> Result<T::Output, BffError> {
    let Query(query) = result.map_err(|err| BffError::ValidationFailed(vec![err.body_text()]))?;
    Ok(query.validate()?)
}

/// パスパラメータの ID を UUID として検証する
pub fn validated_id(field: &str, raw: &str) -> Result<Uuid, BffError> {
    let mut v = Violations::new();
    let id = v.uuid(field, raw);
    Ok(v.finish(|| id)?)
}
