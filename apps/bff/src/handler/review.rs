//! # レビュー API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /booking/review/create` - レビュー作成（USER）
//! - `GET /booking/review/list` - レビュー一覧
//! - `GET /booking/review/{id}` - レビュー取得
//! - `PUT /booking/review/update` - レビュー更新（USER）
//! - `DELETE /booking/review/{id}` - レビュー削除（USER / ADMIN）

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{
        Path,
        Query,
        State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use gatehouse_domain::{Principal, Validate, ValidationErrors, Violations};
use serde::Deserialize;

use super::paging;
use crate::{
    adapter::ReviewAdapter,
    client::{
        ById,
        booking_service::{CreateReview, ReviewQuery, UpdateReview},
    },
    error::BffError,
    extract::{validated_id, validated_json, validated_query},
    middleware::ApiSuccess,
};

/// レビュー API の共有状態
pub struct ReviewState {
    pub adapter: ReviewAdapter,
}

// --- リクエスト型 ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewBody {
    pub service_id: Option<String>,
    pub review:     Option<String>,
    pub rating:     Option<i64>,
}

impl Validate for CreateReviewBody {
    type Output = CreateReview;

    fn validate(self) -> Result<CreateReview, ValidationErrors> {
        let mut v = Violations::new();
        let service_id = v
            .required("serviceId", self.service_id)
            .and_then(|id| v.uuid("serviceId", &id));
        let review = v.required_text("review", self.review);
        let rating = v
            .required("rating", self.rating)
            .and_then(|r| v.range("rating", r, Some(1), Some(5)));
        v.finish(|| {
            Some(CreateReview {
                service_id: service_id?,
                review:     review?,
                rating:     rating?,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewBody {
    pub id:     Option<String>,
    pub review: Option<String>,
    pub rating: Option<i64>,
}

impl Validate for UpdateReviewBody {
    type Output = UpdateReview;

    fn validate(self) -> Result<UpdateReview, ValidationErrors> {
        let mut v = Violations::new();
        let id = v.required("id", self.id).and_then(|id| v.uuid("id", &id));
        let rating = self
            .rating
            .and_then(|r| v.range("rating", r, Some(1), Some(5)));
        v.finish(|| {
            Some(UpdateReview {
                id: id?,
                review: self.review,
                rating,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsQuery {
    pub service_id: Option<String>,
    pub page:       Option<String>,
    pub limit:      Option<String>,
}

impl Validate for ListReviewsQuery {
    type Output = ReviewQuery;

    fn validate(self) -> Result<ReviewQuery, ValidationErrors> {
        let mut v = Violations::new();
        let service_id = self
            .service_id
            .and_then(|id| v.uuid("serviceId", &id));
        let (page, limit) = paging(&mut v, self.page, self.limit);
        v.finish(|| {
            Some(ReviewQuery {
                service_id,
                page,
                limit,
            })
        })
    }
}

// --- ハンドラ ---

/// POST /booking/review/create
#[tracing::instrument(skip_all)]
pub async fn create_review(
    State(state): State<Arc<ReviewState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<CreateReviewBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let review = state.adapter.create(input, &principal).await?;
    Ok(ApiSuccess::created(review))
}

/// GET /booking/review/list
#[tracing::instrument(skip_all)]
pub async fn list_reviews(
    State(state): State<Arc<ReviewState>>,
    Extension(principal): Extension<Principal>,
    query: Result<Query<ListReviewsQuery>, QueryRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_query(query)?;
    let reviews = state.adapter.list(input, &principal).await?;
    Ok(ApiSuccess::ok(reviews))
}

/// GET /booking/review/{id}
#[tracing::instrument(skip_all)]
pub async fn get_review(
    State(state): State<Arc<ReviewState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess, BffError> {
    let id = validated_id("id", &id)?;
    let review = state.adapter.find(ById { id }, &principal).await?;
    Ok(ApiSuccess::ok(review))
}

/// PUT /booking/review/update
#[tracing::instrument(skip_all)]
pub async fn update_review(
    State(state): State<Arc<ReviewState>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<UpdateReviewBody>, JsonRejection>,
) -> Result<ApiSuccess, BffError> {
    let input = validated_json(body)?;
    let review = state.adapter.update(input, &principal).await?;
    Ok(ApiSuccess::ok(review))
}

/// DELETE /booking/review/{id}
#[tracing::instrument(skip_all)]
pub async fn delete_review(
    State(state): State<Arc<ReviewState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess, BffError> {
    let id = validated_id("id", &id)?;
    let result = state.adapter.delete(ById { id }, &principal).await?;
    Ok(ApiSuccess::ok(result))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    const SERVICE_ID: &str = "0190a6b2-7c4e-7a1b-9d3f-2e5c8b1a4f60";

    fn create_body(rating: Option<i64>) -> CreateReviewBody {
        CreateReviewBody {
            service_id: Some(SERVICE_ID.to_string()),
            review: Some("丁寧な施術でした".to_string()),
            rating,
        }
    }

    #[test]
    fn test_作成リクエストの検証で型付きの入力になる() {
        let input = create_body(Some(5)).validate().unwrap();

        assert_eq!(
            input,
            CreateReview {
                service_id: Uuid::parse_str(SERVICE_ID).unwrap(),
                review:     "丁寧な施術でした".to_string(),
                rating:     5,
            }
        );
    }

    #[test]
    fn test_評価が未指定だと必須違反になる() {
        let err = create_body(None).validate().unwrap_err();

        assert_eq!(err.messages(), ["rating should not be empty"]);
    }

    #[rstest]
    #[case(0, "rating must not be less than 1")]
    #[case(6, "rating must not be greater than 5")]
    fn test_評価は1から5の範囲(#[case] rating: i64, #[case] expected: &str) {
        let err = create_body(Some(rating)).validate().unwrap_err();

        assert_eq!(err.messages(), [expected]);
    }

    #[test]
    fn test_複数の違反をすべて返す() {
        let body = CreateReviewBody {
            service_id: Some("abc".to_string()),
            review:     Some("  ".to_string()),
            rating:     None,
        };

        let err = body.validate().unwrap_err();

        assert_eq!(
            err.messages(),
            [
                "serviceId must be a UUID",
                "review should not be empty",
                "rating should not be empty",
            ]
        );
    }

    #[test]
    fn test_一覧クエリの数値はテキストから変換する() {
        let query = ListReviewsQuery {
            service_id: None,
            page:       Some("2".to_string()),
            limit:      Some("abc".to_string()),
        };

        let err = query.validate().unwrap_err();

        assert_eq!(err.messages(), ["limit must be a number"]);
    }
}
