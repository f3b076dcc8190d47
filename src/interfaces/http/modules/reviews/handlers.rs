//! Review REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    CreateReviewRequest, ReviewEligibilityResponse, ReviewListQuery, ReviewResponse,
    UpdateReviewRequest,
};
use crate::application::services::ReviewService;
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct ReviewAppState {
    pub service: Arc<ReviewService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = "Reviews",
    params(ReviewListQuery),
    responses(
        (status = 200, description = "Reviews, newest first", body = ApiResponse<Vec<ReviewResponse>>)
    )
)]
pub async fn list_reviews(
    State(state): State<ReviewAppState>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<ApiResponse<Vec<ReviewResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.reviews_for_property(&query.property_id).await {
        Ok(reviews) => Ok(Json(ApiResponse::success(
            reviews.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/eligibility",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(ReviewListQuery),
    responses(
        (status = 200, description = "Whether the caller may review the property", body = ApiResponse<ReviewEligibilityResponse>)
    )
)]
pub async fn check_eligibility(
    State(state): State<ReviewAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<ReviewListQuery>,
) -> Json<ApiResponse<ReviewEligibilityResponse>> {
    let eligibility = state
        .service
        .check_eligibility(&auth.user_id, &query.property_id)
        .await;
    Json(ApiResponse::success(eligibility.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review created", body = ApiResponse<ReviewResponse>),
        (status = 409, description = "Booking already reviewed"),
        (status = 403, description = "Not the booking's tenant")
    )
)]
pub async fn create_review(
    State(state): State<ReviewAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<Json<ApiResponse<ReviewResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .service
        .create_review(
            &auth.user_id,
            &request.property_id,
            &request.booking_id,
            request.rating,
            request.review_text,
        )
        .await
    {
        Ok(review) => Ok(Json(ApiResponse::success(review.into()))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<ReviewResponse>),
        (status = 403, description = "Not the review's author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    State(state): State<ReviewAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> Result<Json<ApiResponse<ReviewResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .service
        .update_review(&auth.user_id, &id, request.rating, request.review_text)
        .await
    {
        Ok(review) => Ok(Json(ApiResponse::success(review.into()))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 403, description = "Not the review's author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<ReviewAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.delete_review(&auth.user_id, &id).await {
        Ok(()) => Ok(Json(ApiResponse::success("Review deleted".to_string()))),
        Err(e) => Err(domain_error_response(e)),
    }
}
