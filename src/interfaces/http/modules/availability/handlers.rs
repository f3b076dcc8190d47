//! Availability window REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AvailabilityListQuery, AvailabilityWindowResponse, CreateAvailabilityRequest, DeleteResponse,
    UpdateAvailabilityRequest,
};
use crate::application::services::AvailabilityService;
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::properties::money_from_f64;

#[derive(Clone)]
pub struct AvailabilityAppState {
    pub service: Arc<AvailabilityService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/availability",
    tag = "Availability",
    security(("bearer_auth" = [])),
    request_body = CreateAvailabilityRequest,
    responses(
        (status = 201, description = "Window created", body = ApiResponse<AvailabilityWindowResponse>),
        (status = 403, description = "Not the owning landlord"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn create_availability(
    State(state): State<AvailabilityAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateAvailabilityRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<AvailabilityWindowResponse>>),
    (StatusCode, Json<ApiResponse<()>>),
> {
    let price_override = request
        .price_override
        .map(|v| money_from_f64(v, "price_override"))
        .transpose()
        .map_err(|msg| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(msg))))?;

    match state
        .service
        .create_window(
            &auth.user_id,
            &request.property_id,
            request.start_date,
            request.end_date,
            request.is_available,
            price_override,
        )
        .await
    {
        Ok(window) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(window.into())),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/availability",
    tag = "Availability",
    params(AvailabilityListQuery),
    responses(
        (status = 200, description = "Windows ordered by start date", body = ApiResponse<Vec<AvailabilityWindowResponse>>)
    )
)]
pub async fn list_availability(
    State(state): State<AvailabilityAppState>,
    Query(query): Query<AvailabilityListQuery>,
) -> Result<Json<ApiResponse<Vec<AvailabilityWindowResponse>>>, (StatusCode, Json<ApiResponse<()>>)>
{
    match state.service.list_for_property(&query.property_id).await {
        Ok(windows) => Ok(Json(ApiResponse::success(
            windows.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/availability/{id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Availability window ID")),
    request_body = UpdateAvailabilityRequest,
    responses(
        (status = 200, description = "Updated window", body = ApiResponse<AvailabilityWindowResponse>),
        (status = 403, description = "Not the owning landlord"),
        (status = 404, description = "Window not found")
    )
)]
pub async fn update_availability(
    State(state): State<AvailabilityAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateAvailabilityRequest>,
) -> Result<Json<ApiResponse<AvailabilityWindowResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let price_override = request
        .price_override_update()
        .map_err(|msg| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(msg))))?;

    match state
        .service
        .update_window(
            &auth.user_id,
            &id,
            request.start_date,
            request.end_date,
            request.is_available,
            price_override,
        )
        .await
    {
        Ok(window) => Ok(Json(ApiResponse::success(window.into()))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/availability/{id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Availability window ID")),
    responses(
        (status = 200, description = "Window deleted", body = ApiResponse<DeleteResponse>),
        (status = 403, description = "Not the owning landlord"),
        (status = 404, description = "Window not found")
    )
)]
pub async fn delete_availability(
    State(state): State<AvailabilityAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.delete_window(&auth.user_id, &id).await {
        Ok(()) => Ok(Json(ApiResponse::success(DeleteResponse { success: true }))),
        Err(e) => Err(domain_error_response(e)),
    }
}
