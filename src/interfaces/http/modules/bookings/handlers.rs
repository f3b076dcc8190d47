//! Booking REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AvailabilityCheckQuery, AvailabilityCheckResponse, BookingResponse, CreateBookingRequest,
    PropertyCalendarResponse,
};
use crate::application::services::BookingService;
use crate::domain::BookingStatus;
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct BookingAppState {
    pub service: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking requested", body = ApiResponse<BookingResponse>),
        (status = 409, description = "Dates not available"),
        (status = 403, description = "Caller is not a tenant")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    match state
        .service
        .request_booking(
            &auth.user_id,
            &request.property_id,
            request.check_in_date,
            request.check_out_date,
        )
        .await
    {
        Ok(booking) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(booking.into())),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/check",
    tag = "Bookings",
    params(AvailabilityCheckQuery),
    responses(
        (status = 200, description = "Whether the range is free", body = ApiResponse<AvailabilityCheckResponse>)
    )
)]
pub async fn check_availability(
    State(state): State<BookingAppState>,
    Query(query): Query<AvailabilityCheckQuery>,
) -> Json<ApiResponse<AvailabilityCheckResponse>> {
    let available = state
        .service
        .check_property_availability(
            &query.property_id,
            query.check_in_date,
            query.check_out_date,
        )
        .await;
    Json(ApiResponse::success(AvailabilityCheckResponse { available }))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/mine",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's bookings", body = ApiResponse<Vec<BookingResponse>>),
        (status = 403, description = "Caller is not a tenant")
    )
)]
pub async fn list_my_bookings(
    State(state): State<BookingAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<BookingResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.my_bookings(&auth.user_id).await {
        Ok(bookings) => Ok(Json(ApiResponse::success(
            bookings.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property's bookings", body = ApiResponse<Vec<BookingResponse>>),
        (status = 403, description = "Not the owning landlord")
    )
)]
pub async fn list_property_bookings(
    State(state): State<BookingAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<BookingResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.bookings_for_property(&auth.user_id, &id).await {
        Ok(bookings) => Ok(Json(ApiResponse::success(
            bookings.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}/calendar",
    tag = "Bookings",
    params(("id" = String, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Windows and active bookings", body = ApiResponse<PropertyCalendarResponse>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn property_calendar(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PropertyCalendarResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.calendar(&id).await {
        Ok((windows, bookings)) => Ok(Json(ApiResponse::success(PropertyCalendarResponse {
            windows: windows.into_iter().map(Into::into).collect(),
            bookings: bookings.into_iter().map(Into::into).collect(),
        }))),
        Err(e) => Err(domain_error_response(e)),
    }
}

async fn landlord_transition(
    state: BookingAppState,
    auth: AuthenticatedUser,
    booking_id: String,
    target: BookingStatus,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .service
        .landlord_transition(&auth.user_id, &booking_id, target)
        .await
    {
        Ok(booking) => Ok(Json(ApiResponse::success(booking.into()))),
        Err(e) => Err(domain_error_response(e)),
    }
}

async fn tenant_transition(
    state: BookingAppState,
    auth: AuthenticatedUser,
    booking_id: String,
    target: BookingStatus,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .service
        .tenant_transition(&auth.user_id, &booking_id, target)
        .await
    {
        Ok(booking) => Ok(Json(ApiResponse::success(booking.into()))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/accept",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking accepted", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Not the owning landlord")
    )
)]
pub async fn accept_booking(
    State(state): State<BookingAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    landlord_transition(state, auth, id, BookingStatus::Accepted).await
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/reject",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking rejected", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Not the owning landlord")
    )
)]
pub async fn reject_booking(
    State(state): State<BookingAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    landlord_transition(state, auth, id, BookingStatus::Rejected).await
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/complete",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Stay marked completed", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Not the owning landlord")
    )
)]
pub async fn complete_booking(
    State(state): State<BookingAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    landlord_transition(state, auth, id, BookingStatus::Completed).await
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/confirm",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking confirmed", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Not the booking's tenant")
    )
)]
pub async fn confirm_booking(
    State(state): State<BookingAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    tenant_transition(state, auth, id, BookingStatus::Confirmed).await
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Not the booking's tenant")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    tenant_transition(state, auth, id, BookingStatus::Cancelled).await
}
