//! Profile API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{ProfileResponse, UpdateProfileRequest};
use crate::application::services::IdentityService;
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct ProfileAppState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = ApiResponse<ProfileResponse>),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<ProfileAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<ProfileResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.identity.profile(&auth.user_id).await {
        Ok((user, tenant, landlord)) => Ok(Json(ApiResponse::success(
            ProfileResponse::from_parts(user, tenant, landlord),
        ))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<ProfileResponse>),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn update_profile(
    State(state): State<ProfileAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .identity
        .update_profile(
            &auth.user_id,
            request.first_name,
            request.last_name,
            request.phone_number,
            request.bio,
            request.occupation,
            request.business_name,
        )
        .await
    {
        Ok((user, tenant, landlord)) => Ok(Json(ApiResponse::success(
            ProfileResponse::from_parts(user, tenant, landlord),
        ))),
        Err(e) => Err(domain_error_response(e)),
    }
}
