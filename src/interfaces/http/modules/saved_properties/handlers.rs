//! Saved property REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use super::dto::{SavePropertyRequest, SavedPropertyResponse};
use crate::application::services::IdentityService;
use crate::domain::saved_property::SavedProperty;
use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct SavedPropertyAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/saved-properties",
    tag = "Saved Properties",
    security(("bearer_auth" = [])),
    request_body = SavePropertyRequest,
    responses(
        (status = 201, description = "Property saved", body = ApiResponse<SavedPropertyResponse>),
        (status = 400, description = "Property already saved"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn save_property(
    State(state): State<SavedPropertyAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<SavePropertyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SavedPropertyResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    let tenant = state
        .identity
        .resolve_or_provision_tenant(&auth.user_id)
        .await
        .map_err(domain_error_response)?;

    let property = match state
        .repos
        .properties()
        .find_by_id(&request.property_id)
        .await
    {
        Ok(Some(property)) => property,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Property not found")),
            ));
        }
        Err(e) => return Err(domain_error_response(e)),
    };

    let saved = SavedProperty::new(
        Uuid::new_v4().to_string(),
        &tenant.id,
        &request.property_id,
    );

    match state.repos.saved_properties().save(saved).await {
        Ok(saved) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(SavedPropertyResponse::from_parts(
                saved,
                Some(property),
            ))),
        )),
        Err(DomainError::Conflict(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Property already saved")),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/saved-properties",
    tag = "Saved Properties",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's bookmarks, newest first", body = ApiResponse<Vec<SavedPropertyResponse>>)
    )
)]
pub async fn list_saved_properties(
    State(state): State<SavedPropertyAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<SavedPropertyResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let tenant = state
        .identity
        .resolve_or_provision_tenant(&auth.user_id)
        .await
        .map_err(domain_error_response)?;

    let saved = state
        .repos
        .saved_properties()
        .find_for_tenant(&tenant.id)
        .await
        .map_err(domain_error_response)?;

    let mut responses = Vec::with_capacity(saved.len());
    for entry in saved {
        let property = state
            .repos
            .properties()
            .find_by_id(&entry.property_id)
            .await
            .unwrap_or(None);
        responses.push(SavedPropertyResponse::from_parts(entry, property));
    }

    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/saved-properties/{property_id}",
    tag = "Saved Properties",
    security(("bearer_auth" = [])),
    params(("property_id" = String, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Bookmark removed"),
        (status = 404, description = "Bookmark not found")
    )
)]
pub async fn unsave_property(
    State(state): State<SavedPropertyAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(property_id): Path<String>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    let tenant = state
        .identity
        .resolve_or_provision_tenant(&auth.user_id)
        .await
        .map_err(domain_error_response)?;

    match state
        .repos
        .saved_properties()
        .delete(&tenant.id, &property_id)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success("Property unsaved".to_string()))),
        Err(e) => Err(domain_error_response(e)),
    }
}
