//! Property REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use super::dto::{
    money_from_f64, CreatePropertyRequest, PropertyListQuery, PropertyResponse,
    UpdatePropertyRequest,
};
use crate::domain::property::{Property, PropertyFilter};
use crate::domain::user::LandlordProfile;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    domain_error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::validations::validate_pagination;
use crate::shared::PaginationParams;

#[derive(Clone)]
pub struct PropertyAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Resolve the caller's landlord profile or fail with 403
async fn require_landlord(
    state: &PropertyAppState,
    auth: &AuthenticatedUser,
) -> Result<LandlordProfile, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .repos
        .users()
        .find_landlord_by_user_id(&auth.user_id)
        .await
    {
        Ok(Some(landlord)) => Ok(landlord),
        Ok(None) => Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Landlord profile required")),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/properties",
    tag = "Properties",
    params(PropertyListQuery),
    responses(
        (status = 200, description = "Active listings", body = ApiResponse<PaginatedResponse<PropertyResponse>>)
    )
)]
pub async fn list_properties(
    State(state): State<PropertyAppState>,
    Query(query): Query<PropertyListQuery>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<PropertyResponse>>>,
    (StatusCode, Json<ApiResponse<()>>),
> {
    let (page, limit) = validate_pagination(Some(query.page), Some(query.limit));

    let min_price = query
        .min_price
        .map(|v| money_from_f64(v, "min_price"))
        .transpose()
        .map_err(|msg| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(msg))))?;
    let max_price = query
        .max_price
        .map(|v| money_from_f64(v, "max_price"))
        .transpose()
        .map_err(|msg| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(msg))))?;

    let filter = PropertyFilter {
        city: query.city,
        min_price,
        max_price,
        bedrooms: query.bedrooms,
    };

    match state
        .repos
        .properties()
        .list(filter, PaginationParams { page, limit })
        .await
    {
        Ok(result) => Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
            result,
            PropertyResponse::from,
        )))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    params(("id" = String, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property details", body = ApiResponse<PropertyResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_property(
    State(state): State<PropertyAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PropertyResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.properties().find_by_id(&id).await {
        Ok(Some(property)) => Ok(Json(ApiResponse::success(property.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Property {} not found", id))),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/mine",
    tag = "Properties",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's own listings", body = ApiResponse<Vec<PropertyResponse>>),
        (status = 403, description = "Not a landlord")
    )
)]
pub async fn list_my_properties(
    State(state): State<PropertyAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<PropertyResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let landlord = require_landlord(&state, &auth).await?;
    match state
        .repos
        .properties()
        .find_for_landlord(&landlord.id)
        .await
    {
        Ok(properties) => Ok(Json(ApiResponse::success(
            properties.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/properties",
    tag = "Properties",
    security(("bearer_auth" = [])),
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<PropertyResponse>),
        (status = 403, description = "Not a landlord")
    )
)]
pub async fn create_property(
    State(state): State<PropertyAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    let landlord = require_landlord(&state, &auth).await?;

    let price = money_from_f64(request.price_per_month, "price_per_month")
        .map_err(|msg| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(msg))))?;

    let mut property = Property::new(
        Uuid::new_v4().to_string(),
        &landlord.id,
        request.title,
        request.address,
        request.city,
        price,
        request.bedrooms,
        request.bathrooms,
    );
    property.description = request.description;

    match state.repos.properties().save(property).await {
        Ok(property) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(property.into())),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Property ID")),
    request_body = UpdatePropertyRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<PropertyResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_property(
    State(state): State<PropertyAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePropertyRequest>,
) -> Result<Json<ApiResponse<PropertyResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let landlord = require_landlord(&state, &auth).await?;

    let mut property = match state.repos.properties().find_by_id(&id).await {
        Ok(Some(property)) => property,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("Property {} not found", id))),
            ));
        }
        Err(e) => return Err(domain_error_response(e)),
    };

    if !property.is_owned_by(&landlord.id) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "Only the owning landlord can edit this property",
            )),
        ));
    }

    if let Some(title) = request.title {
        property.title = title;
    }
    if request.description.is_some() {
        property.description = request.description;
    }
    if let Some(address) = request.address {
        property.address = address;
    }
    if let Some(city) = request.city {
        property.city = city;
    }
    if let Some(price) = request.price_per_month {
        property.price_per_month = money_from_f64(price, "price_per_month")
            .map_err(|msg| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(msg))))?;
    }
    if let Some(bedrooms) = request.bedrooms {
        property.bedrooms = bedrooms;
    }
    if let Some(bathrooms) = request.bathrooms {
        property.bathrooms = bathrooms;
    }
    if let Some(is_active) = request.is_active {
        property.is_active = is_active;
    }
    property.updated_at = Utc::now();

    match state.repos.properties().update(property).await {
        Ok(property) => Ok(Json(ApiResponse::success(property.into()))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_property(
    State(state): State<PropertyAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    let landlord = require_landlord(&state, &auth).await?;

    let property = match state.repos.properties().find_by_id(&id).await {
        Ok(Some(property)) => property,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("Property {} not found", id))),
            ));
        }
        Err(e) => return Err(domain_error_response(e)),
    };

    if !property.is_owned_by(&landlord.id) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "Only the owning landlord can delete this property",
            )),
        ));
    }

    match state.repos.properties().delete(&id).await {
        Ok(()) => Ok(Json(ApiResponse::success("Property deleted".to_string()))),
        Err(e) => Err(domain_error_response(e)),
    }
}
