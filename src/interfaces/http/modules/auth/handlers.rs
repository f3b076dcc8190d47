//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::domain::user::{User, UserRole};
use crate::domain::{DomainError, RepositoryProvider};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserInfo>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), (StatusCode, Json<ApiResponse<()>>)> {
    let role = match request.role.as_deref() {
        None | Some("TENANT") => UserRole::Tenant,
        Some("LANDLORD") => UserRole::Landlord,
        Some(other) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown role: {}", other))),
            ));
        }
    };

    if let Ok(Some(_)) = state.repos.users().find_by_email(&request.email).await {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Email already registered")),
        ));
    }

    let password_hash = hash_password(&request.password).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let mut user = User::new(Uuid::new_v4().to_string(), request.email, password_hash, role);
    user.first_name = request.first_name;
    user.last_name = request.last_name;

    match state.repos.users().create_with_profile(user).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into())))),
        // Concurrent registration for the same email loses to the first row
        Err(DomainError::Conflict(_)) => Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Email already registered")),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let user = state
        .repos
        .users()
        .find_by_email(&request.email)
        .await
        .map_err(domain_error_response)?;

    let Some(mut user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ));
    };

    if !user.is_active {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Account is disabled")),
        ));
    }

    let password_valid = verify_password(&request.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ));
    }

    user.last_login_at = Some(Utc::now());
    // login still succeeds if the timestamp write is lost
    let _ = state.repos.users().update(user.clone()).await;

    let token = create_token(
        &user.id,
        &user.email,
        user.role.as_str(),
        &state.jwt_config,
    )
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let response = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: user.into(),
    };

    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.users().find_by_id(&auth.user_id).await {
        Ok(Some(user)) => Ok(Json(ApiResponse::success(user.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}
