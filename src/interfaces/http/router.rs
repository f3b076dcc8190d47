//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{
    AvailabilityService, BookingService, IdentityService, ReviewService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    auth, availability, bookings, health, profile, properties, reviews, saved_properties,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        // Profile
        profile::get_profile,
        profile::update_profile,
        // Properties
        properties::list_properties,
        properties::get_property,
        properties::list_my_properties,
        properties::create_property,
        properties::update_property,
        properties::delete_property,
        // Availability
        availability::create_availability,
        availability::list_availability,
        availability::update_availability,
        availability::delete_availability,
        // Bookings
        bookings::create_booking,
        bookings::check_availability,
        bookings::list_my_bookings,
        bookings::list_property_bookings,
        bookings::property_calendar,
        bookings::accept_booking,
        bookings::reject_booking,
        bookings::complete_booking,
        bookings::confirm_booking,
        bookings::cancel_booking,
        // Reviews
        reviews::list_reviews,
        reviews::check_eligibility,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        // Saved properties
        saved_properties::save_property,
        saved_properties::list_saved_properties,
        saved_properties::unsave_property,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<properties::PropertyResponse>,
            // Health
            health::HealthResponse,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            // Profile
            profile::ProfileResponse,
            profile::TenantProfileDto,
            profile::LandlordProfileDto,
            profile::UpdateProfileRequest,
            // Properties
            properties::PropertyResponse,
            properties::CreatePropertyRequest,
            properties::UpdatePropertyRequest,
            // Availability
            availability::AvailabilityWindowResponse,
            availability::CreateAvailabilityRequest,
            availability::UpdateAvailabilityRequest,
            availability::DeleteResponse,
            // Bookings
            bookings::BookingResponse,
            bookings::CreateBookingRequest,
            bookings::AvailabilityCheckResponse,
            bookings::PropertyCalendarResponse,
            // Reviews
            reviews::ReviewResponse,
            reviews::ReviewEligibilityResponse,
            reviews::CreateReviewRequest,
            reviews::UpdateReviewRequest,
            // Saved properties
            saved_properties::SavedPropertyResponse,
            saved_properties::SavePropertyRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User authentication: registration, login (JWT), current user"),
        (name = "Profile", description = "Role-aware profile management for tenants and landlords"),
        (name = "Properties", description = "Rental listing CRUD and search"),
        (name = "Availability", description = "Landlord-declared availability windows with price overrides"),
        (name = "Bookings", description = "Booking requests, conflict checking and lifecycle"),
        (name = "Reviews", description = "Stay reviews with completed-booking eligibility gating"),
        (name = "Saved Properties", description = "Tenant bookmarks"),
    ),
    info(
        title = "Rentora API",
        version = "0.1.0",
        description = "REST API for the Rentora property-rental marketplace",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    identity: Arc<IdentityService>,
    booking_service: Arc<BookingService>,
    availability_service: Arc<AvailabilityService>,
    review_service: Arc<ReviewService>,
    jwt_config: JwtConfig,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_state = auth::AuthHandlerState {
        repos: repos.clone(),
        jwt_config,
    };
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Profile routes (protected)
    let profile_routes = Router::new()
        .route(
            "/",
            get(profile::get_profile).put(profile::update_profile),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(profile::ProfileAppState {
            identity: identity.clone(),
        });

    // Property routes (protected)
    let property_routes = Router::new()
        .route(
            "/",
            get(properties::list_properties).post(properties::create_property),
        )
        .route("/mine", get(properties::list_my_properties))
        .route(
            "/{id}",
            get(properties::get_property)
                .put(properties::update_property)
                .delete(properties::delete_property),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(properties::PropertyAppState {
            repos: repos.clone(),
        });

    // Per-property calendar and booking listing (protected)
    let booking_state = bookings::BookingAppState {
        service: booking_service,
    };
    let property_booking_routes = Router::new()
        .route("/{id}/calendar", get(bookings::property_calendar))
        .route("/{id}/bookings", get(bookings::list_property_bookings))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(booking_state.clone());

    // Availability routes (protected)
    let availability_routes = Router::new()
        .route(
            "/",
            get(availability::list_availability).post(availability::create_availability),
        )
        .route(
            "/{id}",
            axum::routing::patch(availability::update_availability)
                .delete(availability::delete_availability),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(availability::AvailabilityAppState {
            service: availability_service,
        });

    // Booking routes (protected)
    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/check", get(bookings::check_availability))
        .route("/mine", get(bookings::list_my_bookings))
        .route("/{id}/accept", post(bookings::accept_booking))
        .route("/{id}/reject", post(bookings::reject_booking))
        .route("/{id}/complete", post(bookings::complete_booking))
        .route("/{id}/confirm", post(bookings::confirm_booking))
        .route("/{id}/cancel", post(bookings::cancel_booking))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(booking_state);

    // Review routes (protected)
    let review_routes = Router::new()
        .route(
            "/",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route("/eligibility", get(reviews::check_eligibility))
        .route(
            "/{id}",
            put(reviews::update_review).delete(reviews::delete_review),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(reviews::ReviewAppState {
            service: review_service,
        });

    // Saved property routes (protected)
    let saved_property_routes = Router::new()
        .route(
            "/",
            get(saved_properties::list_saved_properties).post(saved_properties::save_property),
        )
        .route("/{property_id}", delete(saved_properties::unsave_property))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(saved_properties::SavedPropertyAppState { repos, identity });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Profile
        .nest("/api/v1/profile", profile_routes)
        // Properties
        .nest("/api/v1/properties", property_routes)
        .nest("/api/v1/properties", property_booking_routes)
        // Availability
        .nest("/api/v1/availability", availability_routes)
        // Bookings
        .nest("/api/v1/bookings", booking_routes)
        // Reviews
        .nest("/api/v1/reviews", review_routes)
        // Saved properties
        .nest("/api/v1/saved-properties", saved_property_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
