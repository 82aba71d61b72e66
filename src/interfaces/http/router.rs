//! API Router with Swagger UI

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::{accounts, health};

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
        // Accounts
        accounts::create_account,
        accounts::list_accounts_by_roles,
        accounts::list_sub_admins,
        accounts::list_audit_managers,
        accounts::list_port_agents,
        accounts::list_patients,
        accounts::list_doctors,
        accounts::list_general_physicians,
        accounts::delete_account,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            accounts::AccountDto,
            accounts::CreateAccountRequest,
            accounts::AccountCreatedResponse,
            accounts::AccountListResponse,
            accounts::AccountDeletedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Server health check endpoints"),
        (name = "accounts", description = "Admin-only account provisioning, role listings and deletion"),
    ),
    info(
        title = "CarePort Admin API",
        version = "1.0.0",
        description = "REST API for administrative account provisioning and role-based access"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// Every /api/v1 route sits behind the authentication gate and the
/// admin gate, in that order. Health and Swagger stay open.
pub fn create_api_router(auth_state: AuthState, accounts_state: accounts::AccountsState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin_routes = Router::new()
        .route(
            "/accounts",
            post(accounts::create_account).get(accounts::list_accounts_by_roles),
        )
        .route("/accounts/sub-admins", get(accounts::list_sub_admins))
        .route(
            "/accounts/audit-managers",
            get(accounts::list_audit_managers),
        )
        .route("/accounts/port-agents", get(accounts::list_port_agents))
        .route("/accounts/patients", get(accounts::list_patients))
        .route("/accounts/doctors", get(accounts::list_doctors))
        .route(
            "/accounts/general-physicians",
            get(accounts::list_general_physicians),
        )
        .route("/accounts/{user_id}", delete(accounts::delete_account))
        // admin gate runs after identity resolution
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(accounts_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1", admin_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
