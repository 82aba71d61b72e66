//! Authentication middleware for Axum
//!
//! Two sequential gates per protected request: token verification
//! (signature + expiry against the server secret), then identity
//! resolution (the subject must still exist in the identity store, role
//! populated). Admin-only routes add a third, independent check on the
//! resolved role.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use crate::domain::{RoleName, User, UserRepositoryInterface};
use crate::infrastructure::crypto::jwt::{verify_token, AuthError, JwtConfig};
use crate::interfaces::http::common::{error_response, ApiResponse};

/// Authentication state: JWT config plus the identity store used to
/// re-resolve the subject on every request.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub users: Arc<dyn UserRepositoryInterface>,
}

/// The resolved caller, attached to the request extensions after
/// successful identity resolution. Role is always populated.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.user.role.name == RoleName::Admin
    }
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
}

/// JWT authentication middleware - requires a valid token for a user
/// that still exists.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::MissingToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(_) => return auth_error_response(AuthError::InvalidToken),
    };
    if claims.is_expired() {
        return auth_error_response(AuthError::ExpiredToken);
    }

    // Identity resolution: tokens outlive their subject, so the store is
    // the authority on whether the caller still exists. A store failure
    // says nothing about the token and must not read as a rejected one.
    match auth_state.users.find_by_id(&claims.sub).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(AuthenticatedUser { user });
            next.run(request).await
        }
        Ok(None) => auth_error_response(AuthError::UnknownSubject),
        Err(e) => error_response::<()>(e).into_response(),
    }
}

/// Admin-only middleware - must be layered after `auth_middleware`.
///
/// Performs no lookup of its own; it only inspects the resolved
/// identity. A missing or unresolvable role is never an admin.
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    let user = request.extensions().get::<AuthenticatedUser>();

    match user {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => auth_error_response(AuthError::Forbidden),
        None => auth_error_response(AuthError::MissingToken),
    }
}

/// Create an authentication error response
fn auth_error_response(error: AuthError) -> Response {
    let status = match error {
        AuthError::MissingToken
        | AuthError::InvalidToken
        | AuthError::ExpiredToken
        | AuthError::UnknownSubject => StatusCode::UNAUTHORIZED,
        AuthError::Forbidden => StatusCode::FORBIDDEN,
    };

    let body = Json(ApiResponse::<()>::error(error.to_string()));
    (status, body).into_response()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Extension;
    use axum::routing::get;
    use axum::{middleware, Router};
    use sea_orm::{ActiveModelTrait, Set};
    use sea_orm_migration::MigratorTrait;
    use tower::Service;

    use crate::domain::{CreateUserDto, DomainError, DomainResult, Role, UserRepositoryInterface};
    use crate::infrastructure::crypto::jwt::create_token;
    use crate::infrastructure::database::entities::role;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    /// Identity store whose backend is down.
    struct FailingUsers;

    fn store_down() -> DomainError {
        DomainError::Storage("connection pool exhausted".to_string())
    }

    #[async_trait::async_trait]
    impl UserRepositoryInterface for FailingUsers {
        async fn create_user(&self, _dto: CreateUserDto) -> DomainResult<User> {
            Err(store_down())
        }
        async fn find_by_id(&self, _id: &str) -> DomainResult<Option<User>> {
            Err(store_down())
        }
        async fn find_by_email(&self, _email: &str) -> DomainResult<Option<User>> {
            Err(store_down())
        }
        async fn find_by_phone(&self, _phone_number: &str) -> DomainResult<Option<User>> {
            Err(store_down())
        }
        async fn list_by_role_ids(&self, _role_ids: &[String]) -> DomainResult<Vec<User>> {
            Err(store_down())
        }
        async fn delete_user(&self, _id: &str) -> DomainResult<()> {
            Err(store_down())
        }
    }

    async fn seed_role(db: &sea_orm::DatabaseConnection, name: RoleName) -> Role {
        let id = format!("role-{}", name.as_str().to_lowercase().replace(' ', "-"));
        role::ActiveModel {
            id: Set(id.clone()),
            name: Set(name.as_str().to_string()),
        }
        .insert(db)
        .await
        .unwrap();
        Role { id, name }
    }

    async fn seed_user(users: &UserRepository, id: &str, email: &str, role: Role) {
        users
            .create_user(CreateUserDto {
                id: id.to_string(),
                first_name: "Test".to_string(),
                last_name: None,
                full_name: "Test".to_string(),
                email: email.to_string(),
                phone_number: format!("+{}", id),
                password_hash: "$2b$12$hash".to_string(),
                role,
                doctor_profile: None,
            })
            .await
            .unwrap();
    }

    async fn setup() -> (AuthState, Arc<UserRepository>) {
        let db = init_database(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
        })
        .await
        .unwrap();
        Migrator::up(&db, None).await.unwrap();

        let admin_role = seed_role(&db, RoleName::Admin).await;
        let patient_role = seed_role(&db, RoleName::Patient).await;

        let users = Arc::new(UserRepository::new(db));
        seed_user(&users, "admin-1", "admin@example.com", admin_role).await;
        seed_user(&users, "patient-1", "patient@example.com", patient_role).await;

        let state = AuthState {
            jwt_config: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                issuer: "careport-admin".to_string(),
            },
            users: users.clone(),
        };
        (state, users)
    }

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        user.user.email
    }

    fn admin_app(state: AuthState) -> Router {
        Router::new()
            .route("/admin", get(whoami))
            .layer(middleware::from_fn(admin_middleware))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn send(app: Router, token: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().method("GET").uri("/admin");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let req = builder.body(Body::empty()).unwrap();

        let mut svc = app.into_service();
        svc.call(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let (state, _) = setup().await;
        assert_eq!(send(admin_app(state), None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn forged_token_never_reaches_identity_resolution() {
        let (state, _) = setup().await;
        let forged = JwtConfig {
            secret: "other-secret".to_string(),
            expiration_hours: 1,
            issuer: "careport-admin".to_string(),
        };
        let token = create_token("admin-1", "admin@example.com", &forged).unwrap();
        assert_eq!(
            send(admin_app(state), Some(&token)).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn admin_passes_both_gates() {
        let (state, _) = setup().await;
        let token = create_token("admin-1", "admin@example.com", &state.jwt_config).unwrap();
        assert_eq!(send(admin_app(state), Some(&token)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let (state, _) = setup().await;
        let token = create_token("patient-1", "patient@example.com", &state.jwt_config).unwrap();
        assert_eq!(
            send(admin_app(state), Some(&token)).await,
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn store_failure_during_resolution_is_a_server_error() {
        // A valid token over a dead store must read as a retryable 500,
        // never as a rejected token.
        let state = AuthState {
            jwt_config: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                issuer: "careport-admin".to_string(),
            },
            users: Arc::new(FailingUsers),
        };
        let token = create_token("admin-1", "admin@example.com", &state.jwt_config).unwrap();

        assert_eq!(
            send(admin_app(state), Some(&token)).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn valid_token_for_deleted_user_is_rejected() {
        let (state, users) = setup().await;
        let token = create_token("admin-1", "admin@example.com", &state.jwt_config).unwrap();
        users.delete_user("admin-1").await.unwrap();

        assert_eq!(
            send(admin_app(state), Some(&token)).await,
            StatusCode::UNAUTHORIZED
        );
    }
}
