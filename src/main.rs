//!
//! CarePort administrative backend.
//! Reads configuration from TOML file (~/.config/careport-admin/config.toml).

use std::sync::Arc;
use std::time::Duration;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use careport_admin::application::{DirectoryService, ProvisioningService};
use careport_admin::config::AppConfig;
use careport_admin::domain::{
    CreateUserDto, RoleName, RoleRepositoryInterface, UserRepositoryInterface,
};
use careport_admin::infrastructure::crypto::jwt::JwtConfig;
use careport_admin::infrastructure::crypto::{generate_password, hash_password};
use careport_admin::infrastructure::database::migrator::Migrator;
use careport_admin::infrastructure::database::repositories::{RoleRepository, UserRepository};
use careport_admin::infrastructure::documents::FsDocumentStore;
use careport_admin::infrastructure::mail::SmtpMailer;
use careport_admin::interfaces::http::middleware::AuthState;
use careport_admin::interfaces::http::modules::accounts::AccountsState;
use careport_admin::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CAREPORT_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting CarePort Admin...");

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "careport-admin".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories ───────────────────────────────────────────
    let roles = Arc::new(RoleRepository::new(db.clone()));
    let users = Arc::new(UserRepository::new(db.clone()));

    // Seed the fixed role catalogue
    for name in RoleName::ALL {
        roles.ensure_exists(name).await?;
    }
    info!("Role catalogue seeded");

    create_default_admin(&users, &roles, &app_cfg).await;

    // ── Services ───────────────────────────────────────────────
    let documents = Arc::new(FsDocumentStore::new(&app_cfg.documents.dir));
    let mailer = Arc::new(SmtpMailer::new(app_cfg.mail.clone()));

    let provisioning = Arc::new(ProvisioningService::new(
        users.clone(),
        roles.clone(),
        documents,
        mailer,
        Duration::from_secs(app_cfg.documents.upload_timeout_secs),
    ));
    let directory = Arc::new(DirectoryService::new(users.clone(), roles));

    // ── HTTP server ────────────────────────────────────────────
    let auth_state = AuthState {
        jwt_config,
        users: users.clone(),
    };
    let app = create_api_router(auth_state, AccountsState::new(provisioning, directory));

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Performing final cleanup...");
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("CarePort Admin shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Create a default admin account when none exists.
///
/// The generated password is logged exactly once; it must be changed
/// after first login.
async fn create_default_admin(users: &UserRepository, roles: &RoleRepository, cfg: &AppConfig) {
    let admin_role = match roles.find_by_name(RoleName::Admin).await {
        Ok(Some(role)) => role,
        Ok(None) => {
            error!("Admin role missing after seeding; skipping default admin");
            return;
        }
        Err(e) => {
            error!("Failed to resolve admin role: {}", e);
            return;
        }
    };

    match users.list_by_role_ids(&[admin_role.id.clone()]).await {
        Ok(admins) if !admins.is_empty() => return,
        Ok(_) => {}
        Err(e) => {
            error!("Failed to check for existing admins: {}", e);
            return;
        }
    }

    info!("Creating default admin account...");

    let password = generate_password();
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let dto = CreateUserDto {
        id: uuid::Uuid::new_v4().to_string(),
        first_name: cfg.admin.first_name.clone(),
        last_name: None,
        full_name: cfg.admin.first_name.clone(),
        email: cfg.admin.email.clone(),
        phone_number: cfg.admin.phone_number.clone(),
        password_hash,
        role: admin_role,
        doctor_profile: None,
    };

    match users.create_user(dto).await {
        Ok(user) => {
            info!(
                "Default admin created: {} (temporary password: {})",
                user.email, password
            );
            warn!("Change the default admin password immediately!");
        }
        Err(e) => error!("Failed to create default admin: {}", e),
    }
}
