//! Account provisioning service — application-layer orchestration
//!
//! All account-lifecycle business logic lives here. HTTP handlers are
//! thin wrappers that delegate to this service.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::doctor::NewDoctorProfile;
use crate::domain::user::full_name;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, LicenseProof, RoleName, RoleRepositoryInterface,
    User, UserRepositoryInterface,
};
use crate::infrastructure::crypto::{generate_password, hash_password};
use crate::infrastructure::documents::{DocumentStore, UploadedFile, PDF_MIME};
use crate::infrastructure::mail::WelcomeMailer;

/// Input for account creation, assembled by the HTTP layer.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone_number: String,
    pub role_name: String,
    /// License document; required (PDF-only) when the role is Doctor.
    pub file: Option<UploadedFile>,
}

/// Result of a successful account creation.
#[derive(Debug, Clone)]
pub struct ProvisionedAccount {
    pub user: User,
    pub message: String,
}

/// Provisioning service — orchestrates validation, role resolution,
/// conditional doctor-profile creation, persistence and notification.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct ProvisioningService<R: UserRepositoryInterface> {
    users: Arc<R>,
    roles: Arc<dyn RoleRepositoryInterface>,
    documents: Arc<dyn DocumentStore>,
    mailer: Arc<dyn WelcomeMailer>,
    upload_timeout: Duration,
}

impl<R: UserRepositoryInterface + 'static> ProvisioningService<R> {
    pub fn new(
        users: Arc<R>,
        roles: Arc<dyn RoleRepositoryInterface>,
        documents: Arc<dyn DocumentStore>,
        mailer: Arc<dyn WelcomeMailer>,
        upload_timeout: Duration,
    ) -> Self {
        Self {
            users,
            roles,
            documents,
            mailer,
            upload_timeout,
        }
    }

    /// Create a staff account.
    ///
    /// Validation fails fast in a fixed order: duplicate email, duplicate
    /// phone, unknown role, then the Doctor license checks. The duplicate
    /// pre-checks are fast-path only; the store's unique constraints
    /// remain the authoritative guard under concurrency.
    pub async fn create_account(&self, account: NewAccount) -> DomainResult<ProvisionedAccount> {
        if self.users.find_by_email(&account.email).await?.is_some() {
            return Err(DomainError::DuplicateEmail(account.email));
        }
        if self
            .users
            .find_by_phone(&account.phone_number)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicatePhone(account.phone_number));
        }

        let role_name = RoleName::parse(&account.role_name)
            .ok_or_else(|| DomainError::UnknownRole(account.role_name.clone()))?;
        let role = self
            .roles
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| DomainError::UnknownRole(account.role_name.clone()))?;

        let temp_password = generate_password();
        let password_hash = hash_password(&temp_password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        // Id generated up front so the license document can be keyed by it
        let user_id = uuid::Uuid::new_v4().to_string();
        let display_name = full_name(&account.first_name, account.last_name.as_deref());

        let doctor_profile = if role_name == RoleName::Doctor {
            let license = self
                .store_license(&account, &user_id, &display_name)
                .await?;
            Some(NewDoctorProfile {
                id: uuid::Uuid::new_v4().to_string(),
                license,
            })
        } else {
            None
        };

        let user = self
            .users
            .create_user(CreateUserDto {
                id: user_id,
                first_name: account.first_name,
                last_name: account.last_name,
                full_name: display_name,
                email: account.email,
                phone_number: account.phone_number,
                password_hash,
                role,
                doctor_profile,
            })
            .await?;

        info!(user_id = %user.id, role = %role_name, "Account provisioned");

        // Fire and forget: a delivery failure must not fail the request
        let mailer = Arc::clone(&self.mailer);
        let recipient = user.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_welcome(&recipient, &temp_password).await {
                warn!(to = %recipient, error = %e, "Failed to send welcome email");
            }
        });

        let message = format!(
            "Account created successfully! A temporary password has been sent to the {} email.",
            role_name
        );

        Ok(ProvisionedAccount { user, message })
    }

    async fn store_license(
        &self,
        account: &NewAccount,
        user_id: &str,
        display_name: &str,
    ) -> DomainResult<LicenseProof> {
        let file = account.file.as_ref().ok_or_else(|| {
            DomainError::Validation("A license document is required for Doctor accounts".into())
        })?;

        if file.content_type != PDF_MIME {
            return Err(DomainError::UnsupportedFileType(file.content_type.clone()));
        }

        let stored = tokio::time::timeout(
            self.upload_timeout,
            self.documents.store_license(file, user_id, display_name),
        )
        .await
        .map_err(|_| DomainError::Storage("License upload timed out".into()))?
        .map_err(|e| DomainError::Storage(format!("License upload failed: {}", e)))?;

        Ok(LicenseProof {
            url: stored.url,
            content_id: stored.content_id,
        })
    }

    /// Delete an account by id, returning a confirmation naming the
    /// deleted role. Issued tokens stay structurally valid; the
    /// authentication gate re-checks existence on every request.
    pub async fn delete_account(&self, user_id: &str) -> DomainResult<String> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        let role_name = user.role.name;
        self.users.delete_user(user_id).await?;

        info!(user_id = %user_id, role = %role_name, "Account deleted");

        Ok(format!("{} has been deleted successfully!", role_name))
    }
}

// ── Tests ──────────────────────────────────────────────────────
