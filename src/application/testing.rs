//! In-memory fakes shared by the application-layer service tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::doctor::DoctorProfile;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Role, RoleName, RoleRepositoryInterface, User,
    UserRepositoryInterface,
};
use crate::infrastructure::documents::{
    DocumentError, DocumentStore, StoredDocument, UploadedFile, PDF_MIME,
};
use crate::infrastructure::mail::{MailError, WelcomeMailer};

// ── Users ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
    profiles: Mutex<Vec<DoctorProfile>>,
}

impl InMemoryUsers {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn profile_for(&self, user_id: &str) -> Option<DoctorProfile> {
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUsers {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();

        // mirror the store's unique constraints
        if users.iter().any(|u| u.email == dto.email) {
            return Err(DomainError::DuplicateEmail(dto.email));
        }
        if users.iter().any(|u| u.phone_number == dto.phone_number) {
            return Err(DomainError::DuplicatePhone(dto.phone_number));
        }

        let now = chrono::Utc::now();
        let user = User {
            id: dto.id.clone(),
            first_name: dto.first_name,
            last_name: dto.last_name,
            full_name: dto.full_name,
            email: dto.email,
            phone_number: dto.phone_number,
            password_hash: dto.password_hash,
            role: dto.role,
            doctor_profile_id: dto.doctor_profile.as_ref().map(|p| p.id.clone()),
            created_at: now,
            updated_at: now,
        };

        if let Some(profile) = dto.doctor_profile {
            self.profiles.lock().unwrap().push(DoctorProfile {
                id: profile.id,
                user_id: dto.id,
                license: profile.license,
            });
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_phone(&self, phone_number: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn list_by_role_ids(&self, role_ids: &[String]) -> DomainResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| role_ids.contains(&u.role.id))
            .cloned()
            .collect())
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}

// ── Roles ──────────────────────────────────────────────────────

pub struct InMemoryRoles {
    roles: Mutex<Vec<Role>>,
}

impl InMemoryRoles {
    pub fn with_all_roles() -> Self {
        let roles = RoleName::ALL
            .iter()
            .map(|name| Role {
                id: format!("role-{}", name.as_str().to_lowercase().replace(' ', "-")),
                name: *name,
            })
            .collect();
        Self {
            roles: Mutex::new(roles),
        }
    }

    pub fn with_roles(names: &[RoleName]) -> Self {
        let roles = names
            .iter()
            .map(|name| Role {
                id: format!("role-{}", name.as_str().to_lowercase().replace(' ', "-")),
                name: *name,
            })
            .collect();
        Self {
            roles: Mutex::new(roles),
        }
    }
}

#[async_trait]
impl RoleRepositoryInterface for InMemoryRoles {
    async fn find_by_name(&self, name: RoleName) -> DomainResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn find_by_names(&self, names: &[RoleName]) -> DomainResult<Vec<Role>> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .filter(|r| names.contains(&r.name))
            .cloned()
            .collect())
    }

    async fn ensure_exists(&self, name: RoleName) -> DomainResult<Role> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }
        let role = Role {
            id: format!("role-{}", name.as_str().to_lowercase().replace(' ', "-")),
            name,
        };
        self.roles.lock().unwrap().push(role.clone());
        Ok(role)
    }
}

// ── Documents ──────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryDocuments {
    stored: Mutex<Vec<(String, StoredDocument)>>,
}

impl InMemoryDocuments {
    pub fn count(&self) -> usize {
        self.stored.lock().unwrap().len()
    }

    pub fn last_owner(&self) -> Option<String> {
        self.stored
            .lock()
            .unwrap()
            .last()
            .map(|(owner, _)| owner.clone())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocuments {
    async fn store_license(
        &self,
        _file: &UploadedFile,
        owner_id: &str,
        owner_name: &str,
    ) -> Result<StoredDocument, DocumentError> {
        let content_id = format!("doc-{}", self.count() + 1);
        let doc = StoredDocument {
            url: format!("mem://licenses/{}-{}", owner_id, owner_name),
            content_id,
        };
        self.stored
            .lock()
            .unwrap()
            .push((owner_id.to_string(), doc.clone()));
        Ok(doc)
    }
}

// ── Mailers ────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WelcomeMailer for RecordingMailer {
    async fn send_welcome(&self, to: &str, temp_password: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), temp_password.to_string()));
        Ok(())
    }
}

pub struct FailingMailer;

#[async_trait]
impl WelcomeMailer for FailingMailer {
    async fn send_welcome(&self, _to: &str, _temp_password: &str) -> Result<(), MailError> {
        Err(MailError::Transport("connection refused".to_string()))
    }
}

// ── File fixtures ──────────────────────────────────────────────

pub fn pdf_file() -> UploadedFile {
    UploadedFile {
        file_name: "license.pdf".to_string(),
        content_type: PDF_MIME.to_string(),
        bytes: b"%PDF-1.7 fixture".to_vec(),
    }
}

pub fn text_file() -> UploadedFile {
    UploadedFile {
        file_name: "license.txt".to_string(),
        content_type: "text/plain".to_string(),
        bytes: b"not a pdf".to_vec(),
    }
}
