use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::warn;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Role, RoleName, User, UserRepositoryInterface,
};
use crate::infrastructure::database::entities::{doctor_profile, role, user};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Map a unique-constraint violation on insert to the duplicate error the
/// caller can act on. The unique index is the authoritative guard; the
/// service-level pre-checks only exist for friendlier fast-path failures.
fn map_insert_err(e: sea_orm::DbErr, email: &str, phone: &str) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        if msg.contains("email") {
            return DomainError::DuplicateEmail(email.to_string());
        }
        if msg.contains("phone_number") {
            return DomainError::DuplicatePhone(phone.to_string());
        }
    }
    db_err(e)
}

/// Combine a user row with its role row. A user whose role cannot be
/// resolved is treated as non-existent rather than faulting; the schema
/// forbids this state, so it is also logged.
fn try_domain_user(model: user::Model, role_model: Option<role::Model>) -> Option<User> {
    let role_model = match role_model {
        Some(r) => r,
        None => {
            warn!(user_id = %model.id, "user has no role row, skipping");
            return None;
        }
    };
    let name = match RoleName::parse(&role_model.name) {
        Some(n) => n,
        None => {
            warn!(user_id = %model.id, role = %role_model.name, "unrecognized role name, skipping");
            return None;
        }
    };

    Some(User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        full_name: model.full_name,
        email: model.email,
        phone_number: model.phone_number,
        password_hash: model.password_hash,
        role: Role {
            id: role_model.id,
            name,
        },
        doctor_profile_id: model.doctor_profile_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let new_user = user::ActiveModel {
            id: Set(dto.id.clone()),
            first_name: Set(dto.first_name.clone()),
            last_name: Set(dto.last_name.clone()),
            full_name: Set(dto.full_name.clone()),
            email: Set(dto.email.clone()),
            phone_number: Set(dto.phone_number.clone()),
            password_hash: Set(dto.password_hash.clone()),
            role_id: Set(dto.role.id.clone()),
            doctor_profile_id: Set(dto.doctor_profile.as_ref().map(|p| p.id.clone())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // User row and doctor profile row commit together or not at all.
        let txn = self.db.begin().await.map_err(db_err)?;

        let inserted = new_user
            .insert(&txn)
            .await
            .map_err(|e| map_insert_err(e, &dto.email, &dto.phone_number))?;

        if let Some(profile) = &dto.doctor_profile {
            let new_profile = doctor_profile::ActiveModel {
                id: Set(profile.id.clone()),
                user_id: Set(dto.id.clone()),
                license_url: Set(profile.license.url.clone()),
                license_content_id: Set(profile.license.content_id.clone()),
                created_at: Set(now),
            };
            new_profile.insert(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(User {
            id: inserted.id,
            first_name: inserted.first_name,
            last_name: inserted.last_name,
            full_name: inserted.full_name,
            email: inserted.email,
            phone_number: inserted.phone_number,
            password_hash: inserted.password_hash,
            role: dto.role,
            doctor_profile_id: inserted.doctor_profile_id,
            created_at: inserted.created_at,
            updated_at: inserted.updated_at,
        })
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let row = user::Entity::find_by_id(id)
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.and_then(|(u, r)| try_domain_user(u, r)))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let row = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.and_then(|(u, r)| try_domain_user(u, r)))
    }

    async fn find_by_phone(&self, phone_number: &str) -> DomainResult<Option<User>> {
        let row = user::Entity::find()
            .filter(user::Column::PhoneNumber.eq(phone_number))
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.and_then(|(u, r)| try_domain_user(u, r)))
    }

    async fn list_by_role_ids(&self, role_ids: &[String]) -> DomainResult<Vec<User>> {
        let rows = user::Entity::find()
            .filter(user::Column::RoleId.is_in(role_ids.iter().cloned()))
            .find_also_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(u, r)| try_domain_user(u, r))
            .collect())
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        }

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::MigratorTrait;

    use crate::domain::doctor::{LicenseProof, NewDoctorProfile};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    async fn setup() -> (DatabaseConnection, Role) {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
        };
        let db = init_database(&config).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let role = role::ActiveModel {
            id: Set("role-doctor".to_string()),
            name: Set(RoleName::Doctor.as_str().to_string()),
        };
        role.insert(&db).await.unwrap();

        (
            db,
            Role {
                id: "role-doctor".to_string(),
                name: RoleName::Doctor,
            },
        )
    }

    fn dto(id: &str, email: &str, phone: &str, role: Role) -> CreateUserDto {
        CreateUserDto {
            id: id.to_string(),
            first_name: "Amira".to_string(),
            last_name: Some("Haddad".to_string()),
            full_name: "Amira Haddad".to_string(),
            email: email.to_string(),
            phone_number: phone.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role,
            doctor_profile: None,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_user_with_role_populated() {
        let (db, role) = setup().await;
        let repo = UserRepository::new(db);

        let created = repo
            .create_user(dto("u1", "amira@example.com", "+100", role))
            .await
            .unwrap();
        assert_eq!(created.role.name, RoleName::Doctor);

        let fetched = repo.find_by_id("u1").await.unwrap().unwrap();
        assert_eq!(fetched.email, "amira@example.com");
        assert_eq!(fetched.role.name, RoleName::Doctor);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_by_unique_index() {
        let (db, role) = setup().await;
        let repo = UserRepository::new(db);

        repo.create_user(dto("u1", "amira@example.com", "+100", role.clone()))
            .await
            .unwrap();

        // Same email, different phone: the index catches it even though
        // no pre-check ran.
        let err = repo
            .create_user(dto("u2", "amira@example.com", "+200", role))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected_by_unique_index() {
        let (db, role) = setup().await;
        let repo = UserRepository::new(db);

        repo.create_user(dto("u1", "amira@example.com", "+100", role.clone()))
            .await
            .unwrap();

        let err = repo
            .create_user(dto("u2", "other@example.com", "+100", role))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicatePhone(_)));
    }

    #[tokio::test]
    async fn doctor_profile_is_written_in_the_same_transaction() {
        let (db, role) = setup().await;
        let repo = UserRepository::new(db.clone());

        let mut create = dto("u1", "amira@example.com", "+100", role);
        create.doctor_profile = Some(NewDoctorProfile {
            id: "dp1".to_string(),
            license: LicenseProof {
                url: "file:///licenses/u1.pdf".to_string(),
                content_id: "doc-1".to_string(),
            },
        });

        let created = repo.create_user(create).await.unwrap();
        assert_eq!(created.doctor_profile_id.as_deref(), Some("dp1"));

        let profile = doctor_profile::Entity::find_by_id("dp1")
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.license_content_id, "doc-1");
    }

    #[tokio::test]
    async fn delete_is_not_repeatable() {
        let (db, role) = setup().await;
        let repo = UserRepository::new(db);

        repo.create_user(dto("u1", "amira@example.com", "+100", role))
            .await
            .unwrap();

        repo.delete_user("u1").await.unwrap();
        let err = repo.delete_user("u1").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
