use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{DomainError, DomainResult, Role, RoleName, RoleRepositoryInterface};
use crate::infrastructure::database::entities::role;

pub struct RoleRepository {
    db: DatabaseConnection,
}

impl RoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

fn role_model_to_domain(model: role::Model) -> DomainResult<Role> {
    let name = RoleName::parse(&model.name).ok_or_else(|| {
        DomainError::Storage(format!("role '{}' has an unrecognized name", model.id))
    })?;
    Ok(Role { id: model.id, name })
}

#[async_trait]
impl RoleRepositoryInterface for RoleRepository {
    async fn find_by_name(&self, name: RoleName) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(role_model_to_domain).transpose()
    }

    async fn find_by_names(&self, names: &[RoleName]) -> DomainResult<Vec<Role>> {
        let name_strs: Vec<&str> = names.iter().map(|n| n.as_str()).collect();

        let models = role::Entity::find()
            .filter(role::Column::Name.is_in(name_strs))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models.into_iter().map(role_model_to_domain).collect()
    }

    async fn ensure_exists(&self, name: RoleName) -> DomainResult<Role> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }

        let model = role::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.as_str().to_string()),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;

        role_model_to_domain(inserted)
    }
}
