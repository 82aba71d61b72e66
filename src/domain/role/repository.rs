use async_trait::async_trait;

use super::{Role, RoleName};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoleRepositoryInterface: Send + Sync {
    async fn find_by_name(&self, name: RoleName) -> DomainResult<Option<Role>>;

    /// Resolve a set of names to roles. Names without a persisted role
    /// are simply absent from the result.
    async fn find_by_names(&self, names: &[RoleName]) -> DomainResult<Vec<Role>>;

    /// Seed helper: insert the role if it does not exist yet and return it.
    async fn ensure_exists(&self, name: RoleName) -> DomainResult<Role>;
}
