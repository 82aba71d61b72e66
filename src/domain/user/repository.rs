use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Persist a new user, together with its doctor profile when one is
    /// attached, atomically: either both rows exist afterwards or neither.
    ///
    /// The store's unique constraints on email and phone number are the
    /// authoritative duplicate guard; violations surface as
    /// `DuplicateEmail` / `DuplicatePhone` even when the service-level
    /// pre-checks raced.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_by_phone(&self, phone_number: &str) -> DomainResult<Option<User>>;

    /// All users whose role is in the given id set, role populated.
    /// Order follows storage iteration order.
    async fn list_by_role_ids(&self, role_ids: &[String]) -> DomainResult<Vec<User>>;

    async fn delete_user(&self, id: &str) -> DomainResult<()>;
}
