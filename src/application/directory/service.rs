//! Role query service
//!
//! One parameterized listing operation replaces the original per-role
//! handlers; the fixed single-role endpoints are thin callers.

use std::sync::Arc;

use crate::domain::{
    DomainError, DomainResult, RoleName, RoleRepositoryInterface, User, UserRepositoryInterface,
};

/// Listing result. An empty `users` is not an error; `message` names the
/// role filter that produced it.
#[derive(Debug, Clone)]
pub struct RoleListing {
    pub users: Vec<User>,
    pub message: String,
}

pub struct DirectoryService<R: UserRepositoryInterface> {
    users: Arc<R>,
    roles: Arc<dyn RoleRepositoryInterface>,
}

impl<R: UserRepositoryInterface> DirectoryService<R> {
    pub fn new(users: Arc<R>, roles: Arc<dyn RoleRepositoryInterface>) -> Self {
        Self { users, roles }
    }

    /// List all users holding a single role. Fails when the role itself
    /// does not resolve; an empty result is reported in the message.
    pub async fn list_by_role(&self, name: RoleName) -> DomainResult<RoleListing> {
        let role = self
            .roles
            .find_by_name(name)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Role",
                field: "name",
                value: name.as_str().to_string(),
            })?;

        let users = self.users.list_by_role_ids(&[role.id]).await?;
        Ok(listing(users, &[name.as_str().to_string()]))
    }

    /// List the union of users across a set of role names (raw caller
    /// strings, e.g. from a comma-separated query parameter).
    ///
    /// Proceeds as long as at least one name resolves; fails with
    /// `NoMatchingRoles` only when none do.
    pub async fn list_by_roles(&self, names: &[String]) -> DomainResult<RoleListing> {
        let requested: Vec<String> = names
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if requested.is_empty() {
            return Err(DomainError::Validation(
                "Roles are required as query parameters!".into(),
            ));
        }

        let known: Vec<RoleName> = requested
            .iter()
            .filter_map(|n| RoleName::parse(n))
            .collect();

        let resolved = self.roles.find_by_names(&known).await?;
        if resolved.is_empty() {
            return Err(DomainError::NoMatchingRoles(requested.join(", ")));
        }

        let role_ids: Vec<String> = resolved.iter().map(|r| r.id.clone()).collect();
        let users = self.users.list_by_role_ids(&role_ids).await?;
        Ok(listing(users, &requested))
    }

    /// Parse a comma-separated role filter and list the union.
    pub async fn list_by_role_filter(&self, raw: &str) -> DomainResult<RoleListing> {
        let names: Vec<String> = raw.split(',').map(|s| s.to_string()).collect();
        self.list_by_roles(&names).await
    }
}

fn listing(users: Vec<User>, requested: &[String]) -> RoleListing {
    let message = if users.is_empty() {
        format!(
            "No users found for the specified roles: {}.",
            requested.join(", ")
        )
    } else {
        "Users fetched successfully!".to_string()
    };
    RoleListing { users, message }
}

// ── Tests ──────────────────────────────────────────────────────
