//! Account DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::User;

/// Account API representation.
///
/// The password hash deliberately never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub id: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_profile_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for AccountDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            full_name: u.full_name,
            email: u.email,
            phone_number: u.phone_number,
            role: u.role.name.as_str().to_string(),
            doctor_profile_id: u.doctor_profile_id,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Fields of the multipart create-account form (the license document
/// travels as a separate `file` part).
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 5, max = 30, message = "must be 5-30 characters"))]
    pub phone_number: String,
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub role_name: String,
}

/// Response for a created account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountCreatedResponse {
    pub message: String,
    pub user: AccountDto,
}

/// Response for role listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountListResponse {
    pub message: String,
    pub users: Vec<AccountDto>,
}

/// Response for account deletion
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountDeletedResponse {
    pub message: String,
}

/// Query parameters for the generalized multi-role listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListAccountsParams {
    /// Comma-separated role names (e.g. "Coordinator,Audit Manager")
    pub roles: String,
}
