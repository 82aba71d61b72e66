//! Account HTTP handlers
//!
//! Thin adapters: parse the request, delegate to the application
//! services, wrap the result in the standard envelope.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::application::{DirectoryService, NewAccount, ProvisioningService, RoleListing};
use crate::domain::RoleName;
use crate::infrastructure::database::repositories::UserRepository;
use crate::infrastructure::documents::UploadedFile;
use crate::interfaces::http::common::{error_response, ApiResponse};
use crate::shared::DomainError;

use super::dto::{
    AccountCreatedResponse, AccountDeletedResponse, AccountDto, AccountListResponse,
    CreateAccountRequest, ListAccountsParams,
};

/// Shared handler state
#[derive(Clone)]
pub struct AccountsState {
    pub provisioning: Arc<ProvisioningService<UserRepository>>,
    pub directory: Arc<DirectoryService<UserRepository>>,
}

impl AccountsState {
    pub fn new(
        provisioning: Arc<ProvisioningService<UserRepository>>,
        directory: Arc<DirectoryService<UserRepository>>,
    ) -> Self {
        Self {
            provisioning,
            directory,
        }
    }
}

/// Pull the account fields and the optional license file out of the
/// multipart form. Unknown parts are ignored.
async fn parse_multipart(
    mut multipart: Multipart,
) -> Result<(CreateAccountRequest, Option<UploadedFile>), DomainError> {
    let mut form = CreateAccountRequest::default();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("license").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    DomainError::Validation(format!("Failed to read uploaded file: {}", e))
                })?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {
                let value = field.text().await.map_err(|e| {
                    DomainError::Validation(format!("Malformed multipart field '{}': {}", name, e))
                })?;
                match name.as_str() {
                    "first_name" => form.first_name = value,
                    "last_name" => form.last_name = Some(value),
                    "email" => form.email = value,
                    "phone_number" => form.phone_number = value,
                    "role_name" => form.role_name = value,
                    _ => {}
                }
            }
        }
    }

    Ok((form, file))
}

fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let detail = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{} {}", field, detail)
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Create a staff account
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    tag = "accounts",
    request_body(content = CreateAccountRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AccountCreatedResponse>),
        (status = 400, description = "Invalid input or unknown role"),
        (status = 409, description = "Duplicate email or phone number"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_account(
    State(state): State<AccountsState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AccountCreatedResponse>>), (StatusCode, Json<ApiResponse<AccountCreatedResponse>>)>
{
    let (form, file) = parse_multipart(multipart).await.map_err(error_response)?;

    if let Err(errors) = form.validate() {
        return Err(error_response(DomainError::Validation(validation_message(
            &errors,
        ))));
    }

    let provisioned = state
        .provisioning
        .create_account(NewAccount {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone_number: form.phone_number,
            role_name: form.role_name,
            file,
        })
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AccountCreatedResponse {
            message: provisioned.message,
            user: provisioned.user.into(),
        })),
    ))
}

type ListResult =
    Result<Json<ApiResponse<AccountListResponse>>, (StatusCode, Json<ApiResponse<AccountListResponse>>)>;

fn list_response(listing: RoleListing) -> Json<ApiResponse<AccountListResponse>> {
    Json(ApiResponse::success(AccountListResponse {
        message: listing.message,
        users: listing.users.into_iter().map(AccountDto::from).collect(),
    }))
}

/// List accounts for an arbitrary comma-separated role filter
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "accounts",
    params(ListAccountsParams),
    responses(
        (status = 200, description = "Users fetched", body = ApiResponse<AccountListResponse>),
        (status = 400, description = "Empty role filter"),
        (status = 404, description = "None of the requested roles exist"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_accounts_by_roles(
    State(state): State<AccountsState>,
    Query(params): Query<ListAccountsParams>,
) -> ListResult {
    let listing = state
        .directory
        .list_by_role_filter(&params.roles)
        .await
        .map_err(error_response)?;
    Ok(list_response(listing))
}

async fn list_single(state: &AccountsState, role: RoleName) -> ListResult {
    let listing = state
        .directory
        .list_by_role(role)
        .await
        .map_err(error_response)?;
    Ok(list_response(listing))
}

/// List sub-admin accounts (Coordinators and Audit Managers)
#[utoipa::path(
    get,
    path = "/api/v1/accounts/sub-admins",
    tag = "accounts",
    responses((status = 200, description = "Users fetched", body = ApiResponse<AccountListResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_sub_admins(State(state): State<AccountsState>) -> ListResult {
    let listing = state
        .directory
        .list_by_roles(&[
            RoleName::Coordinator.as_str().to_string(),
            RoleName::AuditManager.as_str().to_string(),
        ])
        .await
        .map_err(error_response)?;
    Ok(list_response(listing))
}

/// List audit manager accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts/audit-managers",
    tag = "accounts",
    responses((status = 200, description = "Users fetched", body = ApiResponse<AccountListResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_audit_managers(State(state): State<AccountsState>) -> ListResult {
    list_single(&state, RoleName::AuditManager).await
}

/// List port agent accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts/port-agents",
    tag = "accounts",
    responses((status = 200, description = "Users fetched", body = ApiResponse<AccountListResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_port_agents(State(state): State<AccountsState>) -> ListResult {
    list_single(&state, RoleName::PortAgent).await
}

/// List patient accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts/patients",
    tag = "accounts",
    responses((status = 200, description = "Users fetched", body = ApiResponse<AccountListResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_patients(State(state): State<AccountsState>) -> ListResult {
    list_single(&state, RoleName::Patient).await
}

/// List doctor accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts/doctors",
    tag = "accounts",
    responses((status = 200, description = "Users fetched", body = ApiResponse<AccountListResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_doctors(State(state): State<AccountsState>) -> ListResult {
    list_single(&state, RoleName::Doctor).await
}

/// List general physician accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts/general-physicians",
    tag = "accounts",
    responses((status = 200, description = "Users fetched", body = ApiResponse<AccountListResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_general_physicians(State(state): State<AccountsState>) -> ListResult {
    list_single(&state, RoleName::GeneralPhysician).await
}

/// Delete an account by id
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{user_id}",
    tag = "accounts",
    params(("user_id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account deleted", body = ApiResponse<AccountDeletedResponse>),
        (status = 404, description = "No account with that id"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_account(
    State(state): State<AccountsState>,
    Path(user_id): Path<String>,
) -> Result<
    Json<ApiResponse<AccountDeletedResponse>>,
    (StatusCode, Json<ApiResponse<AccountDeletedResponse>>),
> {
    let message = state
        .provisioning
        .delete_account(&user_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(AccountDeletedResponse {
        message,
    })))
}
