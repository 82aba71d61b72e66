use crate::domain::doctor::NewDoctorProfile;
use crate::domain::role::Role;

/// Everything the identity store needs to persist a new user.
///
/// The id is generated by the caller before persistence so that the
/// license document can be keyed by it ahead of the insert. The
/// password arrives already hashed; plaintext never reaches storage.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role: Role,
    /// Present iff the new account's role is Doctor. Persisted in the
    /// same transaction as the user row.
    pub doctor_profile: Option<NewDoctorProfile>,
}
