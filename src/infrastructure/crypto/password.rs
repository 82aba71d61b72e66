//! Temporary-password hashing
//!
//! Provisioned accounts never choose their own password: a generated
//! one is emailed out and only its bcrypt hash is persisted. This
//! service only writes credentials; verification belongs to the login
//! service that consumes the accounts.

use bcrypt::{hash, DEFAULT_COST};

/// Hash a temporary password for storage.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}
