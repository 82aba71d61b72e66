use chrono::{DateTime, Utc};

use crate::domain::role::Role;

/// User model, role always populated.
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role: Role,
    /// Set only for Doctor accounts.
    pub doctor_profile_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compose the display name from first + optional last name.
pub fn full_name(first_name: &str, last_name: Option<&str>) -> String {
    match last_name {
        Some(last) if !last.is_empty() => format!("{} {}", first_name, last),
        _ => first_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(full_name("Amira", Some("Haddad")), "Amira Haddad");
    }

    #[test]
    fn full_name_is_first_alone_without_last() {
        assert_eq!(full_name("Amira", None), "Amira");
        assert_eq!(full_name("Amira", Some("")), "Amira");
    }
}
