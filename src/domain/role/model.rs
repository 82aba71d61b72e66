use serde::{Deserialize, Serialize};

/// Closed set of role names. Account roles are assigned from this set
/// only; there is no user-defined role creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    Admin,
    Coordinator,
    AuditManager,
    PortAgent,
    Doctor,
    GeneralPhysician,
    Patient,
}

impl RoleName {
    pub const ALL: [RoleName; 7] = [
        RoleName::Admin,
        RoleName::Coordinator,
        RoleName::AuditManager,
        RoleName::PortAgent,
        RoleName::Doctor,
        RoleName::GeneralPhysician,
        RoleName::Patient,
    ];

    /// Canonical display name, as stored and as accepted on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "Admin",
            RoleName::Coordinator => "Coordinator",
            RoleName::AuditManager => "Audit Manager",
            RoleName::PortAgent => "Port Agent",
            RoleName::Doctor => "Doctor",
            RoleName::GeneralPhysician => "General Physician",
            RoleName::Patient => "Patient",
        }
    }

    /// Parse a role name. Matching is exact (case-sensitive).
    pub fn parse(s: &str) -> Option<Self> {
        RoleName::ALL.iter().copied().find(|r| r.as_str() == s)
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted role record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: RoleName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip_for_all_roles() {
        for role in RoleName::ALL {
            assert_eq!(RoleName::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn parse_is_case_sensitive_and_rejects_unknown() {
        assert_eq!(RoleName::parse("doctor"), None);
        assert_eq!(RoleName::parse("Ship Captain"), None);
        assert_eq!(RoleName::parse(""), None);
    }
}
