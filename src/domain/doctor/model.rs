use serde::{Deserialize, Serialize};

/// Document reference pair establishing a Doctor's credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseProof {
    /// Durable URL of the stored document.
    pub url: String,
    /// Content identifier assigned by the document store.
    pub content_id: String,
}

/// Doctor profile owned by exactly one user.
#[derive(Debug, Clone)]
pub struct DoctorProfile {
    pub id: String,
    pub user_id: String,
    pub license: LicenseProof,
}

/// Profile data for a user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewDoctorProfile {
    pub id: String,
    pub license: LicenseProof,
}
