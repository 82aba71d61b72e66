//! Doctor profile sub-entity

pub mod model;

pub use model::{DoctorProfile, LicenseProof, NewDoctorProfile};
