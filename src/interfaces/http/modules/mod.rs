//! HTTP modules, one per resource

pub mod accounts;
pub mod health;
