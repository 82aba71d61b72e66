//! External concerns: database, crypto, mail, document storage

pub mod crypto;
pub mod database;
pub mod documents;
pub mod mail;

pub use database::{init_database, DatabaseConfig};
