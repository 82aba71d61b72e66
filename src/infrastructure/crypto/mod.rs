//! Cryptographic helpers: JWT tokens, password hashing, credential generation

pub mod credentials;
pub mod jwt;
pub mod password;

pub use credentials::generate_password;
pub use jwt::{create_token, verify_token, AuthError, Claims, JwtConfig};
pub use password::hash_password;
