//! Single-use password reset credentials.

pub mod token;

pub use token::{ResetCredential, hash_token};
