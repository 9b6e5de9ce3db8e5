//! # askhub-auth
//!
//! The authentication core for Askhub.
//!
//! ## Modules
//!
//! - `jwt` — stateless session token signing and verification
//! - `password` — Argon2id password hashing and verification
//! - `reset` — single-use, time-boxed password reset credentials
//! - `account` — the account manager orchestrating login, signup,
//!   token-gated authentication, and the password reset lifecycle

pub mod account;
pub mod jwt;
pub mod password;
pub mod reset;

pub use account::{AccountManager, AuthState, IssuedSession};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, SignedToken};
pub use password::PasswordHasher;
pub use reset::ResetCredential;
