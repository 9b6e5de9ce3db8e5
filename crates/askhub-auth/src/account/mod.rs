//! Account flows: signup, login, authentication, password lifecycle.

pub mod manager;

pub use manager::{AccountManager, AuthState, IssuedSession};
