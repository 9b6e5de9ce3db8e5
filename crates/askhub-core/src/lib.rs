//! # askhub-core
//!
//! Core building blocks shared by every Askhub crate.
//!
//! ## Modules
//!
//! - `config` — TOML + environment configuration schemas
//! - `error` — unified `AppError` / `ErrorKind`
//! - `result` — the `AppResult<T>` alias
//! - `traits` — collaborator contracts (mail delivery)

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
