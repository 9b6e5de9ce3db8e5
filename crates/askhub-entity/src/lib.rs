//! # askhub-entity
//!
//! Domain entity models for Askhub: the user identity record, its role
//! enum, and the `UserStore` port the persistence layer implements.

pub mod user;

pub use user::{NewUser, User, UserRole, UserStore};
