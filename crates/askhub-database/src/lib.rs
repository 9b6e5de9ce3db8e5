//! # askhub-database
//!
//! PostgreSQL connection management and the concrete [`UserStore`]
//! implementation backing the auth core.
//!
//! [`UserStore`]: askhub_entity::user::UserStore

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::user::PgUserStore;
