//! User identity entity.

pub mod model;
pub mod role;
pub mod store;

pub use model::{NewUser, User};
pub use role::UserRole;
pub use store::UserStore;
