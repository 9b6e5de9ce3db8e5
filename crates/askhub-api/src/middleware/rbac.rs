//! Role-based route guarding.
//!
//! A [`RoleSet`] is fixed at route-registration time; the check itself
//! is a pure predicate over the already-authenticated identity and must
//! run after the `AuthUser` extractor.

use askhub_core::error::AppError;
use askhub_entity::user::{User, UserRole};

/// A fixed set of roles permitted on a route.
#[derive(Debug, Clone, Copy)]
pub struct RoleSet {
    allowed: &'static [UserRole],
}

impl RoleSet {
    /// Creates a role set from a static slice.
    pub const fn new(allowed: &'static [UserRole]) -> Self {
        Self { allowed }
    }

    /// Returns `true` if `role` is in the set.
    pub fn permits(&self, role: UserRole) -> bool {
        self.allowed.contains(&role)
    }
}

/// Admin-only routes.
pub const ADMIN_ONLY: RoleSet = RoleSet::new(&[UserRole::Admin]);

/// Checks that the authenticated user's role is in the permitted set.
pub fn restrict_to(user: &User, set: RoleSet) -> Result<(), AppError> {
    if set.permits(user.role) {
        return Ok(());
    }
    Err(AppError::authorization(
        "You do not have permission to perform this action.",
    ))
}
