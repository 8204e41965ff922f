//! Acting principal

use shared::Role;

/// Authenticated principal for the current operation
///
/// The id is an opaque string minted by the identity gateway (for example
/// `user:wanjiku`); product and order ownership fields store the same
/// strings, so ownership checks are plain equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub role: Role,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn customer(id: impl Into<String>) -> Self {
        Self::new(id, Role::Customer)
    }

    pub fn farmer(id: impl Into<String>) -> Self {
        Self::new(id, Role::Farmer)
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
