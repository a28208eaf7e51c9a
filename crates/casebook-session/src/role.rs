//! Roles and what they may do.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Role of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Investigator,
    /// Read-only access. Older tokens call this role `public`.
    #[serde(alias = "public")]
    #[strum(to_string = "viewer", serialize = "public")]
    Viewer,
}

/// An action gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Permission {
    ChangeStatus,
    EditCase,
    ViewHistory,
    ManageUsers,
}

impl Role {
    /// Whether this role grants a permission.
    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::ChangeStatus | Permission::EditCase => {
                matches!(self, Self::Admin | Self::Investigator)
            }
            Permission::ViewHistory => true,
            Permission::ManageUsers => matches!(self, Self::Admin),
        }
    }

    /// Every permission this role grants.
    pub fn permissions(&self) -> Vec<Permission> {
        Permission::iter().filter(|p| self.allows(*p)).collect()
    }
}
