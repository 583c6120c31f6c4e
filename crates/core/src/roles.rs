//! Directory role vocabulary.
//!
//! Roles come from the external user directory and gate page access:
//! `admin` and `developer` see every page, `user` sees only explicitly
//! assigned pages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Role of a directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    Developer,
}

impl Role {
    /// All recognised roles.
    pub const ALL: &'static [Role] = &[Role::User, Role::Admin, Role::Developer];

    /// The wire/storage form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Developer => "developer",
        }
    }

    /// Privileged roles see every page regardless of explicit assignments.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin | Role::Developer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "developer" => Ok(Role::Developer),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: user, admin, developer"
            ))),
        }
    }
}

/// Role criterion for user listings. `All` matches every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn matches(&self, role: Role) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(wanted) => *wanted == role,
        }
    }
}

impl Default for RoleFilter {
    fn default() -> Self {
        RoleFilter::All
    }
}

impl FromStr for RoleFilter {
    type Err = CoreError;

    /// Parse the filter form used by listing requests: `"all"` or a role name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(RoleFilter::All)
        } else {
            Ok(RoleFilter::Only(s.parse()?))
        }
    }
}
