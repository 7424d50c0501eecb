//! Role and permission access rules for protected operations.
//!
//! Permissions and roles are checked with different semantics:
//! every required permission must be held, while holding any one of the
//! required roles is enough.

use std::collections::BTreeSet;

use loadline_core::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role names provisioned for every deployment.
pub mod roles {
    /// Platform-wide administrator.
    pub const SUPER_ADMIN: &str = "Super Admin";
    /// Administrator acting on delegated modules.
    pub const SUB_ADMIN: &str = "Sub Admin";
    /// Operational staff member.
    pub const STAFF: &str = "Staff";
    /// Administrator of a customer organization.
    pub const CUSTOMER_ADMIN: &str = "Customer Admin";
    /// Administrator of a warehouse organization.
    pub const WAREHOUSE_ADMIN: &str = "Warehouse Admin";
    /// Administrator of a logistics organization.
    pub const LOGISTICS_ADMIN: &str = "Logistics Admin";
}

/// Authenticated actor with its resolved role and permissions.
///
/// A principal without a role, or without a permission set, is distinct from
/// one holding an empty set: the former fails requirement checks with the
/// `*DataMissing` denials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: String,
    role: Option<String>,
    permissions: Option<BTreeSet<String>>,
}

impl Principal {
    /// Creates a principal from resolved identity data.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        role: Option<String>,
        permissions: Option<BTreeSet<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            permissions,
        }
    }

    /// Creates a principal holding a role and the given permission names.
    #[must_use]
    pub fn with_role<I, S>(id: impl Into<String>, role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            Some(role.into()),
            Some(permissions.into_iter().map(Into::into).collect()),
        )
    }

    /// Creates a principal with neither role nor permission data.
    #[must_use]
    pub fn anonymous(id: impl Into<String>) -> Self {
        Self::new(id, None, None)
    }

    /// Returns the principal identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the single role name, if any.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Returns the permission set, if the principal carries one.
    #[must_use]
    pub fn permissions(&self) -> Option<&BTreeSet<String>> {
        self.permissions.as_ref()
    }
}

/// Static access policy declared for one protected operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationRequirement {
    permissions: Vec<String>,
    roles: Vec<String>,
}

impl OperationRequirement {
    /// Requirement that admits every authenticated principal.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Requirement holding all of the given permissions.
    #[must_use]
    pub fn permissions<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::unrestricted().with_permissions(names)
    }

    /// Requirement holding any one of the given roles.
    #[must_use]
    pub fn roles<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::unrestricted().with_roles(names)
    }

    /// Adds required permission names.
    #[must_use]
    pub fn with_permissions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds accepted role names.
    #[must_use]
    pub fn with_roles<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns the required permission names.
    #[must_use]
    pub fn required_permissions(&self) -> &[String] {
        self.permissions.as_slice()
    }

    /// Returns the accepted role names.
    #[must_use]
    pub fn required_roles(&self) -> &[String] {
        self.roles.as_slice()
    }

    /// Returns whether neither permissions nor roles are required.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty()
    }

    /// Evaluates the permission check, then the role check.
    pub fn evaluate(&self, principal: &Principal) -> Result<(), AccessDenial> {
        self.check_permissions(principal)?;
        self.check_roles(principal)
    }

    /// Passes when the principal holds every required permission.
    pub fn check_permissions(&self, principal: &Principal) -> Result<(), AccessDenial> {
        if self.permissions.is_empty() {
            return Ok(());
        }

        let Some(granted) = principal.permissions() else {
            return Err(AccessDenial::PermissionDataMissing);
        };

        let missing: Vec<String> = self
            .permissions
            .iter()
            .filter(|permission| !granted.contains(permission.as_str()))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AccessDenial::PermissionDenied { missing })
        }
    }

    /// Passes when the principal's role is one of the accepted roles.
    pub fn check_roles(&self, principal: &Principal) -> Result<(), AccessDenial> {
        if self.roles.is_empty() {
            return Ok(());
        }

        let Some(role) = principal.role() else {
            return Err(AccessDenial::RoleDataMissing);
        };

        if self.roles.iter().any(|accepted| accepted == role) {
            Ok(())
        } else {
            Err(AccessDenial::RoleDenied {
                role: role.to_owned(),
            })
        }
    }
}

/// Reason a principal was refused access to an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenial {
    /// Permissions are required but the principal carries no permission set.
    #[error("user permissions not found")]
    PermissionDataMissing,

    /// At least one required permission is not held.
    #[error("insufficient permissions: missing {}", missing.join(", "))]
    PermissionDenied {
        /// Required permission names the principal lacks.
        missing: Vec<String>,
    },

    /// Roles are required but the principal has no role.
    #[error("user role not found")]
    RoleDataMissing,

    /// The principal's role is not among the accepted roles.
    #[error("insufficient role: '{role}' is not accepted")]
    RoleDenied {
        /// Role held by the principal.
        role: String,
    },
}

impl AccessDenial {
    /// Returns a stable value for structured logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDataMissing => "permission_data_missing",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::RoleDataMissing => "role_data_missing",
            Self::RoleDenied { .. } => "role_denied",
        }
    }
}

impl From<AccessDenial> for AppError {
    fn from(value: AccessDenial) -> Self {
        Self::Forbidden(value.to_string())
    }
}
