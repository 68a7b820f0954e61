//! Dashboard user accounts.

use serde::{Deserialize, Serialize};

use retailops_core::validate::{Validate, optional_non_empty, require_non_empty};
use retailops_core::{BranchId, DomainError, DomainResult, Page, UserId};

use crate::permissions::Permission;
use crate::roles::{Role, role_permissions};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<BranchId>,
}

retailops_core::impl_entity!(User, UserId);

impl User {
    /// Permissions the gate checks against.
    ///
    /// The server-sent list wins; the role defaults fill in for profiles that
    /// arrive without one.
    pub fn effective_permissions(&self) -> Vec<Permission> {
        if self.permissions.is_empty() {
            role_permissions(&self.role).to_vec()
        } else {
            self.permissions.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(flatten)]
    pub page: Page,
}

retailops_core::impl_page_filter!(UserFilter);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<BranchId>,
}

fn check_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn check_username(username: &str) -> DomainResult<()> {
    require_non_empty("username", username)?;
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::validation("username must not contain whitespace"));
    }
    Ok(())
}

impl Validate for CreateUser {
    fn validate(&self) -> DomainResult<()> {
        require_non_empty("name", &self.name)?;
        check_username(&self.username)?;
        check_password(&self.password)?;
        require_non_empty("role", self.role.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<BranchId>,
}

impl Validate for UpdateUser {
    fn validate(&self) -> DomainResult<()> {
        optional_non_empty("name", self.name.as_deref())?;
        if let Some(password) = &self.password {
            check_password(password)?;
        }
        Ok(())
    }
}
