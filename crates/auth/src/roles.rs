use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::permissions::{self as p, Permission};

/// Role identifier used for RBAC.
///
/// Roles are opaque strings; the server decides what a user may do and
/// sends the effective permission list with the profile. The defaults below
/// only apply when a profile arrives without explicit permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

const ADMIN: &[Permission] = &[p::WILDCARD];
const MANAGER: &[Permission] = &[
    p::DASHBOARD_READ,
    p::ITEM_READ,
    p::ITEM_WRITE,
    p::MEMBER_READ,
    p::MEMBER_WRITE,
    p::SUPPLIER_READ,
    p::SUPPLIER_WRITE,
    p::UNIT_WRITE,
    p::CATEGORY_WRITE,
    p::CASH_FLOW_READ,
    p::CASH_FLOW_WRITE,
    p::STOCK_TRANSFER_WRITE,
    p::SELL_RETURN_WRITE,
    p::STOCK_ADJUSTMENT_WRITE,
    p::REPORT_PRINT,
];
const CASHIER: &[Permission] = &[
    p::ITEM_READ,
    p::MEMBER_READ,
    p::MEMBER_WRITE,
    p::SELL_RETURN_WRITE,
    p::REPORT_PRINT,
];
const WAREHOUSE: &[Permission] = &[
    p::ITEM_READ,
    p::ITEM_WRITE,
    p::SUPPLIER_READ,
    p::STOCK_TRANSFER_WRITE,
    p::STOCK_ADJUSTMENT_WRITE,
    p::REPORT_PRINT,
];

/// Default permissions granted by a well-known role.
pub fn role_permissions(role: &Role) -> &'static [Permission] {
    match role.as_str() {
        "admin" => ADMIN,
        "manager" => MANAGER,
        "cashier" => CASHIER,
        "warehouse" => WAREHOUSE,
        _ => &[],
    }
}
