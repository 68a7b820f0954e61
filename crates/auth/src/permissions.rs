use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque strings of the form `"resource.action"` (e.g.
/// `"item.read"`). The wildcard permission `"*"` grants everything and is
/// what the `admin` role carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const WILDCARD: Permission = Permission::from_static("*");

pub const DASHBOARD_READ: Permission = Permission::from_static("dashboard.read");
pub const ITEM_READ: Permission = Permission::from_static("item.read");
pub const ITEM_WRITE: Permission = Permission::from_static("item.write");
pub const MEMBER_READ: Permission = Permission::from_static("member.read");
pub const MEMBER_WRITE: Permission = Permission::from_static("member.write");
pub const SUPPLIER_READ: Permission = Permission::from_static("supplier.read");
pub const SUPPLIER_WRITE: Permission = Permission::from_static("supplier.write");
pub const UNIT_WRITE: Permission = Permission::from_static("unit.write");
pub const CATEGORY_WRITE: Permission = Permission::from_static("category.write");
pub const BRANCH_WRITE: Permission = Permission::from_static("branch.write");
pub const USER_READ: Permission = Permission::from_static("user.read");
pub const USER_WRITE: Permission = Permission::from_static("user.write");
pub const CASH_FLOW_READ: Permission = Permission::from_static("cash_flow.read");
pub const CASH_FLOW_WRITE: Permission = Permission::from_static("cash_flow.write");
pub const STOCK_TRANSFER_WRITE: Permission = Permission::from_static("stock_transfer.write");
pub const SELL_RETURN_WRITE: Permission = Permission::from_static("sell_return.write");
pub const STOCK_ADJUSTMENT_WRITE: Permission = Permission::from_static("stock_adjustment.write");
pub const REPORT_PRINT: Permission = Permission::from_static("report.print");

/// Dashboard screens guarded by the access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    Items,
    Members,
    Suppliers,
    Units,
    Categories,
    Branches,
    Users,
    CashFlow,
    StockTransfers,
    SellReturns,
    StockAdjustments,
    Reports,
}

impl Page {
    pub const ALL: [Page; 13] = [
        Page::Dashboard,
        Page::Items,
        Page::Members,
        Page::Suppliers,
        Page::Units,
        Page::Categories,
        Page::Branches,
        Page::Users,
        Page::CashFlow,
        Page::StockTransfers,
        Page::SellReturns,
        Page::StockAdjustments,
        Page::Reports,
    ];
}

const DASHBOARD_PAGE: &[Permission] = &[DASHBOARD_READ];
const ITEMS_PAGE: &[Permission] = &[ITEM_READ];
const MEMBERS_PAGE: &[Permission] = &[MEMBER_READ];
const SUPPLIERS_PAGE: &[Permission] = &[SUPPLIER_READ];
const UNITS_PAGE: &[Permission] = &[ITEM_READ, UNIT_WRITE];
const CATEGORIES_PAGE: &[Permission] = &[ITEM_READ, CATEGORY_WRITE];
const BRANCHES_PAGE: &[Permission] = &[BRANCH_WRITE];
const USERS_PAGE: &[Permission] = &[USER_READ, USER_WRITE];
const CASH_FLOW_PAGE: &[Permission] = &[CASH_FLOW_READ];
const STOCK_TRANSFERS_PAGE: &[Permission] = &[ITEM_READ, STOCK_TRANSFER_WRITE];
const SELL_RETURNS_PAGE: &[Permission] = &[SELL_RETURN_WRITE];
const STOCK_ADJUSTMENTS_PAGE: &[Permission] = &[ITEM_READ, STOCK_ADJUSTMENT_WRITE];
const REPORTS_PAGE: &[Permission] = &[REPORT_PRINT];

/// Static page → required permissions table.
pub fn page_permissions(page: Page) -> &'static [Permission] {
    match page {
        Page::Dashboard => DASHBOARD_PAGE,
        Page::Items => ITEMS_PAGE,
        Page::Members => MEMBERS_PAGE,
        Page::Suppliers => SUPPLIERS_PAGE,
        Page::Units => UNITS_PAGE,
        Page::Categories => CATEGORIES_PAGE,
        Page::Branches => BRANCHES_PAGE,
        Page::Users => USERS_PAGE,
        Page::CashFlow => CASH_FLOW_PAGE,
        Page::StockTransfers => STOCK_TRANSFERS_PAGE,
        Page::SellReturns => SELL_RETURNS_PAGE,
        Page::StockAdjustments => STOCK_ADJUSTMENTS_PAGE,
        Page::Reports => REPORTS_PAGE,
    }
}
