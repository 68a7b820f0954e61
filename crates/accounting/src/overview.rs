//! Dashboard overview metrics for one branch and period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use retailops_core::validate::Validate;
use retailops_core::{DomainResult, ItemId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_sales: i64,
    pub total_transactions: u64,
    pub total_items_sold: i64,
    pub cash_in: i64,
    pub cash_out: i64,
    #[serde(default)]
    pub low_stock_items: Vec<LowStockItem>,
}

impl Overview {
    pub fn net_cash(&self) -> i64 {
        self.cash_in - self.cash_out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub item_id: ItemId,
    pub name: String,
    pub stock: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Validate for OverviewFilter {
    fn validate(&self) -> DomainResult<()> {
        crate::cash_flow::check_range(self.start_date, self.end_date)
    }
}
