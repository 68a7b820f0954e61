use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use retailops_core::TransactionId;

/// Receipt data for a completed sale, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_id: TransactionId,
    pub branch_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_address: Option<String>,
    pub cashier_name: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub total: i64,
    pub paid: i64,
    pub change: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub price: i64,
    pub subtotal: i64,
}

impl Receipt {
    pub fn item_count(&self) -> i64 {
        self.lines.iter().fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }
}
