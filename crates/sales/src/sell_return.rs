use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use retailops_core::validate::{Validate, require_positive};
use retailops_core::{BranchId, DomainError, DomainResult, ItemId, Page, SellReturnId, TransactionId};

/// Goods returned by a customer against an earlier transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellReturn {
    pub id: SellReturnId,
    pub branch_id: BranchId,
    pub transaction_id: TransactionId,
    pub lines: Vec<SellReturnLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

retailops_core::impl_entity!(SellReturn, SellReturnId);

impl SellReturn {
    /// Refund owed to the customer, as priced by the server.
    pub fn total_amount(&self) -> i64 {
        self.lines.iter().map(|l| l.amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellReturnLine {
    pub item_id: ItemId,
    pub quantity: i64,
    pub amount: i64,
}

/// Requested line; the server prices it from the original transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnLine {
    pub item_id: ItemId,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellReturnFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSellReturn {
    pub branch_id: BranchId,
    pub transaction_id: TransactionId,
    pub lines: Vec<ReturnLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn check_lines(lines: &[ReturnLine]) -> DomainResult<()> {
    if lines.is_empty() {
        return Err(DomainError::validation("return needs at least one line"));
    }
    lines
        .iter()
        .try_for_each(|line| require_positive("quantity", line.quantity))
}

impl Validate for CreateSellReturn {
    fn validate(&self) -> DomainResult<()> {
        check_lines(&self.lines)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSellReturn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<ReturnLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Validate for UpdateSellReturn {
    fn validate(&self) -> DomainResult<()> {
        match &self.lines {
            Some(lines) => check_lines(lines),
            None => Ok(()),
        }
    }
}

retailops_core::impl_page_filter!(SellReturnFilter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_return_requires_lines() {
        let dto = CreateSellReturn {
            branch_id: BranchId::new(),
            transaction_id: TransactionId::new(),
            lines: vec![],
            reason: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn total_amount_sums_lines() {
        let ret = SellReturn {
            id: SellReturnId::new(),
            branch_id: BranchId::new(),
            transaction_id: TransactionId::new(),
            lines: vec![
                SellReturnLine { item_id: ItemId::new(), quantity: 1, amount: 4_000 },
                SellReturnLine { item_id: ItemId::new(), quantity: 2, amount: 9_000 },
            ],
            reason: Some("rusak".to_string()),
            created_at: Utc::now(),
        };
        assert_eq!(ret.total_amount(), 13_000);
    }
}
