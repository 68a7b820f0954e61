//! Stock movements: inter-branch transfers and manual adjustments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use retailops_core::validate::{Validate, optional_non_empty, require_non_empty, require_positive};
use retailops_core::{
    BranchId, DomainError, DomainResult, ItemId, Page, StockAdjustmentId, StockTransferId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Sent,
    Received,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransferLine {
    pub item_id: ItemId,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransfer {
    pub id: StockTransferId,
    pub from_branch_id: BranchId,
    pub to_branch_id: BranchId,
    pub status: TransferStatus,
    pub lines: Vec<StockTransferLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

retailops_core::impl_entity!(StockTransfer, StockTransferId);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransferFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransferStatus>,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockTransfer {
    pub from_branch_id: BranchId,
    pub to_branch_id: BranchId,
    pub lines: Vec<StockTransferLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn check_lines(lines: &[StockTransferLine]) -> DomainResult<()> {
    if lines.is_empty() {
        return Err(DomainError::validation("transfer needs at least one line"));
    }
    lines
        .iter()
        .try_for_each(|line| require_positive("quantity", line.quantity))
}

impl Validate for CreateStockTransfer {
    fn validate(&self) -> DomainResult<()> {
        if self.from_branch_id == self.to_branch_id {
            return Err(DomainError::validation(
                "source and destination branch must differ",
            ));
        }
        check_lines(&self.lines)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockTransfer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransferStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<StockTransferLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Validate for UpdateStockTransfer {
    fn validate(&self) -> DomainResult<()> {
        match &self.lines {
            Some(lines) => check_lines(lines),
            None => Ok(()),
        }
    }
}

/// A manual correction of on-hand quantity (breakage, stock opname, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub id: StockAdjustmentId,
    pub branch_id: BranchId,
    pub item_id: ItemId,
    pub delta: i64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

retailops_core::impl_entity!(StockAdjustment, StockAdjustmentId);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustmentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockAdjustment {
    pub branch_id: BranchId,
    pub item_id: ItemId,
    pub delta: i64,
    pub reason: String,
}

impl Validate for CreateStockAdjustment {
    fn validate(&self) -> DomainResult<()> {
        if self.delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }
        require_non_empty("reason", &self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockAdjustment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Validate for UpdateStockAdjustment {
    fn validate(&self) -> DomainResult<()> {
        if self.delta == Some(0) {
            return Err(DomainError::validation("delta cannot be zero"));
        }
        optional_non_empty("reason", self.reason.as_deref())
    }
}

retailops_core::impl_page_filter!(StockTransferFilter, StockAdjustmentFilter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_between_same_branch_is_rejected() {
        let branch = BranchId::new();
        let dto = CreateStockTransfer {
            from_branch_id: branch,
            to_branch_id: branch,
            lines: vec![StockTransferLine {
                item_id: ItemId::new(),
                quantity: 1,
            }],
            note: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn transfer_requires_positive_lines() {
        let mut dto = CreateStockTransfer {
            from_branch_id: BranchId::new(),
            to_branch_id: BranchId::new(),
            lines: Vec::new(),
            note: None,
        };
        assert!(dto.validate().is_err());

        dto.lines.push(StockTransferLine {
            item_id: ItemId::new(),
            quantity: 0,
        });
        assert!(dto.validate().is_err());

        dto.lines[0].quantity = 4;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn adjustment_rejects_zero_delta() {
        let dto = CreateStockAdjustment {
            branch_id: BranchId::new(),
            item_id: ItemId::new(),
            delta: 0,
            reason: "stock opname".to_string(),
        };
        assert!(dto.validate().is_err());
        assert!(
            CreateStockAdjustment { delta: -2, ..dto }
                .validate()
                .is_ok()
        );
    }
}
