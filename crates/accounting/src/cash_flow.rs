use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use retailops_core::validate::{Validate, optional_non_empty, require_non_empty, require_positive};
use retailops_core::{BranchId, CashFlowId, DomainError, DomainResult, Page};

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowKind {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub id: CashFlowId,
    pub branch_id: BranchId,
    pub kind: CashFlowKind,
    pub amount: i64,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

retailops_core::impl_entity!(CashFlow, CashFlowId);

impl CashFlow {
    /// Amount with sign applied (`out` is negative).
    pub fn signed_amount(&self) -> i64 {
        match self.kind {
            CashFlowKind::In => self.amount,
            CashFlowKind::Out => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CashFlowKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub page: Page,
}

pub(crate) fn check_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DomainResult<()> {
    match (start, end) {
        (Some(s), Some(e)) if s > e => Err(DomainError::validation(
            "startDate must not be after endDate",
        )),
        _ => Ok(()),
    }
}

impl Validate for CashFlowFilter {
    fn validate(&self) -> DomainResult<()> {
        self.page.check()?;
        check_range(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCashFlow {
    pub branch_id: BranchId,
    pub kind: CashFlowKind,
    pub amount: i64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl Validate for CreateCashFlow {
    fn validate(&self) -> DomainResult<()> {
        require_positive("amount", self.amount)?;
        require_non_empty("description", &self.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCashFlow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CashFlowKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for UpdateCashFlow {
    fn validate(&self) -> DomainResult<()> {
        if let Some(amount) = self.amount {
            require_positive("amount", amount)?;
        }
        optional_non_empty("description", self.description.as_deref())
    }
}
