//! Money-side schemas: cash flow entries and the overview dashboard metrics.

pub mod cash_flow;
pub mod overview;

pub use cash_flow::{CashFlow, CashFlowFilter, CashFlowKind, CreateCashFlow, UpdateCashFlow};
pub use overview::{LowStockItem, Overview, OverviewFilter};
