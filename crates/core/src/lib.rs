//! `retailops-core`: shared building blocks for the RetailOps client.
//!
//! This crate contains **pure** primitives (no network, no storage): typed
//! identifiers, the domain error, pagination envelopes and DTO validation.

pub mod branch;
pub mod entity;
pub mod error;
pub mod id;
pub mod pagination;
pub mod validate;

pub use branch::{Branch, BranchFilter, CreateBranch, UpdateBranch};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    BranchId, CashFlowId, CategoryId, ItemId, MemberId, SellReturnId, StockAdjustmentId,
    StockTransferId, SupplierId, TransactionId, UnitId, UserId,
};
pub use pagination::{Page, Paginated, Pagination};
pub use validate::Validate;
