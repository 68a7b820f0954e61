//! Inventory schemas: items, stock movements and the catalog they reference.
//!
//! Stock quantities are computed by the server. This crate only describes
//! what the client reads and sends, plus the field rules checked before a
//! payload is sent.

pub mod catalog;
pub mod item;
pub mod label;
pub mod stock;

pub use catalog::{
    Category, CategoryFilter, CreateCategory, CreateUnit, Unit, UnitFilter, UpdateCategory,
    UpdateUnit,
};
pub use item::{CreateItem, FrontStockFilter, FrontStockItem, Item, ItemFilter, UpdateItem};
pub use label::Label;
pub use stock::{
    CreateStockAdjustment, CreateStockTransfer, StockAdjustment, StockAdjustmentFilter,
    StockTransfer, StockTransferFilter, StockTransferLine, TransferStatus, UpdateStockAdjustment,
    UpdateStockTransfer,
};
