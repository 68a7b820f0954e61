//! Sales-side schemas: sell returns and printable receipts.

pub mod receipt;
pub mod sell_return;

pub use receipt::{Receipt, ReceiptLine};
pub use sell_return::{
    CreateSellReturn, ReturnLine, SellReturn, SellReturnFilter, SellReturnLine, UpdateSellReturn,
};
