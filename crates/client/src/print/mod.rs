//! Fixed-width print views for 58mm thermal paper.

pub mod format;
pub mod label;
pub mod receipt;

pub use format::{PAPER_WIDTH, money};
pub use label::LabelView;
pub use receipt::ReceiptView;
