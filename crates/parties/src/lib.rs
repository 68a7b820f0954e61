//! Party schemas: loyalty members (customers) and suppliers.

pub mod member;
pub mod supplier;

pub use member::{CreateMember, Member, MemberFilter, UpdateMember};
pub use supplier::{CreateSupplier, Supplier, SupplierFilter, UpdateSupplier};
