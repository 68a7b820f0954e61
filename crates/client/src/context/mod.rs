//! Explicitly passed application contexts (selected branch, session).

pub mod auth;
pub mod branch;

pub use auth::{AuthService, Credentials, LoginResponse};
pub use branch::{BranchContext, BranchState};
