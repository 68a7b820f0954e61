//! `retailops-auth`: session model and role-based access gate.
//!
//! This crate is intentionally decoupled from HTTP and storage: the session
//! is handed in by whoever resolved it, and navigation is an injected sink.

pub mod gate;
pub mod navigation;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod user;

pub use gate::{Access, AccessError, AccessExplanation, AccessGate, PermissionMatch};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use permissions::{Page, Permission, page_permissions};
pub use roles::{Role, role_permissions};
pub use session::{Session, SessionState};
pub use user::{CreateUser, UpdateUser, User, UserFilter};
