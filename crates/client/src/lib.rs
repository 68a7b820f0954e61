//! `retailops-client`: data-fetching layer for the RetailOps dashboard.
//!
//! This crate composes:
//! - an HTTP API client over the REST backend
//! - structured query keys, a static invalidation table and a query cache
//! - per-resource services with branch scoping
//! - branch and session contexts, passed explicitly
//! - 58mm receipt and label print views
//!
//! UI concerns (navigation, toasts) are injected as [`retailops_auth::Navigator`]
//! and [`notify::Notifier`] sinks.

pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod notify;
pub mod print;
pub mod query;
pub mod resources;
pub mod storage;

pub use client::RetailClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use resources::{MutableResource, QueryOutcome, ResourceService, ResourceSpec};
pub use storage::{ClientStorage, MemoryStorage, SqliteStorage};
