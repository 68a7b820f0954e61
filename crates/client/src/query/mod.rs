//! Query layer: structured cache keys, the static invalidation table and
//! the in-memory cache both are applied to.

pub mod cache;
pub mod invalidation;
pub mod key;

pub use cache::{CacheEntry, CacheEvent, QueryCache, QueryStatus};
pub use invalidation::{INVALIDATION_TABLE, InvalidationRule, MutationKind, affected_keys};
pub use key::{Domain, KeyPrefix, Operation, QueryKey, Resource};
