//! Per-resource query and mutation services.
//!
//! Each service composes the API client, the query cache and the
//! invalidation table. Queries that lack a required input (no selected
//! branch for a branch-scoped list, no id for a detail) come back as
//! [`QueryOutcome::Disabled`] without touching the network.

pub mod overview;
pub mod reports;
pub mod specs;

use std::fmt::Display;
use std::marker::PhantomData;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use retailops_core::Entity as _;
use retailops_core::{Paginated, Validate};

use crate::client::RetailClient;
use crate::error::ClientResult;
use crate::query::key::{query_pairs, strip_nulls};
use crate::query::{MutationKind, Operation, QueryKey, Resource};

pub use overview::OverviewService;
pub use reports::ReportService;

/// Result of a query that may be disabled for lack of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome<T> {
    Disabled,
    Ready(T),
}

impl<T> QueryOutcome<T> {
    pub fn is_disabled(&self) -> bool {
        matches!(self, QueryOutcome::Disabled)
    }

    pub fn ready(self) -> Option<T> {
        match self {
            QueryOutcome::Ready(value) => Some(value),
            QueryOutcome::Disabled => None,
        }
    }

    pub fn as_ref(&self) -> QueryOutcome<&T> {
        match self {
            QueryOutcome::Ready(value) => QueryOutcome::Ready(value),
            QueryOutcome::Disabled => QueryOutcome::Disabled,
        }
    }
}

/// Static description of a REST resource.
pub trait ResourceSpec: Send + Sync + 'static {
    const RESOURCE: Resource;
    /// Collection path below the API root, e.g. `/items`.
    const PATH: &'static str;
    /// Whether queries carry the selected branch as `branchId`.
    const BRANCH_SCOPED: bool;

    type Id: Display + Send + Sync;
    type Entity: retailops_core::Entity<Id = Self::Id> + Serialize + DeserializeOwned + Send + Sync;
    type Filter: Serialize + Validate + Send + Sync;
}

/// A resource that also accepts create/update/delete.
pub trait MutableResource: ResourceSpec {
    type Create: Serialize + Validate + Send + Sync;
    type Update: Serialize + Validate + Send + Sync;
}

/// Add `branchId` to an object of params.
pub(crate) fn with_branch(params: Value, branch_id: impl Display) -> Value {
    let mut map = match params {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    map.insert("branchId".to_string(), Value::String(branch_id.to_string()));
    Value::Object(map)
}

pub struct ResourceService<'a, R> {
    client: &'a RetailClient,
    _spec: PhantomData<R>,
}

impl<'a, R: ResourceSpec> ResourceService<'a, R> {
    pub(crate) fn new(client: &'a RetailClient) -> Self {
        Self {
            client,
            _spec: PhantomData,
        }
    }

    /// Params with the selected branch injected; `None` when scoped and no
    /// branch is selected.
    fn scoped(&self, params: Value) -> Option<Value> {
        if !R::BRANCH_SCOPED {
            return Some(params);
        }
        self.client.branch().selected_id().map(|id| with_branch(params, id))
    }

    pub fn key_for_list(&self, filter: &R::Filter) -> ClientResult<Option<QueryKey>> {
        let params = self.scoped(serde_json::to_value(filter)?);
        Ok(params.map(|p| QueryKey::from_value(R::RESOURCE, Operation::List, &p)))
    }

    pub async fn list(&self, filter: &R::Filter) -> ClientResult<QueryOutcome<Paginated<R::Entity>>> {
        filter.validate()?;
        let Some(params) = self.scoped(serde_json::to_value(filter)?) else {
            tracing::debug!(resource = R::RESOURCE.name(), "list disabled: no branch selected");
            return Ok(QueryOutcome::Disabled);
        };

        let key = QueryKey::from_value(R::RESOURCE, Operation::List, &params);
        let pairs = query_pairs(&strip_nulls(&params));
        let api = self.client.api();
        let page = self
            .client
            .query(&key, || api.get_json::<Paginated<R::Entity>>(R::PATH, &pairs))
            .await?;
        Ok(QueryOutcome::Ready(page))
    }
}

// Read-only views such as front stock are list-only.
impl<R: MutableResource> ResourceService<'_, R> {
    /// Fetch one record. Runs without a branch even for scoped resources;
    /// the branch is only added when one is selected.
    pub async fn detail(&self, id: Option<&R::Id>) -> ClientResult<QueryOutcome<R::Entity>> {
        let Some(id) = id else {
            return Ok(QueryOutcome::Disabled);
        };

        let mut params = json!({ "id": id.to_string() });
        let mut pairs = Vec::new();
        if R::BRANCH_SCOPED {
            if let Some(branch_id) = self.client.branch().selected_id() {
                params = with_branch(params, branch_id);
                pairs.push(("branchId".to_string(), branch_id.to_string()));
            }
        }

        let key = QueryKey::from_value(R::RESOURCE, Operation::Detail, &params);
        let path = format!("{}/{}", R::PATH, id);
        let api = self.client.api();
        let entity = self
            .client
            .query(&key, || api.get_data::<R::Entity>(&path, &pairs))
            .await?;
        Ok(QueryOutcome::Ready(entity))
    }

    pub async fn create(&self, dto: &R::Create) -> ClientResult<R::Entity> {
        let request = async {
            dto.validate()?;
            self.client.api().send_json(Method::POST, R::PATH, dto).await
        };
        let created: R::Entity = self.client.mutate(R::RESOURCE, MutationKind::Create, request).await?;
        tracing::debug!(resource = R::RESOURCE.name(), id = %created.id(), "record created");
        Ok(created)
    }

    pub async fn update(&self, id: &R::Id, dto: &R::Update) -> ClientResult<R::Entity> {
        let path = format!("{}/{}", R::PATH, id);
        let request = async {
            dto.validate()?;
            self.client.api().send_json(Method::PUT, &path, dto).await
        };
        self.client.mutate(R::RESOURCE, MutationKind::Update, request).await
    }

    pub async fn delete(&self, id: &R::Id) -> ClientResult<()> {
        let path = format!("{}/{}", R::PATH, id);
        self.client
            .mutate(R::RESOURCE, MutationKind::Delete, self.client.api().delete(&path))
            .await
    }
}
