//! The composed client handle a UI shell holds.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;

use retailops_auth::{AccessGate, Navigator, SessionState};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::context::{AuthService, BranchContext};
use crate::error::ClientResult;
use crate::notify::{Notification, Notifier};
use crate::query::{MutationKind, QueryCache, QueryKey, Resource, affected_keys};
use crate::resources::specs::{
    Branches, CashFlows, Categories, FrontStock, Items, Members, SellReturns, StockAdjustments,
    StockTransfers, Suppliers, Units, Users,
};
use crate::resources::{OverviewService, ReportService, ResourceService};
use crate::storage::ClientStorage;

pub struct RetailClient {
    config: ClientConfig,
    api: ApiClient,
    cache: QueryCache,
    storage: Arc<dyn ClientStorage>,
    branch: BranchContext,
    session: RwLock<SessionState>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    gate: AccessGate,
}

impl std::fmt::Debug for RetailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetailClient")
            .field("config", &self.config)
            .field("branch", &self.branch)
            .finish_non_exhaustive()
    }
}

impl RetailClient {
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn ClientStorage>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let api = ApiClient::new(&config, storage.clone())?;
        Ok(Self {
            config,
            api,
            cache: QueryCache::new(),
            branch: BranchContext::new(storage.clone()),
            storage,
            session: RwLock::new(SessionState::Pending),
            notifier,
            navigator,
            gate: AccessGate::default(),
        })
    }

    pub fn with_gate(mut self, gate: AccessGate) -> Self {
        self.gate = gate;
        self
    }

    /// Restore the selected branch, then resolve the session.
    pub async fn start(&self) -> SessionState {
        self.branch.load().await;
        self.auth().load_session().await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn storage(&self) -> &Arc<dyn ClientStorage> {
        &self.storage
    }

    pub fn branch(&self) -> &BranchContext {
        &self.branch
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn session(&self) -> SessionState {
        self.session.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn set_session(&self, state: SessionState) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn branches(&self) -> ResourceService<'_, Branches> {
        ResourceService::new(self)
    }

    pub fn users(&self) -> ResourceService<'_, Users> {
        ResourceService::new(self)
    }

    pub fn items(&self) -> ResourceService<'_, Items> {
        ResourceService::new(self)
    }

    pub fn front_stock(&self) -> ResourceService<'_, FrontStock> {
        ResourceService::new(self)
    }

    pub fn members(&self) -> ResourceService<'_, Members> {
        ResourceService::new(self)
    }

    pub fn suppliers(&self) -> ResourceService<'_, Suppliers> {
        ResourceService::new(self)
    }

    pub fn units(&self) -> ResourceService<'_, Units> {
        ResourceService::new(self)
    }

    pub fn categories(&self) -> ResourceService<'_, Categories> {
        ResourceService::new(self)
    }

    pub fn cash_flows(&self) -> ResourceService<'_, CashFlows> {
        ResourceService::new(self)
    }

    pub fn stock_transfers(&self) -> ResourceService<'_, StockTransfers> {
        ResourceService::new(self)
    }

    pub fn sell_returns(&self) -> ResourceService<'_, SellReturns> {
        ResourceService::new(self)
    }

    pub fn stock_adjustments(&self) -> ResourceService<'_, StockAdjustments> {
        ResourceService::new(self)
    }

    pub fn overview(&self) -> OverviewService<'_> {
        OverviewService::new(self)
    }

    pub fn reports(&self) -> ReportService<'_> {
        ReportService::new(self)
    }

    /// Run a query through the cache. Failures other than "not found" are
    /// surfaced as error notifications.
    pub(crate) async fn query<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let result = self.cache.fetch(key, self.config.stale_time, fetcher).await;
        if let Err(err) = &result {
            if !err.is_not_found() {
                tracing::warn!(%key, error = %err, "query failed");
                self.notifier.notify(Notification::error(err.user_message()));
            }
        }
        result
    }

    /// Await a mutation, then invalidate what it affects and notify.
    ///
    /// Nothing is invalidated when the mutation fails.
    pub(crate) async fn mutate<T, Fut>(&self, resource: Resource, kind: MutationKind, request: Fut) -> ClientResult<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        match request.await {
            Ok(value) => {
                let prefixes = affected_keys(resource, kind);
                let invalidated = self.cache.invalidate_all(&prefixes).await;
                tracing::info!(
                    resource = resource.name(),
                    kind = kind.past_tense(),
                    invalidated,
                    "mutation succeeded"
                );
                self.notifier.notify(Notification::success(format!(
                    "{} {}",
                    resource.label(),
                    kind.past_tense()
                )));
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(resource = resource.name(), kind = kind.past_tense(), error = %err, "mutation failed");
                self.notifier.notify(Notification::error(err.user_message()));
                Err(err)
            }
        }
    }
}
