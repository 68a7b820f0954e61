//! Selected-branch context.
//!
//! The selection is persisted under `selectedBranch` and restored once at
//! startup. Changing it invalidates nothing: branch-scoped keys carry the
//! branch id, so each branch's data lives under its own keys.

use std::sync::{Arc, PoisonError, RwLock};

use retailops_core::{Branch, BranchId};

use crate::error::ClientResult;
use crate::storage::{ClientStorage, keys};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchState {
    Uninitialized,
    Loading,
    Ready(Option<Branch>),
}

pub struct BranchContext {
    storage: Arc<dyn ClientStorage>,
    state: RwLock<BranchState>,
}

impl std::fmt::Debug for BranchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchContext")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl BranchContext {
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            storage,
            state: RwLock::new(BranchState::Uninitialized),
        }
    }

    fn write_state(&self, state: BranchState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    pub fn state(&self) -> BranchState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Restore the persisted selection. A missing, unreadable or corrupt
    /// value leaves no branch selected.
    pub async fn load(&self) -> BranchState {
        self.write_state(BranchState::Loading);

        let branch = match self.storage.get(keys::SELECTED_BRANCH).await {
            Ok(Some(raw)) => match serde_json::from_str::<Branch>(&raw) {
                Ok(branch) => Some(branch),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring corrupt selected branch");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "could not read selected branch");
                None
            }
        };

        let state = BranchState::Ready(branch);
        self.write_state(state.clone());
        state
    }

    pub async fn set_branch(&self, branch: Branch) -> ClientResult<()> {
        let raw = serde_json::to_string(&branch)?;
        self.storage.set(keys::SELECTED_BRANCH, &raw).await?;
        tracing::info!(branch_id = %branch.id, "branch selected");
        self.write_state(BranchState::Ready(Some(branch)));
        Ok(())
    }

    /// Deselect and forget the persisted selection.
    pub async fn clear(&self) -> ClientResult<()> {
        self.reset();
        self.storage.remove(keys::SELECTED_BRANCH).await
    }

    /// Deselect in memory only.
    pub fn reset(&self) {
        self.write_state(BranchState::Ready(None));
    }

    pub fn selected(&self) -> Option<Branch> {
        match self.state() {
            BranchState::Ready(branch) => branch,
            BranchState::Uninitialized | BranchState::Loading => None,
        }
    }

    pub fn selected_id(&self) -> Option<BranchId> {
        self.selected().map(|b| b.id)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state(), BranchState::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn branch(name: &str) -> Branch {
        Branch {
            id: BranchId::new(),
            name: name.to_string(),
            address: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn starts_uninitialized_and_loads_nothing_from_empty_storage() {
        let ctx = BranchContext::new(Arc::new(MemoryStorage::new()));
        assert_eq!(ctx.state(), BranchState::Uninitialized);
        assert_eq!(ctx.load().await, BranchState::Ready(None));
        assert!(ctx.is_ready());
        assert!(ctx.selected_id().is_none());
    }

    #[tokio::test]
    async fn selection_survives_a_reload() {
        let storage: Arc<dyn ClientStorage> = Arc::new(MemoryStorage::new());
        let b = branch("Cabang Utama");
        BranchContext::new(storage.clone()).set_branch(b.clone()).await.unwrap();

        let reloaded = BranchContext::new(storage);
        reloaded.load().await;
        assert_eq!(reloaded.selected(), Some(b));
    }

    #[tokio::test]
    async fn corrupt_value_yields_no_branch() {
        let storage: Arc<dyn ClientStorage> = Arc::new(MemoryStorage::new());
        storage.set(keys::SELECTED_BRANCH, "{not json").await.unwrap();
        let ctx = BranchContext::new(storage);
        assert_eq!(ctx.load().await, BranchState::Ready(None));
    }

    #[tokio::test]
    async fn clear_removes_state_and_storage() {
        let storage: Arc<dyn ClientStorage> = Arc::new(MemoryStorage::new());
        let ctx = BranchContext::new(storage.clone());
        ctx.set_branch(branch("Gudang")).await.unwrap();
        ctx.clear().await.unwrap();
        assert!(ctx.selected().is_none());
        assert!(storage.get(keys::SELECTED_BRANCH).await.unwrap().is_none());
    }
}
