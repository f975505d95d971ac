use crate::api_error::ApiError;
use billdesk_core::{
    clock::BillClock, config::AppConfig, error::BillResult, ledger::BillLedger, store::BillStore,
};
use std::sync::{Arc, Mutex};

/// Shared across handlers. The store is the only mutable state; its lock is
/// taken for the synchronous part of a request and never held across `.await`.
pub struct AppState {
    store: Mutex<BillStore>,
    pub clock: BillClock,
    pub config: AppConfig,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: BillStore, clock: BillClock, config: AppConfig) -> Self {
        Self {
            store: Mutex::new(store),
            clock,
            config,
        }
    }

    pub fn shared(store: BillStore, clock: BillClock, config: AppConfig) -> SharedState {
        Arc::new(Self::new(store, clock, config))
    }

    pub fn with_store<T>(&self, f: impl FnOnce(&BillStore) -> BillResult<T>) -> Result<T, ApiError> {
        let store = self
            .store
            .lock()
            .map_err(|_| ApiError::internal("bill store lock poisoned"))?;
        f(&store).map_err(ApiError::from)
    }

    pub fn with_ledger<T>(
        &self,
        f: impl FnOnce(&BillLedger<'_>) -> BillResult<T>,
    ) -> Result<T, ApiError> {
        self.with_store(|store| f(&BillLedger::new(store, &self.clock)))
    }
}
