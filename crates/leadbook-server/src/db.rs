use crate::error::ApiError;
use leadbook_store::error::Result as StoreResult;
use leadbook_store::Store;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, warn};

/// Persistence client shared by every handler. Built once at startup, cloned
/// into router state, and closed after the server stops.
#[derive(Clone)]
pub struct Database {
    store: Arc<Mutex<Store>>,
}

impl Database {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let store = Store::open(path)?;
        store.migrate()?;
        Ok(Self::from_store(store))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let store = Store::open_in_memory()?;
        store.migrate()?;
        Ok(Self::from_store(store))
    }

    pub fn from_store(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `op` against the store on the blocking pool.
    pub async fn call<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Store) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let joined = tokio::task::spawn_blocking(move || {
            // A panicking call rolls back its open transaction on unwind, so
            // the connection stays usable after poisoning.
            let guard = store.lock().unwrap_or_else(|poisoned| {
                warn!("recovering store after a panicked call");
                poisoned.into_inner()
            });
            op(&guard).map_err(ApiError::from)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(err) => {
                error!(error = %err, "store task failed");
                Err(ApiError::Internal)
            }
        }
    }

    /// Closes the connection if this is the last handle; otherwise the store
    /// closes when the remaining handles drop.
    pub fn close(self) -> StoreResult<()> {
        match Arc::try_unwrap(self.store) {
            Ok(mutex) => {
                let store = mutex.into_inner().unwrap_or_else(PoisonError::into_inner);
                store.close()
            }
            Err(_) => {
                warn!("store still referenced at shutdown");
                Ok(())
            }
        }
    }
}
