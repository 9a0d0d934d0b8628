// ============================================================================
// PERSISTENCIA DE SESIÓN - adaptador inyectable
// ============================================================================

use std::rc::Rc;

use crate::session::state::PersistedSession;
use crate::utils::storage::{load_json, save_json};
use crate::utils::{BrowserStorage, FallbackStorage, KeyValueStore, StorageError, STORAGE_KEY_SESSION};

pub trait SessionPersistence {
    /// `Ok(None)` si no hay nada guardado
    fn load(&self) -> Result<Option<PersistedSession>, StorageError>;
    fn save(&self, state: &PersistedSession) -> Result<(), StorageError>;
}

/// Guarda el blob de sesión como JSON en un `KeyValueStore`
pub struct StoragePersistence<S: KeyValueStore> {
    storage: S,
    key: &'static str,
}

impl<S: KeyValueStore> StoragePersistence<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: STORAGE_KEY_SESSION,
        }
    }
}

impl<S: KeyValueStore> SessionPersistence for StoragePersistence<S> {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        load_json(&self.storage, self.key)
    }

    fn save(&self, state: &PersistedSession) -> Result<(), StorageError> {
        save_json(&self.storage, self.key, state)
    }
}

impl<P: SessionPersistence + ?Sized> SessionPersistence for Rc<P> {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        (**self).load()
    }

    fn save(&self, state: &PersistedSession) -> Result<(), StorageError> {
        (**self).save(state)
    }
}

/// localStorage con caída a memoria
pub fn browser_persistence(storage: Rc<FallbackStorage<BrowserStorage>>) -> StoragePersistence<Rc<FallbackStorage<BrowserStorage>>> {
    StoragePersistence::new(storage)
}
