// ============================================================================
// STORAGE - adaptadores clave/valor (localStorage + memoria)
// ============================================================================
// Todo acceso a almacenamiento pasa por el trait KeyValueStore para poder
// sustituir localStorage por un mapa en memoria (tests, modo privado).
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("localStorage no disponible")]
    Unavailable,
    #[error("error de lectura/escritura: {0}")]
    Io(String),
    #[error("error serializando datos: {0}")]
    Serde(String),
}

/// Almacén clave/valor de cadenas
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// window.localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Io(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|e| StorageError::Io(format!("{:?}", e)))
    }
}

/// Mapa en memoria: vive lo que dura el proceso
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Usa `primary` mientras funcione; al primer fallo pasa a memoria
/// durante el resto del proceso y lo avisa una sola vez.
pub struct FallbackStorage<S: KeyValueStore> {
    primary: S,
    memory: MemoryStorage,
    degraded: Cell<bool>,
}

impl<S: KeyValueStore> FallbackStorage<S> {
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            memory: MemoryStorage::new(),
            degraded: Cell::new(false),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.get()
    }

    fn degrade(&self, err: &StorageError) {
        if !self.degraded.replace(true) {
            log::warn!(
                "⚠️ Almacenamiento persistente no disponible ({}), usando memoria hasta recargar",
                err
            );
        }
    }
}

impl<S: KeyValueStore> KeyValueStore for FallbackStorage<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.degraded.get() {
            match self.primary.get(key) {
                Ok(value) => return Ok(value),
                Err(e) => self.degrade(&e),
            }
        }
        self.memory.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.degraded.get() {
            match self.primary.set(key, value) {
                Ok(()) => return Ok(()),
                Err(e) => self.degrade(&e),
            }
        }
        self.memory.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.degraded.get() {
            match self.primary.remove(key) {
                Ok(()) => return Ok(()),
                Err(e) => self.degrade(&e),
            }
        }
        self.memory.remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serde(e.to_string()))?;
    store.set(key, &json)
}

/// `Ok(None)` si la clave no existe; `Err(Serde)` si el contenido está corrupto
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Serde(e.to_string())),
        None => Ok(None),
    }
}
