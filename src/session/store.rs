// ============================================================================
// SESSION STORE - fuente única del estado de autenticación
// ============================================================================
// Se crea una vez (AppContextProvider) y se pasa por contexto. Cada mutación
// reemplaza el estado entero, se persiste y se notifica a los subscribers.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::UserSummary;
use crate::session::persistence::SessionPersistence;
use crate::session::state::{PersistedSession, Session};
use crate::state::{Listeners, Subscription};

struct Inner {
    session: RefCell<Session>,
    persistence: Box<dyn SessionPersistence>,
    listeners: Listeners<Session>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    pub fn new(persistence: impl SessionPersistence + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                session: RefCell::new(Session::Anonymous),
                persistence: Box::new(persistence),
                listeners: Listeners::new(),
            }),
        }
    }

    /// Restaura la sesión guardada. Blob ausente o corrupto → sin sesión.
    pub fn hydrate(&self) -> Session {
        let restored = match self.inner.persistence.load() {
            Ok(Some(blob)) => blob.into_session(),
            Ok(None) => Session::Anonymous,
            Err(e) => {
                log::warn!("⚠️ No se pudo restaurar la sesión ({}), se inicia sin sesión", e);
                Session::Anonymous
            }
        };

        match restored.user() {
            Some(user) => log::info!("✅ Sesión restaurada: {}", user.email),
            None => log::info!("ℹ️ No hay sesión guardada"),
        }

        self.replace(restored.clone());
        restored
    }

    pub fn snapshot(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.session.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<UserSummary> {
        self.inner.session.borrow().user().cloned()
    }

    /// `false` cierra la sesión. `true` solo es válido si ya hay usuario:
    /// sin usuario se ignora y se avisa.
    pub fn set_is_authenticated(&self, flag: bool) {
        if !flag {
            self.replace(Session::Anonymous);
            return;
        }
        let current = self.snapshot();
        if current.is_authenticated() {
            self.replace(current);
        } else {
            log::warn!("⚠️ set_is_authenticated(true) sin usuario en sesión, se ignora");
        }
    }

    /// Reemplaza el usuario; `None` cierra la sesión
    pub fn set_user(&self, user: Option<UserSummary>) {
        match user {
            Some(user) => self.replace(Session::Authenticated(user)),
            None => self.replace(Session::Anonymous),
        }
    }

    /// Logout - limpiar todo
    pub fn logout(&self) {
        self.replace(Session::Anonymous);
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Session) + 'static,
    {
        self.inner.listeners.subscribe(callback)
    }

    fn replace(&self, next: Session) {
        *self.inner.session.borrow_mut() = next.clone();

        if let Err(e) = self.inner.persistence.save(&PersistedSession::from(&next)) {
            log::warn!("⚠️ No se pudo persistir la sesión: {}", e);
        }

        self.inner.listeners.notify(&next);
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Role;
    use crate::session::persistence::StoragePersistence;
    use crate::utils::storage::tests::BrokenStorage;
    use crate::utils::{FallbackStorage, KeyValueStore, MemoryStorage, STORAGE_KEY_SESSION};
    use std::cell::Cell;

    pub(crate) fn user(id: &str) -> UserSummary {
        UserSummary {
            id: id.into(),
            name: format!("Admin {id}"),
            email: format!("admin{id}@shop.com"),
            role: Role::Admin,
        }
    }

    pub(crate) fn memory_store() -> (SessionStore, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        (SessionStore::new(StoragePersistence::new(storage.clone())), storage)
    }

    fn persisted(storage: &MemoryStorage) -> serde_json::Value {
        let raw = storage.get(STORAGE_KEY_SESSION).unwrap().expect("blob written");
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn every_call_is_observable_immediately() {
        let (store, _) = memory_store();

        store.set_user(Some(user("1")));
        assert_eq!(store.user().map(|u| u.id), Some("1".to_string()));
        assert!(store.is_authenticated());

        store.set_user(Some(user("2")));
        assert_eq!(store.user().map(|u| u.id), Some("2".to_string()));

        store.set_is_authenticated(false);
        assert!(!store.is_authenticated());
        assert_eq!(store.user(), None);

        store.set_is_authenticated(true);
        assert!(!store.is_authenticated(), "cannot authenticate without a user");

        store.set_user(Some(user("3")));
        store.set_is_authenticated(true);
        assert_eq!(store.snapshot(), Session::Authenticated(user("3")));

        store.set_user(None);
        assert_eq!(store.snapshot(), Session::Anonymous);
    }

    #[test]
    fn logout_clears_both_fields_and_is_idempotent() {
        let (store, storage) = memory_store();
        store.set_user(Some(user("1")));

        store.logout();
        let once = store.snapshot();
        store.logout();

        assert_eq!(once, Session::Anonymous);
        assert_eq!(store.snapshot(), once);
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert_eq!(persisted(&storage)["state"]["isAuthenticated"], false);
        assert!(persisted(&storage)["state"]["user"].is_null());
    }

    #[test]
    fn mutations_are_mirrored_to_storage() {
        let (store, storage) = memory_store();
        store.set_user(Some(user("9")));
        let blob = persisted(&storage);
        assert_eq!(blob["state"]["isAuthenticated"], true);
        assert_eq!(blob["state"]["user"]["id"], "9");
    }

    #[test]
    fn hydrates_from_persisted_blob() {
        let storage = Rc::new(MemoryStorage::new());
        storage
            .set(
                STORAGE_KEY_SESSION,
                r#"{"state":{"isAuthenticated":true,"user":{"id":"1","name":"Root","email":"root@shop.com","role":"super-admin"}},"version":0}"#,
            )
            .unwrap();

        let store = SessionStore::new(StoragePersistence::new(storage));
        let session = store.hydrate();

        assert!(session.is_authenticated());
        assert!(store.is_authenticated());
        assert_eq!(store.user().unwrap().id, "1");
        assert_eq!(store.user().unwrap().role, Role::SuperAdmin);
    }

    #[test]
    fn malformed_or_absent_blob_yields_default() {
        let (store, _) = memory_store();
        assert_eq!(store.hydrate(), Session::Anonymous);

        for corrupt in ["{oops", r#"{"state":{"isAuthenticated":true,"user":{"id":"1","role":"pirate"}}}"#, "null"] {
            let storage = Rc::new(MemoryStorage::new());
            storage.set(STORAGE_KEY_SESSION, corrupt).unwrap();
            let store = SessionStore::new(StoragePersistence::new(storage));
            assert_eq!(store.hydrate(), Session::Anonymous, "{corrupt}");
        }
    }

    #[test]
    fn storage_failures_never_fail_the_caller() {
        let store = SessionStore::new(StoragePersistence::new(FallbackStorage::new(BrokenStorage)));
        assert_eq!(store.hydrate(), Session::Anonymous);
        store.set_user(Some(user("1")));
        assert!(store.is_authenticated());
        store.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn broken_storage_without_fallback_is_still_tolerated() {
        let store = SessionStore::new(StoragePersistence::new(BrokenStorage));
        store.set_user(Some(user("1")));
        assert!(store.is_authenticated());
    }

    #[test]
    fn subscribers_see_the_new_state() {
        let (store, _) = memory_store();
        let seen = Rc::new(Cell::new(0));
        let observer = store.clone();
        let _sub = {
            let seen = seen.clone();
            store.subscribe(move |session| {
                assert_eq!(*session, observer.snapshot());
                seen.set(seen.get() + 1);
            })
        };
        store.set_user(Some(user("1")));
        store.logout();
        assert_eq!(seen.get(), 2);
    }
}
