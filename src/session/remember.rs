// ============================================================================
// RECORDARME - prerrellenar el email del formulario de login
// ============================================================================
// La contraseña nunca se guarda: la sesión larga la decide el servidor con
// una cookie httpOnly (LoginRequest::remember_me). La clave antigua con la
// contraseña en claro se borra siempre que se pasa por aquí.
// ============================================================================

use crate::utils::{
    KeyValueStore, STORAGE_KEY_LEGACY_PASSWORD, STORAGE_KEY_REMEMBERED_EMAIL, STORAGE_KEY_REMEMBER_ME,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RememberedLogin {
    pub remember: bool,
    pub email: String,
}

/// Valores para el formulario al montarlo
pub fn load(storage: &dyn KeyValueStore) -> RememberedLogin {
    purge_legacy_password(storage);

    let remember = matches!(storage.get(STORAGE_KEY_REMEMBER_ME), Ok(Some(flag)) if flag == "true");
    if !remember {
        return RememberedLogin::default();
    }

    let email = match storage.get(STORAGE_KEY_REMEMBERED_EMAIL) {
        Ok(Some(email)) => email,
        Ok(None) => String::new(),
        Err(e) => {
            log::warn!("⚠️ No se pudo leer el email recordado: {}", e);
            String::new()
        }
    };
    RememberedLogin { remember, email }
}

/// Al enviar el login: guarda o borra según la casilla
pub fn apply(storage: &dyn KeyValueStore, remember: bool, email: &str) {
    purge_legacy_password(storage);

    let result = if remember {
        storage
            .set(STORAGE_KEY_REMEMBER_ME, "true")
            .and_then(|_| storage.set(STORAGE_KEY_REMEMBERED_EMAIL, email.trim()))
    } else {
        storage
            .remove(STORAGE_KEY_REMEMBER_ME)
            .and_then(|_| storage.remove(STORAGE_KEY_REMEMBERED_EMAIL))
    };

    if let Err(e) = result {
        log::warn!("⚠️ No se pudo actualizar \"recordarme\": {}", e);
    }
}

fn purge_legacy_password(storage: &dyn KeyValueStore) {
    if let Ok(Some(_)) = storage.get(STORAGE_KEY_LEGACY_PASSWORD) {
        log::info!("🧹 Eliminando contraseña recordada de una versión anterior");
        if let Err(e) = storage.remove(STORAGE_KEY_LEGACY_PASSWORD) {
            log::warn!("⚠️ No se pudo eliminar la contraseña antigua: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;

    #[test]
    fn opt_in_persists_flag_and_email_but_never_the_password() {
        let storage = MemoryStorage::new();
        apply(&storage, true, " ana@shop.com ");

        assert_eq!(storage.get(STORAGE_KEY_REMEMBER_ME).unwrap().as_deref(), Some("true"));
        assert_eq!(storage.get(STORAGE_KEY_REMEMBERED_EMAIL).unwrap().as_deref(), Some("ana@shop.com"));
        assert_eq!(storage.get(STORAGE_KEY_LEGACY_PASSWORD).unwrap(), None);
        assert_eq!(storage.len(), 2);

        assert_eq!(
            load(&storage),
            RememberedLogin { remember: true, email: "ana@shop.com".into() }
        );
    }

    #[test]
    fn opt_out_removes_previous_values() {
        let storage = MemoryStorage::new();
        apply(&storage, true, "ana@shop.com");
        apply(&storage, false, "ana@shop.com");

        assert!(storage.is_empty());
        assert_eq!(load(&storage), RememberedLogin::default());
    }

    #[test]
    fn legacy_plaintext_password_is_purged() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_KEY_REMEMBER_ME, "true").unwrap();
        storage.set(STORAGE_KEY_REMEMBERED_EMAIL, "ana@shop.com").unwrap();
        storage.set(STORAGE_KEY_LEGACY_PASSWORD, "hunter2").unwrap();

        let remembered = load(&storage);

        assert_eq!(remembered.email, "ana@shop.com");
        assert_eq!(storage.get(STORAGE_KEY_LEGACY_PASSWORD).unwrap(), None);
    }

    #[test]
    fn email_without_flag_is_not_prefilled() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_KEY_REMEMBERED_EMAIL, "ana@shop.com").unwrap();
        assert_eq!(load(&storage), RememberedLogin::default());
    }
}
