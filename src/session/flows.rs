// ============================================================================
// FLUJOS DE SESIÓN - login, logout, expiración y refresco del usuario
// ============================================================================
// Solo estas funciones mutan el SessionStore fuera de la hidratación.
// La navegación la hace el llamador (hooks), aquí solo el estado.
// ============================================================================

use crate::models::{LoginRequest, UserSummary};
use crate::query::{keys, QueryClient};
use crate::session::events::SessionSignal;
use crate::session::remember;
use crate::session::store::SessionStore;
use crate::utils::validation::{validate_login, FieldErrors};
use crate::utils::KeyValueStore;

/// Envío del formulario de login: valida y, si es correcto, aplica
/// "recordarme" antes de que salga la petición (falle o no el login)
pub fn prepare_login(
    storage: &dyn KeyValueStore,
    email: &str,
    password: &str,
    remember_me: bool,
) -> Result<LoginRequest, FieldErrors> {
    validate_login(email, password)?;

    let email = email.trim().to_string();
    remember::apply(storage, remember_me, &email);
    Ok(LoginRequest {
        email,
        password: password.to_string(),
        remember_me,
    })
}

/// Login correcto: guardar usuario, refrescar "me" y volver a armar la señal
pub fn complete_login(session: &SessionStore, queries: &QueryClient, signal: &SessionSignal, user: UserSummary) {
    log::info!("✅ Login correcto: {}", user.email);
    session.set_user(Some(user));
    queries.invalidate(&keys::me());
    signal.rearm();
}

/// Cierre de sesión local (tras pedir logout a la API o sin ella)
pub fn complete_logout(session: &SessionStore, queries: &QueryClient) {
    log::info!("👋 Logout");
    session.logout();
    queries.clear();
}

/// Respuesta de `/admin/me`: actualiza el usuario de la sesión si cambió.
/// Se ignora si ya no hay sesión o si es de otro usuario (respuesta tardía
/// de una sesión anterior). Devuelve si hubo cambio.
pub fn refresh_user(session: &SessionStore, fresh: &UserSummary) -> bool {
    let current = match session.user() {
        Some(current) if session.is_authenticated() => current,
        _ => {
            log::debug!("🔕 /admin/me llegó sin sesión, se ignora");
            return false;
        }
    };
    if current.id != fresh.id {
        log::warn!("⚠️ /admin/me devolvió otro usuario ({}), se ignora", fresh.id);
        return false;
    }
    if current == *fresh {
        return false;
    }
    log::info!("🔄 Usuario actualizado desde /admin/me");
    session.set_user(Some(fresh.clone()));
    true
}

/// 401 en cualquier petición: mismo efecto que un logout, sin llamar a la
/// API (el servidor ya no reconoce la sesión)
pub fn expire_session(session: &SessionStore, queries: &QueryClient) {
    if session.is_authenticated() {
        log::warn!("🔒 Sesión expirada, cerrando sesión local");
    }
    complete_logout(session, queries);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueryConfig;
    use crate::services::ApiError;
    use crate::session::interceptor::{ErrorInterceptor, ErrorOrigin};
    use crate::session::store::tests::{memory_store, user};
    use crate::state::ToastQueue;
    use crate::utils::{MemoryStorage, STORAGE_KEY_REMEMBERED_EMAIL, STORAGE_KEY_REMEMBER_ME};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn unchecking_remember_me_forgets_values_before_the_request_is_sent() {
        let storage = MemoryStorage::new();
        remember::apply(&storage, true, "ana@shop.com");

        let request = prepare_login(&storage, " ana@shop.com ", "wrong", false).unwrap();

        // El login aún no se ha enviado y ya no queda nada guardado
        assert!(storage.is_empty());
        assert_eq!(request.email, "ana@shop.com");
        assert!(!request.remember_me);
    }

    #[test]
    fn checking_remember_me_stores_the_email_on_submit() {
        let storage = MemoryStorage::new();

        let request = prepare_login(&storage, "ana@shop.com", "secret", true).unwrap();

        assert!(request.remember_me);
        assert_eq!(storage.get(STORAGE_KEY_REMEMBER_ME).unwrap().as_deref(), Some("true"));
        assert_eq!(storage.get(STORAGE_KEY_REMEMBERED_EMAIL).unwrap().as_deref(), Some("ana@shop.com"));
    }

    #[test]
    fn invalid_form_leaves_remember_me_untouched() {
        let storage = MemoryStorage::new();
        remember::apply(&storage, true, "ana@shop.com");

        let errors = prepare_login(&storage, "not-an-email", "", false).unwrap_err();

        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(storage.get(STORAGE_KEY_REMEMBER_ME).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn refresh_updates_only_a_changed_user_of_the_live_session() {
        let (session, _) = memory_store();
        session.set_user(Some(user("1")));

        assert!(!refresh_user(&session, &user("1")));

        let mut renamed = user("1");
        renamed.name = "Renamed".into();
        assert!(refresh_user(&session, &renamed));
        assert_eq!(session.user().unwrap().name, "Renamed");

        assert!(!refresh_user(&session, &user("2")));
        assert_eq!(session.user().unwrap().id, "1");
    }

    #[test]
    fn refresh_arriving_after_logout_is_ignored() {
        let (session, _) = memory_store();
        let queries = QueryClient::new(QueryConfig::default());
        session.set_user(Some(user("1")));
        complete_logout(&session, &queries);

        let mut late = user("1");
        late.name = "Late".into();

        assert!(!refresh_user(&session, &late));
        assert!(!session.is_authenticated());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn login_replaces_user_and_invalidates_current_user() {
        let (session, _) = memory_store();
        let queries = QueryClient::new(QueryConfig::default());
        let signal = SessionSignal::new();
        queries.set_data(keys::me(), &user("old"));
        signal.publish_expired();

        complete_login(&session, &queries, &signal, user("1"));

        assert_eq!(session.user().unwrap().id, "1");
        assert!(queries.is_stale(&keys::me()));
        assert!(signal.is_armed());
    }

    #[test]
    fn logout_clears_session_and_cache() {
        let (session, _) = memory_store();
        let queries = QueryClient::new(QueryConfig::default());
        session.set_user(Some(user("1")));
        queries.set_data(keys::me(), &user("1"));

        complete_logout(&session, &queries);
        complete_logout(&session, &queries);

        assert!(!session.is_authenticated());
        assert!(queries.is_empty());
    }

    #[test]
    fn one_401_triggers_exactly_one_expiry_and_no_toast() {
        let (session, _) = memory_store();
        let queries = QueryClient::new(QueryConfig::default());
        let signal = SessionSignal::new();
        let toasts = ToastQueue::new();
        let interceptor = ErrorInterceptor::new(signal.clone(), toasts.clone());
        session.set_user(Some(user("1")));

        let expirations = Rc::new(Cell::new(0));
        let _watcher = {
            let (session, queries, expirations) = (session.clone(), queries.clone(), expirations.clone());
            signal.subscribe(move |_| {
                expirations.set(expirations.get() + 1);
                expire_session(&session, &queries);
            })
        };

        let unauthorized = ApiError::Http { status: 401, message: Some("jwt expired".into()) };
        interceptor.handle(ErrorOrigin::Query, &unauthorized);
        interceptor.handle(ErrorOrigin::Query, &unauthorized);

        assert_eq!(expirations.get(), 1);
        assert!(!session.is_authenticated());
        assert!(toasts.toasts().is_empty());

        complete_login(&session, &queries, &signal, user("1"));
        interceptor.handle(ErrorOrigin::Mutation, &unauthorized);
        assert_eq!(expirations.get(), 2);
    }
}
