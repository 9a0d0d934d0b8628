// ============================================================================
// ERROR INTERCEPTOR - política global de errores de petición
// ============================================================================
//   401        → expirar sesión (nunca toast)
//   404 / 5xx  → consultas: solo log
//   mutación   → toast con el mensaje del servidor o uno genérico
//   boundary   → pantalla de error
//   cancelada  → se ignora
// ============================================================================

use crate::services::error::{ApiError, AppError};
use crate::session::events::SessionSignal;
use crate::state::ToastQueue;
use crate::utils::GENERIC_ERROR_MESSAGE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorOrigin {
    Query,
    Mutation,
    Boundary,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ErrorAction {
    Ignore,
    ExpireSession,
    Log(log::Level),
    Toast(String),
    CrashScreen,
}

pub fn classify(origin: ErrorOrigin, err: &ApiError) -> ErrorAction {
    if err.is_cancelled() {
        return ErrorAction::Ignore;
    }
    if err.is_unauthorized() {
        return ErrorAction::ExpireSession;
    }
    match origin {
        ErrorOrigin::Query if err.is_not_found() => ErrorAction::Log(log::Level::Info),
        ErrorOrigin::Query if err.is_server_error() => ErrorAction::Log(log::Level::Error),
        ErrorOrigin::Query => ErrorAction::Log(log::Level::Warn),
        ErrorOrigin::Mutation => ErrorAction::Toast(
            err.server_message()
                .unwrap_or(GENERIC_ERROR_MESSAGE)
                .to_string(),
        ),
        ErrorOrigin::Boundary => ErrorAction::CrashScreen,
    }
}

#[derive(Clone, PartialEq)]
pub struct ErrorInterceptor {
    signal: SessionSignal,
    toasts: ToastQueue,
}

impl ErrorInterceptor {
    pub fn new(signal: SessionSignal, toasts: ToastQueue) -> Self {
        Self { signal, toasts }
    }

    /// Aplica la política y devuelve la acción tomada
    pub fn handle(&self, origin: ErrorOrigin, err: &ApiError) -> ErrorAction {
        let action = classify(origin, err);
        match &action {
            ErrorAction::Ignore => {}
            ErrorAction::ExpireSession => {
                self.signal.publish_expired();
            }
            ErrorAction::Log(level) => log::log!(*level, "{:?}: {}", origin, err),
            ErrorAction::Toast(message) => {
                log::error!("❌ Error en mutación: {}", err);
                self.toasts.error(message.clone());
            }
            ErrorAction::CrashScreen => log::error!("❌ Error no controlado: {}", err),
        }
        action
    }

    /// Errores que llegan al boundary; los de render siempre muestran la
    /// pantalla de error
    pub fn handle_boundary(&self, err: &AppError) -> ErrorAction {
        match err.api() {
            Some(api_error) => self.handle(ErrorOrigin::Boundary, api_error),
            None => {
                log::error!("❌ Error de render: {}", err);
                ErrorAction::CrashScreen
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn http(status: u16, message: Option<&str>) -> ApiError {
        ApiError::Http {
            status,
            message: message.map(str::to_string),
        }
    }

    fn interceptor() -> (ErrorInterceptor, SessionSignal, ToastQueue) {
        let signal = SessionSignal::new();
        let toasts = ToastQueue::new();
        (ErrorInterceptor::new(signal.clone(), toasts.clone()), signal, toasts)
    }

    #[test]
    fn unauthorized_expires_the_session_from_every_origin() {
        for origin in [ErrorOrigin::Query, ErrorOrigin::Mutation, ErrorOrigin::Boundary] {
            assert_eq!(classify(origin, &http(401, Some("expired"))), ErrorAction::ExpireSession);
        }
    }

    #[test]
    fn query_errors_are_logged_only() {
        assert_eq!(classify(ErrorOrigin::Query, &http(404, None)), ErrorAction::Log(log::Level::Info));
        assert_eq!(classify(ErrorOrigin::Query, &http(503, None)), ErrorAction::Log(log::Level::Error));
        assert_eq!(
            classify(ErrorOrigin::Query, &ApiError::Network("offline".into())),
            ErrorAction::Log(log::Level::Warn)
        );
    }

    #[test]
    fn mutation_errors_toast_with_server_message_or_fallback() {
        assert_eq!(
            classify(ErrorOrigin::Mutation, &http(422, Some("SKU already exists"))),
            ErrorAction::Toast("SKU already exists".into())
        );
        assert_eq!(
            classify(ErrorOrigin::Mutation, &http(500, None)),
            ErrorAction::Toast(GENERIC_ERROR_MESSAGE.into())
        );
    }

    #[test]
    fn cancelled_requests_are_ignored() {
        let (interceptor, signal, toasts) = interceptor();
        assert_eq!(interceptor.handle(ErrorOrigin::Mutation, &ApiError::Cancelled), ErrorAction::Ignore);
        assert!(toasts.toasts().is_empty());
        assert!(signal.is_armed());
    }

    #[test]
    fn a_burst_of_401s_logs_out_once_without_toasts() {
        let (interceptor, signal, toasts) = interceptor();
        let expirations = Rc::new(Cell::new(0));
        let _sub = {
            let expirations = expirations.clone();
            signal.subscribe(move |_| expirations.set(expirations.get() + 1))
        };

        interceptor.handle(ErrorOrigin::Query, &http(401, None));
        interceptor.handle(ErrorOrigin::Mutation, &http(401, Some("jwt expired")));
        interceptor.handle_boundary(&AppError::Api(http(401, None)));

        assert_eq!(expirations.get(), 1);
        assert!(toasts.toasts().is_empty());
    }

    #[test]
    fn boundary_distinguishes_render_errors() {
        let (interceptor, _, toasts) = interceptor();
        assert_eq!(
            interceptor.handle_boundary(&AppError::Render("index out of bounds".into())),
            ErrorAction::CrashScreen
        );
        assert_eq!(
            interceptor.handle_boundary(&AppError::Api(http(500, None))),
            ErrorAction::CrashScreen
        );
        assert!(toasts.toasts().is_empty());
    }

    #[test]
    fn mutation_failure_pushes_one_destructive_toast() {
        let (interceptor, _, toasts) = interceptor();
        interceptor.handle(ErrorOrigin::Mutation, &http(400, Some("Name is required")));
        let shown = toasts.toasts();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].description.as_deref(), Some("Name is required"));
    }
}
