use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::session_context::use_app_context;
use crate::hooks::use_session::use_session;
use crate::routes::{replace_to_destination, ReturnTo, Route};
use crate::services::{admin_service, CancelToken};
use crate::session::remember::{self, RememberedLogin};
use crate::session::{flows, ErrorOrigin, Session};
use crate::utils::validation::FieldErrors;
use crate::utils::INVALID_CREDENTIALS_MESSAGE;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

pub struct UseAuthHandle {
    pub session: Session,
    /// Valores iniciales del formulario
    pub remembered: RememberedLogin,
    pub submitting: bool,
    pub field_errors: FieldErrors,
    pub login: Callback<LoginForm>,
    pub logout: Callback<()>,
}

#[hook]
pub fn use_auth() -> UseAuthHandle {
    let context = use_app_context();
    let session = use_session();
    let navigator = use_navigator();
    let location = use_location();
    let remembered = use_state(|| remember::load(context.storage.as_ref()));
    let submitting = use_state(|| false);
    let field_errors = use_state(FieldErrors::default);

    // Login callback
    let login = {
        let context = context.clone();
        let navigator = navigator.clone();
        let submitting = submitting.clone();
        let field_errors = field_errors.clone();
        let return_to = location
            .and_then(|location| location.state::<ReturnTo>())
            .map(|state| (*state).clone());

        Callback::from(move |form: LoginForm| {
            let request = match flows::prepare_login(
                context.storage.as_ref(),
                &form.email,
                &form.password,
                form.remember,
            ) {
                Ok(request) => request,
                Err(errors) => {
                    field_errors.set(errors);
                    return;
                }
            };
            field_errors.set(FieldErrors::default());
            submitting.set(true);

            let (context, navigator, submitting, return_to) =
                (context.clone(), navigator.clone(), submitting.clone(), return_to.clone());
            wasm_bindgen_futures::spawn_local(async move {
                match admin_service::login(&context.api, &request, &CancelToken::new()).await {
                    Ok(user) => {
                        flows::complete_login(&context.session, &context.queries, &context.signal, user);

                        match navigator {
                            Some(navigator) => replace_to_destination(&navigator, return_to.as_ref()),
                            None => log::error!("❌ Login sin router, no se puede navegar"),
                        }
                    }
                    // Credenciales incorrectas: no es una sesión expirada
                    Err(e) if e.is_unauthorized() => {
                        log::warn!("⚠️ Login rechazado: {}", e);
                        context
                            .toasts
                            .error(e.server_message().unwrap_or(INVALID_CREDENTIALS_MESSAGE).to_string());
                        submitting.set(false);
                    }
                    Err(e) => {
                        context.interceptor.handle(ErrorOrigin::Mutation, &e);
                        submitting.set(false);
                    }
                }
            });
        })
    };

    // Logout callback
    let logout = {
        let context = context.clone();
        Callback::from(move |_| {
            let (context, navigator) = (context.clone(), navigator.clone());
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = admin_service::logout(&context.api, &CancelToken::new()).await {
                    log::warn!("⚠️ Logout remoto falló, se cierra la sesión local igualmente: {}", e);
                }
                flows::complete_logout(&context.session, &context.queries);
                if let Some(navigator) = navigator {
                    navigator.replace(&Route::Login);
                }
            });
        })
    };

    UseAuthHandle {
        session,
        remembered: (*remembered).clone(),
        submitting: *submitting,
        field_errors: (*field_errors).clone(),
        login,
        logout,
    }
}
