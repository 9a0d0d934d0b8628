// ============================================================================
// USE MUTATION HOOK - escrituras sin reintentos
// ============================================================================
// Al terminar bien invalida las claves indicadas. Los errores pasan por el
// ErrorInterceptor (origen Mutation → toast). Las peticiones pendientes se
// cancelan al desmontar.
// ============================================================================

use std::future::Future;
use std::rc::Rc;

use yew::prelude::*;

use crate::hooks::session_context::use_app_context;
use crate::query::QueryKey;
use crate::services::{ApiClient, ApiError, CancelToken};
use crate::session::ErrorOrigin;

pub struct MutationOptions<O> {
    pub invalidates: Vec<QueryKey>,
    /// Título del toast de éxito
    pub success_message: Option<String>,
    pub on_success: Option<Callback<O>>,
}

impl<O> Default for MutationOptions<O> {
    fn default() -> Self {
        Self {
            invalidates: Vec::new(),
            success_message: None,
            on_success: None,
        }
    }
}

impl<O> MutationOptions<O> {
    pub fn invalidating(invalidates: Vec<QueryKey>) -> Self {
        Self {
            invalidates,
            ..Self::default()
        }
    }

    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn on_success(mut self, callback: Callback<O>) -> Self {
        self.on_success = Some(callback);
        self
    }
}

pub struct UseMutationHandle<I: 'static, O> {
    pub run: Callback<I>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub data: Option<O>,
}

struct MutationState<O> {
    loading: bool,
    error: Option<ApiError>,
    data: Option<O>,
}

#[hook]
pub fn use_mutation<I, O, F, Fut>(mutation: F, options: MutationOptions<O>) -> UseMutationHandle<I, O>
where
    I: 'static,
    O: Clone + 'static,
    F: Fn(ApiClient, CancelToken, I) -> Fut + 'static,
    Fut: Future<Output = Result<O, ApiError>> + 'static,
{
    let context = use_app_context();
    let state = use_state(|| MutationState::<O> {
        loading: false,
        error: None,
        data: None,
    });
    let pending = use_mut_ref(Vec::<CancelToken>::new);

    // Cancelar todo lo pendiente al desmontar
    {
        let pending = pending.clone();
        use_effect_with((), move |_| {
            move || {
                for token in pending.borrow_mut().drain(..) {
                    token.cancel();
                }
            }
        });
    }

    let run = {
        let mutation = Rc::new(mutation);
        let options = Rc::new(options);
        let state = state.clone();
        Callback::from(move |input: I| {
            let cancel = CancelToken::new();
            pending.borrow_mut().push(cancel.clone());
            state.set(MutationState {
                loading: true,
                error: None,
                data: state.data.clone(),
            });

            let (context, mutation, options, state, pending) = (
                context.clone(),
                mutation.clone(),
                options.clone(),
                state.clone(),
                pending.clone(),
            );
            wasm_bindgen_futures::spawn_local(async move {
                let request = (*mutation)(context.api.clone(), cancel.clone(), input);
                let result = context.queries.mutate(request, &options.invalidates).await;

                pending.borrow_mut().retain(|token| token != &cancel);
                if cancel.is_cancelled() {
                    return;
                }

                match result {
                    Ok(data) => {
                        if let Some(message) = &options.success_message {
                            context.toasts.success(message.clone());
                        }
                        if let Some(on_success) = &options.on_success {
                            on_success.emit(data.clone());
                        }
                        state.set(MutationState {
                            loading: false,
                            error: None,
                            data: Some(data),
                        });
                    }
                    Err(e) => {
                        context.interceptor.handle(ErrorOrigin::Mutation, &e);
                        state.set(MutationState {
                            loading: false,
                            error: Some(e),
                            data: None,
                        });
                    }
                }
            });
        })
    };

    UseMutationHandle {
        run,
        loading: state.loading,
        error: state.error.clone(),
        data: state.data.clone(),
    }
}
