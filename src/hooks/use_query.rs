// ============================================================================
// USE QUERY HOOK - lectura cacheada con cancelación al desmontar
// ============================================================================
// - Cada petición lleva su CancelToken; se cancela al desmontar o si cambia
//   la clave
// - Se vuelve a pedir cuando se invalida la clave o, si está obsoleta, cuando
//   la ventana recupera el foco
// - Los errores pasan por el ErrorInterceptor (origen Query)
// ============================================================================

use std::future::Future;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use yew::prelude::*;

use crate::hooks::session_context::use_app_context;
use crate::query::{CacheEvent, QueryKey};
use crate::services::{ApiClient, ApiError, CancelToken};
use crate::session::ErrorOrigin;

pub struct UseQueryHandle<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// Fuerza una petición nueva aunque la caché esté fresca
    pub refetch: Callback<()>,
}

struct QueryState<T> {
    data: Option<T>,
    loading: bool,
    error: Option<ApiError>,
}

/// Contador de peticiones; cada incremento vuelve a lanzar el efecto
#[derive(Default, PartialEq)]
struct FetchVersion(u32);

impl Reducible for FetchVersion {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(FetchVersion(self.0.wrapping_add(1)))
    }
}

#[hook]
pub fn use_query<T, F, Fut>(key: QueryKey, fetcher: F) -> UseQueryHandle<T>
where
    T: Clone + Serialize + DeserializeOwned + 'static,
    F: Fn(ApiClient, CancelToken) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let context = use_app_context();
    let fetcher = Rc::new(fetcher);
    let version = use_reducer(FetchVersion::default);
    let state = use_state(|| QueryState {
        data: context.queries.get_cached::<T>(&key),
        loading: true,
        error: None,
    });

    // Petición
    {
        let context = context.clone();
        let state = state.clone();
        let dispatcher = version.dispatcher();
        use_effect_with((key.clone(), version.0), move |(key, _)| {
            let cancel = CancelToken::new();
            let previous = state.data.clone();
            state.set(QueryState {
                data: previous.clone(),
                loading: true,
                error: None,
            });

            let key = key.clone();
            let scope = cancel.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let api = context.api.clone();
                let request = scope.clone();
                let result = context
                    .queries
                    .fetch(key.clone(), move || (*fetcher)(api.clone(), request.clone()))
                    .await;

                if scope.is_cancelled() {
                    return;
                }
                match result {
                    Ok(data) => state.set(QueryState {
                        data: Some(data),
                        loading: false,
                        error: None,
                    }),
                    // Petición compartida cancelada por otro hook: la nuestra sigue viva
                    Err(ApiError::Cancelled) => {
                        log::debug!("🔁 Petición compartida cancelada, repitiendo {}", key);
                        dispatcher.dispatch(());
                    }
                    Err(e) => {
                        context.interceptor.handle(ErrorOrigin::Query, &e);
                        state.set(QueryState {
                            data: previous,
                            loading: false,
                            error: Some(e),
                        });
                    }
                }
            });

            move || cancel.cancel()
        });
    }

    // Invalidaciones
    {
        let dispatcher = version.dispatcher();
        use_effect_with((context.queries.clone(), key.clone()), move |(queries, key)| {
            let key = key.clone();
            let subscription = queries.subscribe(move |event| {
                // Tras clear() la ruta se desmonta; no se vuelve a pedir
                if matches!(event, CacheEvent::Invalidated(_)) && event.affects(&key) {
                    dispatcher.dispatch(());
                }
            });
            move || drop(subscription)
        });
    }

    // Foco de ventana
    {
        let dispatcher = version.dispatcher();
        use_effect_with((context.queries.clone(), key.clone()), move |(queries, key)| {
            let listener = focus::listen({
                let (queries, key) = (queries.clone(), key.clone());
                move || {
                    if queries.is_stale(&key) {
                        dispatcher.dispatch(());
                    }
                }
            });
            move || drop(listener)
        });
    }

    // La suscripción de invalidaciones lanza la petición
    let refetch = {
        let queries = context.queries.clone();
        Callback::from(move |_| queries.invalidate(&key))
    };

    UseQueryHandle {
        data: state.data.clone(),
        loading: state.loading,
        error: state.error.clone(),
        refetch,
    }
}

mod focus {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    /// Listener de `focus` en window; se quita al soltarlo
    pub struct FocusListener {
        closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
    }

    pub fn listen<F: Fn() + 'static>(on_focus: F) -> FocusListener {
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| on_focus()) as Box<dyn FnMut(web_sys::Event)>);
        let registered = web_sys::window()
            .map(|win| win.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref()))
            .is_some_and(|result| result.is_ok());

        if !registered {
            log::warn!("⚠️ No se pudo registrar el listener de foco");
            return FocusListener { closure: None };
        }
        FocusListener { closure: Some(closure) }
    }

    impl Drop for FocusListener {
        fn drop(&mut self) {
            if let (Some(closure), Some(win)) = (self.closure.take(), web_sys::window()) {
                let _ = win.remove_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            }
        }
    }
}
