// ============================================================================
// APP CONTEXT - dependencias compartidas por toda la consola
// ============================================================================
// Se crea una sola vez en el provider y se comparte con Context API de Yew.
// La sesión se hidrata aquí, antes del primer render de las rutas.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::config::CONFIG;
use crate::query::QueryClient;
use crate::services::ApiClient;
use crate::session::persistence::{browser_persistence, StoragePersistence};
use crate::session::{ErrorInterceptor, SessionSignal, SessionStore};
use crate::state::ToastQueue;
use crate::utils::{BrowserStorage, FallbackStorage, KeyValueStore, MemoryStorage};

#[derive(Clone)]
pub struct AppContext {
    pub session: SessionStore,
    pub queries: QueryClient,
    pub signal: SessionSignal,
    pub toasts: ToastQueue,
    pub interceptor: ErrorInterceptor,
    pub api: ApiClient,
    /// Almacenamiento de "recordarme" (mismo backend que la sesión)
    pub storage: Rc<dyn KeyValueStore>,
}

impl AppContext {
    /// Contexto del navegador: localStorage con caída a memoria
    pub fn browser() -> Self {
        let storage = Rc::new(FallbackStorage::new(BrowserStorage));
        let session = SessionStore::new(browser_persistence(storage.clone()));
        session.hydrate();
        Self::assemble(session, storage, ApiClient::new())
    }

    /// Contexto sin almacenamiento duradero
    pub fn in_memory(api: ApiClient) -> Self {
        let storage = Rc::new(MemoryStorage::new());
        let session = SessionStore::new(StoragePersistence::new(storage.clone()));
        session.hydrate();
        Self::assemble(session, storage, api)
    }

    fn assemble(session: SessionStore, storage: Rc<dyn KeyValueStore>, api: ApiClient) -> Self {
        let signal = SessionSignal::new();
        let toasts = ToastQueue::new();
        Self {
            interceptor: ErrorInterceptor::new(signal.clone(), toasts.clone()),
            queries: QueryClient::new(CONFIG.query),
            session,
            signal,
            toasts,
            api,
            storage,
        }
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session
            && self.queries == other.queries
            && self.signal == other.signal
            && self.toasts == other.toasts
            && Rc::ptr_eq(&self.storage, &other.storage)
    }
}

#[derive(Properties, PartialEq)]
pub struct AppContextProviderProps {
    pub children: Children,
}

/// Provider que envuelve la app
#[function_component(AppContextProvider)]
pub fn app_context_provider(props: &AppContextProviderProps) -> Html {
    let context = use_state(AppContext::browser);

    html! {
        <ContextProvider<AppContext> context={(*context).clone()}>
            {props.children.clone()}
        </ContextProvider<AppContext>>
    }
}

/// Contexto de la app. Fuera del provider se devuelve uno en memoria para
/// no romper el render, y se avisa en consola.
#[hook]
pub fn use_app_context() -> AppContext {
    let context = use_context::<AppContext>();
    let fallback = use_state(|| context.is_none().then(|| AppContext::in_memory(ApiClient::new())));

    match (context, (*fallback).clone()) {
        (Some(context), _) => context,
        (None, Some(fallback)) => {
            log::error!("❌ use_app_context() usado fuera de AppContextProvider");
            fallback
        }
        (None, None) => AppContext::in_memory(ApiClient::new()),
    }
}
