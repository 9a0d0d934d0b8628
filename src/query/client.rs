// ============================================================================
// QUERY CLIENT - caché de consultas
// ============================================================================
// - Datos frescos durante `stale_seconds`; después se vuelven a pedir
// - Misma clave en vuelo → una sola petición compartida
// - Consultas: reintento según config; mutaciones: sin reintento
// - invalidate(prefijo) tras mutaciones, clear() en logout
// Los valores se guardan como serde_json::Value para poder compartir la
// caché entre tipos.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::config::QueryConfig;
use crate::query::keys::QueryKey;
use crate::services::ApiError;
use crate::state::{Listeners, Subscription};

pub type Clock = Rc<dyn Fn() -> DateTime<Utc>>;

type SharedFetch = Shared<LocalBoxFuture<'static, Result<Value, ApiError>>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheEvent {
    /// Todo lo que empieza por esta clave está obsoleto
    Invalidated(QueryKey),
    Cleared,
}

impl CacheEvent {
    pub fn affects(&self, key: &QueryKey) -> bool {
        match self {
            CacheEvent::Invalidated(prefix) => key.starts_with(prefix),
            CacheEvent::Cleared => true,
        }
    }
}

struct Entry {
    value: Value,
    fetched_at: DateTime<Utc>,
    invalidated: bool,
}

struct InFlight {
    id: u64,
    generation: u64,
    future: SharedFetch,
}

/// Identifica la petición que un llamador está esperando
#[derive(Clone, Copy)]
struct Ticket {
    id: u64,
    generation: u64,
}

struct Inner {
    config: QueryConfig,
    clock: Clock,
    entries: RefCell<HashMap<QueryKey, Entry>>,
    in_flight: RefCell<HashMap<QueryKey, InFlight>>,
    /// Sube en cada clear(): respuestas de antes del logout no se cachean
    generation: Cell<u64>,
    next_request: Cell<u64>,
    listeners: Listeners<CacheEvent>,
}

#[derive(Clone)]
pub struct QueryClient {
    inner: Rc<Inner>,
}

impl QueryClient {
    pub fn new(config: QueryConfig) -> Self {
        Self::with_clock(config, Rc::new(Utc::now))
    }

    pub fn with_clock(config: QueryConfig, clock: Clock) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                clock,
                entries: RefCell::new(HashMap::new()),
                in_flight: RefCell::new(HashMap::new()),
                generation: Cell::new(0),
                next_request: Cell::new(0),
                listeners: Listeners::new(),
            }),
        }
    }

    /// Dato en caché aunque esté obsoleto (para pintar mientras se refresca)
    pub fn get_cached<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.inner.entries.borrow();
        let entry = entries.get(key)?;
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        match self.inner.entries.borrow().get(key) {
            Some(entry) => self.entry_is_stale(entry),
            None => true,
        }
    }

    pub fn set_data<T: Serialize>(&self, key: QueryKey, data: &T) {
        match serde_json::to_value(data) {
            Ok(value) => self.store(key, value),
            Err(e) => log::warn!("⚠️ No se pudo cachear {}: {}", key, e),
        }
    }

    /// Devuelve el dato fresco de la caché o lo pide con `fetcher`.
    /// Llamadas concurrentes con la misma clave comparten la petición.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        if !self.is_stale(&key) {
            if let Some(data) = self.get_cached(&key) {
                return Ok(data);
            }
        }

        let (ticket, future) = self.join_or_start(&key, fetcher);
        let result = future.await;
        self.finish(&key, ticket, &result);

        let value = result?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Ejecuta una mutación (sin reintentos) e invalida `invalidates` si
    /// termina bien
    pub async fn mutate<T, Fut>(&self, mutation: Fut, invalidates: &[QueryKey]) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let data = mutation.await?;
        for key in invalidates {
            self.invalidate(key);
        }
        Ok(data)
    }

    /// Marca como obsoleto todo lo que empiece por `prefix` y avisa a los
    /// hooks montados para que vuelvan a pedirlo.
    /// Las peticiones en vuelo de esas claves se sueltan: el siguiente fetch
    /// arranca una nueva y la respuesta antigua ya no se guarda.
    pub fn invalidate(&self, prefix: &QueryKey) {
        let mut count = 0;
        for (key, entry) in self.inner.entries.borrow_mut().iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        let detached = {
            let mut in_flight = self.inner.in_flight.borrow_mut();
            let before = in_flight.len();
            in_flight.retain(|key, _| !key.starts_with(prefix));
            before - in_flight.len()
        };
        log::debug!(
            "♻️ Invalidado {} ({} entradas, {} peticiones soltadas)",
            prefix,
            count,
            detached
        );
        self.inner.listeners.notify(&CacheEvent::Invalidated(prefix.clone()));
    }

    /// Vacía la caché entera (logout / sesión expirada)
    pub fn clear(&self) {
        self.inner.entries.borrow_mut().clear();
        self.inner.in_flight.borrow_mut().clear();
        self.inner.generation.set(self.inner.generation.get() + 1);
        log::info!("🧹 Caché de consultas vaciada");
        self.inner.listeners.notify(&CacheEvent::Cleared);
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&CacheEvent) + 'static,
    {
        self.inner.listeners.subscribe(callback)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry_is_stale(&self, entry: &Entry) -> bool {
        let age = (self.inner.clock)() - entry.fetched_at;
        entry.invalidated || age >= Duration::seconds(self.inner.config.stale_seconds)
    }

    fn join_or_start<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> (Ticket, SharedFetch)
    where
        T: Serialize + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        if let Some(in_flight) = self.inner.in_flight.borrow().get(key) {
            log::debug!("🔗 Reutilizando petición en vuelo: {}", key);
            let ticket = Ticket {
                id: in_flight.id,
                generation: in_flight.generation,
            };
            return (ticket, in_flight.future.clone());
        }

        let retries = self.inner.config.query_retries;
        let label = key.to_string();
        let future = async move {
            let mut attempt = 0;
            loop {
                match fetcher().await {
                    Ok(data) => {
                        return serde_json::to_value(data).map_err(|e| ApiError::Decode(e.to_string()));
                    }
                    Err(err) if attempt < retries && should_retry(&err) => {
                        attempt += 1;
                        log::warn!("🔁 Reintentando {} ({}/{}): {}", label, attempt, retries, err);
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        .boxed_local()
        .shared();

        let ticket = Ticket {
            id: self.inner.next_request.get(),
            generation: self.inner.generation.get(),
        };
        self.inner.next_request.set(ticket.id + 1);
        self.inner.in_flight.borrow_mut().insert(
            key.clone(),
            InFlight {
                id: ticket.id,
                generation: ticket.generation,
                future: future.clone(),
            },
        );
        (ticket, future)
    }

    /// Lo ejecuta cada llamador al terminar; solo el primero encuentra su
    /// propia entrada en vuelo y guarda el resultado. Si la entrada se soltó
    /// (invalidate, clear) el resultado no se cachea.
    fn finish(&self, key: &QueryKey, ticket: Ticket, result: &Result<Value, ApiError>) {
        let owned = {
            let mut in_flight = self.inner.in_flight.borrow_mut();
            match in_flight.get(key) {
                Some(entry) if entry.id == ticket.id => {
                    in_flight.remove(key);
                    true
                }
                _ => false,
            }
        };
        if !owned || ticket.generation != self.inner.generation.get() {
            return;
        }
        if let Ok(value) = result {
            self.store(key.clone(), value.clone());
        }
    }

    fn store(&self, key: QueryKey, value: Value) {
        let entry = Entry {
            value,
            fetched_at: (self.inner.clock)(),
            invalidated: false,
        };
        self.inner.entries.borrow_mut().insert(key, entry);
    }
}

impl PartialEq for QueryClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Un 401 o una cancelación no se reintentan
fn should_retry(err: &ApiError) -> bool {
    !err.is_unauthorized() && !err.is_cancelled()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::keys::{self, resource};
    use crate::services::endpoints::Resource;
    use futures::channel::oneshot;
    use futures::executor::block_on;

    struct ManualClock(Rc<Cell<i64>>);

    impl ManualClock {
        fn new() -> (Self, Clock) {
            let secs = Rc::new(Cell::new(1_700_000_000));
            let reader = secs.clone();
            let clock: Clock = Rc::new(move || {
                DateTime::<Utc>::from_timestamp(reader.get(), 0).unwrap_or_default()
            });
            (Self(secs), clock)
        }

        fn advance(&self, secs: i64) {
            self.0.set(self.0.get() + secs);
        }
    }

    fn client() -> (QueryClient, ManualClock) {
        let (manual, clock) = ManualClock::new();
        (QueryClient::with_clock(QueryConfig::default(), clock), manual)
    }

    fn counting_fetcher(
        calls: Rc<Cell<u32>>,
        outcomes: Vec<Result<Vec<String>, ApiError>>,
    ) -> impl Fn() -> futures::future::Ready<Result<Vec<String>, ApiError>> + 'static {
        let outcomes = Rc::new(outcomes);
        move || {
            let n = calls.get() as usize;
            calls.set(calls.get() + 1);
            futures::future::ready(outcomes[n.min(outcomes.len() - 1)].clone())
        }
    }

    fn server_error() -> ApiError {
        ApiError::Http { status: 500, message: None }
    }

    #[test]
    fn fresh_data_is_served_from_cache() {
        let (queries, clock) = client();
        let calls = Rc::new(Cell::new(0));
        let key = resource(Resource::Product);

        let first: Vec<String> =
            block_on(queries.fetch(key.clone(), counting_fetcher(calls.clone(), vec![Ok(vec!["mug".into()])]))).unwrap();
        clock.advance(4);
        let second: Vec<String> =
            block_on(queries.fetch(key.clone(), counting_fetcher(calls.clone(), vec![Ok(vec!["cup".into()])]))).unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn stale_data_is_refetched() {
        let (queries, clock) = client();
        let calls = Rc::new(Cell::new(0));
        let key = resource(Resource::Order);
        let fetcher = || counting_fetcher(calls.clone(), vec![Ok(vec!["a".into()]), Ok(vec!["b".into()])]);

        let _: Vec<String> = block_on(queries.fetch(key.clone(), fetcher())).unwrap();
        clock.advance(5);
        assert!(queries.is_stale(&key));
        let again: Vec<String> = block_on(queries.fetch(key.clone(), fetcher())).unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(again, vec!["b".to_string()]);
    }

    #[test]
    fn queries_retry_once() {
        let (queries, _) = client();
        let calls = Rc::new(Cell::new(0));
        let result: Result<Vec<String>, _> = block_on(queries.fetch(
            resource(Resource::Shop),
            counting_fetcher(calls.clone(), vec![Err(server_error()), Ok(vec!["ok".into()])]),
        ));
        assert_eq!(result.unwrap(), vec!["ok".to_string()]);
        assert_eq!(calls.get(), 2);

        let calls = Rc::new(Cell::new(0));
        let result: Result<Vec<String>, _> = block_on(queries.fetch(
            resource(Resource::Customer),
            counting_fetcher(calls.clone(), vec![Err(server_error())]),
        ));
        assert_eq!(result.unwrap_err(), server_error());
        assert_eq!(calls.get(), 2);
        assert!(queries.get_cached::<Vec<String>>(&resource(Resource::Customer)).is_none());
    }

    #[test]
    fn unauthorized_is_not_retried() {
        let (queries, _) = client();
        let calls = Rc::new(Cell::new(0));
        let unauthorized = ApiError::Http { status: 401, message: None };
        let result: Result<Vec<String>, _> = block_on(queries.fetch(
            keys::me(),
            counting_fetcher(calls.clone(), vec![Err(unauthorized.clone())]),
        ));
        assert_eq!(result.unwrap_err(), unauthorized);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn mutations_never_retry_and_invalidate_on_success() {
        let (queries, _) = client();
        let key = resource(Resource::Product);
        queries.set_data(key.clone(), &vec!["mug".to_string()]);
        queries.set_data(key.clone().with("p1"), &"mug".to_string());
        queries.set_data(resource(Resource::Order), &vec!["o1".to_string()]);

        let calls = Rc::new(Cell::new(0));
        let failing = {
            let calls = calls.clone();
            async move {
                calls.set(calls.get() + 1);
                Err::<(), _>(server_error())
            }
        };
        assert!(block_on(queries.mutate(failing, &[key.clone()])).is_err());
        assert_eq!(calls.get(), 1);
        assert!(!queries.is_stale(&key));

        block_on(queries.mutate(async { Ok::<_, ApiError>(()) }, &[key.clone()])).unwrap();
        assert!(queries.is_stale(&key));
        assert!(queries.is_stale(&key.clone().with("p1")));
        assert!(!queries.is_stale(&resource(Resource::Order)));
    }

    #[test]
    fn concurrent_fetches_share_one_request() {
        let (queries, _) = client();
        let calls = Rc::new(Cell::new(0));
        let (tx, rx) = oneshot::channel::<()>();
        let gate = Rc::new(RefCell::new(Some(rx)));

        let fetcher = {
            let calls = calls.clone();
            move || {
                calls.set(calls.get() + 1);
                let rx = gate.borrow_mut().take();
                async move {
                    if let Some(rx) = rx {
                        let _ = rx.await;
                    }
                    Ok::<_, ApiError>(vec!["shared".to_string()])
                }
            }
        };

        let key = resource(Resource::Category);
        let a = queries.fetch::<Vec<String>, _, _>(key.clone(), fetcher.clone());
        let b = queries.fetch::<Vec<String>, _, _>(key.clone(), fetcher);
        let release = async move {
            let _ = tx.send(());
        };
        let (a, b, _) = block_on(async { futures::join!(a, b, release) });

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(calls.get(), 1);
        assert!(!queries.is_stale(&key));
    }

    #[test]
    fn responses_from_before_clear_are_not_cached() {
        let (queries, _) = client();
        let (tx, rx) = oneshot::channel::<()>();
        let gate = Rc::new(RefCell::new(Some(rx)));
        let fetcher = move || {
            let rx = gate.borrow_mut().take();
            async move {
                if let Some(rx) = rx {
                    let _ = rx.await;
                }
                Ok::<_, ApiError>("old session".to_string())
            }
        };

        let key = keys::me();
        let pending = queries.fetch::<String, _, _>(key.clone(), fetcher);
        let logout = {
            let queries = queries.clone();
            async move {
                queries.clear();
                let _ = tx.send(());
            }
        };
        let (result, _) = block_on(async { futures::join!(pending, logout) });

        assert!(result.is_ok());
        assert!(queries.is_empty());
    }

    #[test]
    fn refetch_after_mutation_does_not_join_the_older_request() {
        let (queries, _) = client();
        let calls = Rc::new(Cell::new(0));
        let (tx, rx) = oneshot::channel::<()>();
        let gate = Rc::new(RefCell::new(Some(rx)));

        let fetcher = {
            let calls = calls.clone();
            move || {
                calls.set(calls.get() + 1);
                let rx = gate.borrow_mut().take();
                async move {
                    match rx {
                        Some(rx) => {
                            let _ = rx.await;
                            Ok::<_, ApiError>(vec!["before-mutation".to_string()])
                        }
                        None => Ok(vec!["after-mutation".to_string()]),
                    }
                }
            }
        };

        let key = resource(Resource::Product);
        let pending = queries.fetch::<Vec<String>, _, _>(key.clone(), fetcher.clone());
        let mutate_then_refetch = {
            let queries = queries.clone();
            let key = key.clone();
            async move {
                queries
                    .mutate(async { Ok::<_, ApiError>(()) }, &[key.clone()])
                    .await
                    .unwrap();
                let refetched = queries.fetch::<Vec<String>, _, _>(key, fetcher).await;
                let _ = tx.send(());
                refetched
            }
        };
        let (old, refetched) = block_on(async { futures::join!(pending, mutate_then_refetch) });

        assert_eq!(old.unwrap(), vec!["before-mutation".to_string()]);
        assert_eq!(refetched.unwrap(), vec!["after-mutation".to_string()]);
        assert_eq!(calls.get(), 2);
        assert!(!queries.is_stale(&key));
        assert_eq!(
            queries.get_cached::<Vec<String>>(&key),
            Some(vec!["after-mutation".to_string()])
        );
    }

    #[test]
    fn clear_notifies_every_subscriber() {
        let (queries, _) = client();
        let events = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let events = events.clone();
            queries.subscribe(move |e| events.borrow_mut().push(e.clone()))
        };
        queries.set_data(keys::me(), &"x");
        queries.invalidate(&keys::me());
        queries.clear();

        let events = events.borrow();
        assert_eq!(*events, vec![CacheEvent::Invalidated(keys::me()), CacheEvent::Cleared]);
        assert!(events[1].affects(&resource(Resource::Product)));
        assert!(!events[0].affects(&resource(Resource::Product)));
    }
}
