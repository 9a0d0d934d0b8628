// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Único punto de salida hacia la API: añade base URL, credenciales (cookie
// de sesión), señal de cancelación y timeout; desenvuelve `{ data: ... }`.
// Cada petición lleva su propio AbortController, hijo del token del llamador.
// ============================================================================

use futures::future::{self, Either};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use web_sys::RequestCredentials;

use crate::config::CONFIG;
use crate::services::cancel::CancelToken;
use crate::services::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Sobre de respuesta de la API
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.api_base_url.clone(),
            timeout_ms: CONFIG.network_timeout_seconds.saturating_mul(1000),
        }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms: CONFIG.network_timeout_seconds.saturating_mul(1000),
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, cancel: &CancelToken) -> Result<T, ApiError> {
        let local = cancel.child();
        let request = self.builder(Method::Get, path, &local).build()?;
        let body = self.execute(request, cancel, &local).await?;
        decode_envelope(&body)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
        cancel: &CancelToken,
    ) -> Result<T, ApiError> {
        let local = cancel.child();
        let request = self.builder(Method::Post, path, &local).json(payload)?;
        let body = self.execute(request, cancel, &local).await?;
        decode_envelope(&body)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
        cancel: &CancelToken,
    ) -> Result<T, ApiError> {
        let local = cancel.child();
        let request = self.builder(Method::Put, path, &local).json(payload)?;
        let body = self.execute(request, cancel, &local).await?;
        decode_envelope(&body)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
        cancel: &CancelToken,
    ) -> Result<T, ApiError> {
        let local = cancel.child();
        let request = self.builder(Method::Patch, path, &local).json(payload)?;
        let body = self.execute(request, cancel, &local).await?;
        decode_envelope(&body)
    }

    /// DELETE: el cuerpo de la respuesta se ignora
    pub async fn delete(&self, path: &str, cancel: &CancelToken) -> Result<(), ApiError> {
        let local = cancel.child();
        let request = self.builder(Method::Delete, path, &local).build()?;
        self.execute(request, cancel, &local).await.map(|_| ())
    }

    /// POST sin cuerpo cuya respuesta no interesa (logout)
    pub async fn post_empty(&self, path: &str, cancel: &CancelToken) -> Result<(), ApiError> {
        let local = cancel.child();
        let request = self.builder(Method::Post, path, &local).build()?;
        self.execute(request, cancel, &local).await.map(|_| ())
    }

    fn builder(&self, method: Method, path: &str, cancel: &CancelToken) -> RequestBuilder {
        let url = self.url(path);
        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };
        let signal = cancel.signal();
        builder
            .credentials(RequestCredentials::Include)
            .header("Accept", "application/json")
            .abort_signal(signal.as_ref())
    }

    /// Envía la petición y devuelve el cuerpo si el status es 2xx.
    /// `local` es hijo de `cancel` y lleva la señal del fetch: el timeout
    /// lo aborta sin cancelar el token del llamador.
    async fn execute(
        &self,
        request: Request,
        cancel: &CancelToken,
        local: &CancelToken,
    ) -> Result<String, ApiError> {
        let url = request.url();
        let send = Box::pin(request.send());
        let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));

        let response = match future::select(send, timeout).await {
            Either::Left((Ok(response), _)) => response,
            Either::Left((Err(e), _)) => {
                if cancel.is_cancelled() {
                    log::debug!("🚫 Petición cancelada: {}", url);
                    return Err(ApiError::Cancelled);
                }
                log::error!("❌ Error de red en {}: {}", url, e);
                return Err(e.into());
            }
            Either::Right(_) => {
                log::error!("⏱️ Timeout ({} ms) en {}, abortando", self.timeout_ms, url);
                local.cancel();
                return Err(ApiError::Network(format!("timeout after {} ms", self.timeout_ms)));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(_) if cancel.is_cancelled() => return Err(ApiError::Cancelled),
            Err(e) => return Err(e.into()),
        };

        if response.ok() {
            Ok(body)
        } else {
            log::debug!("HTTP {} en {}", status, url);
            Err(ApiError::from_response(status, &body))
        }
    }
}

/// Desenvuelve `{ "data": ... }`
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn joins_base_url_and_path() {
        let client = ApiClient::with_base_url("https://api.shop.test/v1/");
        assert_eq!(client.url("/product/allproducts"), "https://api.shop.test/v1/product/allproducts");
        assert_eq!(client.url("settings"), "https://api.shop.test/v1/settings");
    }

    #[test]
    fn unwraps_data_envelope() {
        let items: Vec<Item> = decode_envelope(r#"{"data":[{"id":"a"},{"id":"b"}],"total":2}"#).unwrap();
        assert_eq!(items, vec![Item { id: "a".into() }, Item { id: "b".into() }]);
    }

    #[test]
    fn missing_envelope_is_a_decode_error() {
        let result: Result<Vec<Item>, _> = decode_envelope(r#"[{"id":"a"}]"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
