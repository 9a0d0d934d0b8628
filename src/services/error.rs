// ============================================================================
// API ERROR - taxonomía de errores de red
// ============================================================================

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Decode(String),
    #[error("Request cancelled")]
    Cancelled,
}

/// Cuerpo de error que devuelve la API: `{ "message": "..." }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Construye el error a partir del status y el texto de la respuesta
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        ApiError::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_server_error(&self) -> bool {
        self.status().map(|s| s >= 500).unwrap_or(false)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Mensaje del servidor, si lo hubo
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Error que llega al error boundary
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Render(String),
}

impl AppError {
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(err) => Some(err),
            AppError::Render(_) => None,
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_server_message() {
        let err = ApiError::from_response(422, r#"{"message":"Email already taken"}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.server_message(), Some("Email already taken"));
        assert_eq!(err.to_string(), "HTTP 422: Email already taken");
    }

    #[test]
    fn tolerates_non_json_bodies() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.server_message(), None);
        assert!(err.is_server_error());
        assert_eq!(err.to_string(), "HTTP 502: request failed");
    }

    #[test]
    fn blank_messages_are_dropped() {
        let err = ApiError::from_response(400, r#"{"message":"  "}"#);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn classifies_statuses() {
        assert!(ApiError::from_response(401, "").is_unauthorized());
        assert!(ApiError::from_response(404, "").is_not_found());
        assert!(!ApiError::Network("offline".into()).is_server_error());
        assert!(ApiError::Cancelled.is_cancelled());
        assert_eq!(ApiError::Cancelled.status(), None);
    }
}
