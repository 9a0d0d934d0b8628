// ============================================================================
// CONFIGURACIÓN - valores fijados en tiempo de compilación
// ============================================================================
// build.rs inyecta las variables de .env; aquí se leen con option_env!
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub network_timeout_seconds: u32,
    pub query: QueryConfig,
    pub toast_duration_ms: u32,
}

/// Política de caché de consultas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Segundos durante los que un dato se considera fresco
    pub stale_seconds: i64,
    /// Reintentos automáticos de una consulta fallida (las mutaciones nunca
    /// se reintentan)
    pub query_retries: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_seconds: 5,
            query_retries: 1,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            network_timeout_seconds: 30,
            query: QueryConfig::default(),
            toast_duration_ms: 5000,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            network_timeout_seconds: option_env!("NETWORK_TIMEOUT_SECONDS")
                .unwrap_or("30").parse().unwrap_or(30),
            query: QueryConfig {
                stale_seconds: option_env!("QUERY_STALE_SECONDS")
                    .unwrap_or("5").parse().unwrap_or(5),
                query_retries: option_env!("QUERY_RETRY")
                    .unwrap_or("1").parse().unwrap_or(1),
            },
            toast_duration_ms: option_env!("TOAST_DURATION_MS")
                .unwrap_or("5000").parse().unwrap_or(5000),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log según ENABLE_LOGGING; en producción nunca por debajo de Info
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging && !self.is_production() {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_query_policy() {
        let config = AppConfig::default();
        assert_eq!(config.query.stale_seconds, 5);
        assert_eq!(config.query.query_retries, 1);
        assert!(!config.is_production());
    }

    #[test]
    fn log_level_follows_logging_flag() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn production_never_logs_debug() {
        let config = AppConfig {
            environment: "production".to_string(),
            ..AppConfig::default()
        };
        assert!(config.enable_logging);
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
