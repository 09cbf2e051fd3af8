//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno del servicio de reservas.

use std::env;
use std::time::Duration;

use crate::utils::errors::{AppError, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// URL base del backend que lleva los cupos (`/api/availability`, `/api/reservas`)
    pub reservas_api_url: String,
    pub http_timeout: Duration,
    pub cors_origins: Vec<String>,
    pub venue_config_path: Option<String>,
    pub log_level: String,
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno
    pub fn from_env() -> AppResult<Self> {
        let reservas_api_url = env::var("RESERVAS_API_URL")
            .map_err(|_| AppError::Config("RESERVAS_API_URL must be set".to_string()))?;

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_var("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            reservas_api_url: reservas_api_url.trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(parse_var("HTTP_TIMEOUT_SECS", 10)?),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_default(),
            venue_config_path: env::var("VENUE_CONFIG_PATH").ok().filter(|p| !p.is_empty()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuración para tests apuntando a un backend local
    pub fn for_backend(reservas_api_url: &str) -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            reservas_api_url: reservas_api_url.trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(5),
            cors_origins: Vec::new(),
            venue_config_path: None,
            log_level: "debug".to_string(),
        }
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Nivel de logging para el subscriber de tracing
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a valid number", name))),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
