//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema de reservas
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::services::reservation_validator::ReservationRejection;

/// Mensaje genérico cuando el backend de reservas responde con error
pub const SUBMIT_FAILED_MESSAGE: &str =
    "No se pudo enviar la reserva. Probá de nuevo en unos minutos.";

/// Mensaje genérico cuando no hay conexión con el backend de reservas
pub const CONNECTION_LOST_MESSAGE: &str = "Conexión caída. Probá de nuevo.";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Reservation rejected: {0}")]
    Rejected(#[from] ReservationRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("A submission is already in progress for this session")]
    SubmissionInProgress,

    #[error("Reservas API responded with status {0}")]
    UpstreamStatus(u16),

    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

}

impl AppError {
    /// Mensaje que se le muestra al visitante
    pub fn user_message(&self) -> String {
        match self {
            AppError::Rejected(reason) => reason.to_string(),
            AppError::Validation(_) => "Revisá los datos ingresados".to_string(),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::SubmissionInProgress => "Tu reserva se está enviando. Esperá un momento.".to_string(),
            AppError::UpstreamStatus(_) => SUBMIT_FAILED_MESSAGE.to_string(),
            AppError::Connection(_) => CONNECTION_LOST_MESSAGE.to_string(),
            AppError::Config(_) => "Ocurrió un error inesperado".to_string(),
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.user_message();
        let (status, error_response) = match &self {
            AppError::Rejected(reason) => {
                warn!("Reserva rechazada: {}", reason);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Reservation Rejected".to_string(),
                        message,
                        details: None,
                        code: Some(reason.code().to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message,
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::SubmissionInProgress => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message,
                    details: None,
                    code: Some("SUBMISSION_IN_PROGRESS".to_string()),
                },
            ),

            AppError::UpstreamStatus(status) => {
                error!("Reservas API error: status {}", status);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message,
                        details: Some(json!({ "upstream_status": status })),
                        code: Some("UPSTREAM_ERROR".to_string()),
                    },
                )
            }

            AppError::Connection(e) => {
                error!("Reservas API connection error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Service Unavailable".to_string(),
                        message,
                        details: None,
                        code: Some("CONNECTION_ERROR".to_string()),
                    },
                )
            }

            AppError::Config(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message,
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} '{}' no existe", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
