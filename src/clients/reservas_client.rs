//! Cliente HTTP para el backend de reservas
//!
//! El backend lleva el cupo por día y por sector. Este módulo solo conoce su
//! contrato: `GET /api/availability` y `POST /api/reservas`.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::dto::availability_dto::AvailabilityResponse;
use crate::dto::reserva_dto::{ReservaPayload, ReservaResponse};
use crate::models::availability::AvailabilityKey;
use crate::utils::errors::{AppError, AppResult};

/// Operaciones del backend de reservas que usa el flujo de reserva
#[async_trait]
pub trait ReservasBackend: Send + Sync {
    /// Cupo de un sector para una fecha
    async fn fetch_availability(&self, key: &AvailabilityKey) -> AppResult<AvailabilityResponse>;

    /// Enviar una reserva validada
    async fn submit_reserva(&self, payload: &ReservaPayload) -> AppResult<ReservaResponse>;
}

/// Implementación sobre reqwest
#[derive(Clone)]
pub struct ReservasHttpClient {
    client: Client,
    base_url: String,
}

impl ReservasHttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("ParadorReservas/0.1")
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn availability_url(&self, key: &AvailabilityKey) -> String {
        let date = key.date.format("%Y-%m-%d").to_string();
        format!(
            "{}/api/availability?date={}&sector={}",
            self.base_url,
            urlencoding::encode(&date),
            urlencoding::encode(&key.sector_id)
        )
    }
}

#[async_trait]
impl ReservasBackend for ReservasHttpClient {
    async fn fetch_availability(&self, key: &AvailabilityKey) -> AppResult<AvailabilityResponse> {
        let url = self.availability_url(key);
        debug!("🌐 GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("❌ Disponibilidad {} respondió {}", key, status);
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let body = response.json::<AvailabilityResponse>().await?;
        debug!("📊 Disponibilidad {}: {:?}", key, body);
        Ok(body)
    }

    async fn submit_reserva(&self, payload: &ReservaPayload) -> AppResult<ReservaResponse> {
        let url = format!("{}/api/reservas", self.base_url);
        info!(
            "📨 Enviando reserva {} / {} - {} vehículo(s), {} asador(es), ${}",
            payload.fecha, payload.sector_id, payload.vehiculos, payload.grills_reservados, payload.monto_total
        );

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("❌ Reserva rechazada por el backend ({}): {}", status, error_text);
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        // Un 2xx sin cuerpo JSON válido cuenta como respuesta vacía
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ReservaResponse>(&text).unwrap_or_default();
        info!("✅ Reserva aceptada (link de pago: {})", body.payment_link.is_some());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_availability_url_is_encoded() {
        let client = ReservasHttpClient::new("http://backend.local/", Duration::from_secs(1)).unwrap();
        let key = AvailabilityKey::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), "la sombra");

        assert_eq!(client.base_url(), "http://backend.local");
        assert_eq!(
            client.availability_url(&key),
            "http://backend.local/api/availability?date=2025-06-01&sector=la%20sombra"
        );
    }
}
