use serde::{Deserialize, Serialize};

/// Respuesta de `GET /api/availability` del backend de reservas.
/// Cualquiera de los dos campos puede faltar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub reserved: Option<u32>,
}

// Query de disponibilidad que recibe este servicio
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub sector: String,
}
