use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::reservation::{PaymentMethod, ReservationRequest};

/// Cuerpo de `POST /api/reservas` tal como lo espera el backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservaPayload {
    pub fecha: NaiveDate,
    pub sector_id: String,
    pub grills_reservados: u32,
    pub personas: u32,
    pub vehiculos: u32,
    pub nombre: String,
    pub telefono: String,
    /// Vacío cuando el visitante no dejó email
    pub email: String,
    pub metodo_pago: PaymentMethod,
    pub monto_total: u64,
    pub politicas: Politicas,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Politicas {
    pub cancelacion: String,
}

impl From<&ReservationRequest> for ReservaPayload {
    fn from(request: &ReservationRequest) -> Self {
        Self {
            fecha: request.date(),
            sector_id: request.sector_id().to_string(),
            grills_reservados: request.grills(),
            personas: request.persons(),
            vehiculos: request.vehicles(),
            nombre: request.nombre().to_string(),
            telefono: request.telefono().to_string(),
            email: request.email().unwrap_or_default().to_string(),
            metodo_pago: request.payment(),
            monto_total: request.total(),
            politicas: Politicas {
                cancelacion: request.cancellation_policy().to_string(),
            },
        }
    }
}

/// Respuesta exitosa del backend; ambos campos son opcionales
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservaResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Link de checkout de Mercado Pago, si corresponde redirigir
    #[serde(default)]
    pub payment_link: Option<String>,
}

// Request de reserva que recibe este servicio desde el formulario
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReservaRequest {
    pub fecha: String,
    pub sector_id: String,
    #[validate(range(min = 1, max = 500))]
    pub personas: u32,
    #[validate(range(min = 1, max = 100))]
    pub vehiculos: u32,
    #[serde(alias = "grills_reservados")]
    #[validate(range(max = 100))]
    pub grills: u32,
    #[validate(length(max = 120))]
    pub nombre: String,
    #[validate(length(max = 40))]
    pub telefono: String,
    #[validate(length(max = 254))]
    pub email: Option<String>,
    #[serde(default)]
    pub metodo_pago: PaymentMethod,
    #[serde(default)]
    pub acepta_politicas: bool,
}
