//! Modelos de reserva
//!
//! `ReservationForm` es lo que el visitante va completando; `ReservationRequest`
//! es la reserva ya validada, lista para enviar al backend. Esta última solo la
//! construye el validador y no se puede modificar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::availability::AvailabilityKey;

/// Método de pago elegido por el visitante
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pago total online con link de Mercado Pago
    MercadoPago,
    /// Efectivo al llegar o transferencia
    #[default]
    EfectivoTransferencia,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::MercadoPago => "mercado_pago",
            PaymentMethod::EfectivoTransferencia => "efectivo_transferencia",
        }
    }

    /// Mensaje de confirmación cuando el backend no envía uno propio
    pub fn default_success_message(&self) -> &'static str {
        match self {
            PaymentMethod::MercadoPago => "Reserva preconfirmada. Te enviamos el link de pago.",
            PaymentMethod::EfectivoTransferencia => {
                "Reserva tomada. Te confirmamos por WhatsApp y email."
            }
        }
    }
}

/// Política de cancelación publicada
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancellationPolicy {
    pub text: String,
    /// Hora del día reservado hasta la cual se devuelve el total
    pub deadline_hour: u32,
    /// Monto retenido al cancelar después de la hora límite
    pub late_fee: u64,
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self {
            text: "Hasta las 10:00 AM del día reservado devolución total. Luego, se retienen $2.000."
                .to_string(),
            deadline_hour: 10,
            late_fee: 2_000,
        }
    }
}

/// Estado del formulario de una sesión de reserva
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationForm {
    pub date: Option<NaiveDate>,
    pub sector_id: Option<String>,
    pub persons: u32,
    pub vehicles: u32,
    pub grills: u32,
    pub nombre: String,
    pub telefono: String,
    pub email: Option<String>,
    pub payment: PaymentMethod,
    pub accepts_policies: bool,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            date: None,
            sector_id: None,
            persons: 1,
            vehicles: 1,
            grills: 1,
            nombre: String::new(),
            telefono: String::new(),
            email: None,
            payment: PaymentMethod::default(),
            accepts_policies: false,
        }
    }
}

impl ReservationForm {
    /// Clave de disponibilidad, solo cuando fecha y sector están elegidos
    pub fn availability_key(&self) -> Option<AvailabilityKey> {
        match (self.date, self.sector_id.as_deref()) {
            (Some(date), Some(sector)) => Some(AvailabilityKey::new(date, sector)),
            _ => None,
        }
    }
}

/// Reserva validada, inmutable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    pub(crate) date: NaiveDate,
    pub(crate) sector_id: String,
    pub(crate) grills: u32,
    pub(crate) persons: u32,
    pub(crate) vehicles: u32,
    pub(crate) nombre: String,
    pub(crate) telefono: String,
    pub(crate) email: Option<String>,
    pub(crate) payment: PaymentMethod,
    pub(crate) total: u64,
    pub(crate) cancellation_policy: String,
}

impl ReservationRequest {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sector_id(&self) -> &str {
        &self.sector_id
    }

    pub fn grills(&self) -> u32 {
        self.grills
    }

    pub fn persons(&self) -> u32 {
        self.persons
    }

    pub fn vehicles(&self) -> u32 {
        self.vehicles
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn telefono(&self) -> &str {
        &self.telefono
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn cancellation_policy(&self) -> &str {
        &self.cancellation_policy
    }
}
