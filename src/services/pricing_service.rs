//! Cálculo de precios y devoluciones
//!
//! El precio depende solo de la cantidad de vehículos: no cambia con la
//! cantidad de personas ni de asadores.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::VenueConfig;
use crate::models::reservation::CancellationPolicy;

pub struct PricingService;

/// Devoluciones de una reserva según el momento de la cancelación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationTerms {
    /// Última hora con devolución total
    pub deadline: NaiveDateTime,
    pub refund_until_deadline: u64,
    pub refund_after_deadline: u64,
}

impl PricingService {
    /// Total a pagar: vehículos × precio por vehículo
    pub fn total(venue: &VenueConfig, vehicles: u32) -> u64 {
        u64::from(vehicles).saturating_mul(venue.price_per_vehicle)
    }

    /// Monto a devolver al cancelar una reserva ya pagada.
    ///
    /// Hasta la hora límite del día reservado (inclusive) se devuelve el total;
    /// después se retiene el cargo fijo de la política.
    pub fn refund(
        policy: &CancellationPolicy,
        reserved_date: NaiveDate,
        paid: u64,
        cancelled_at: NaiveDateTime,
    ) -> u64 {
        let late = paid.saturating_sub(policy.late_fee);
        let Some(deadline) = reserved_date.and_hms_opt(policy.deadline_hour, 0, 0) else {
            return late;
        };

        if cancelled_at <= deadline {
            paid
        } else {
            late
        }
    }

    /// Condiciones de cancelación para una reserva de `reserved_date` por `paid`.
    /// `None` si la hora límite configurada no es válida.
    pub fn cancellation_terms(
        policy: &CancellationPolicy,
        reserved_date: NaiveDate,
        paid: u64,
    ) -> Option<CancellationTerms> {
        let deadline = reserved_date.and_hms_opt(policy.deadline_hour, 0, 0)?;
        Some(CancellationTerms {
            deadline,
            refund_until_deadline: Self::refund(policy, reserved_date, paid, deadline),
            refund_after_deadline: Self::refund(
                policy,
                reserved_date,
                paid,
                deadline + Duration::minutes(1),
            ),
        })
    }
}
