//! Validación de reservas contra el cupo disponible
//!
//! Decide si una reserva es admisible (personas por vehículo, asadores por
//! vehículo, asadores por cupo restante) y arma la `ReservationRequest` lista
//! para enviar. Los chequeos corren en orden y se corta en el primero que falla.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::VenueConfig;
use crate::models::availability::AvailabilitySnapshot;
use crate::models::reservation::{ReservationForm, ReservationRequest};
use crate::services::pricing_service::PricingService;
use crate::utils::validation::{validate_email, validate_not_empty, validate_phone};

/// Motivo por el cual una reserva no es admisible
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationRejection {
    #[error("Ajustá personas o aumentá vehículos (máximo {max_persons} personas)")]
    TooManyPersons { max_persons: u32 },

    #[error("Seleccioná fecha y sector para validar cupos")]
    AvailabilityUnknown,

    #[error("Sin cupo disponible en ese sector para esa fecha")]
    NoCapacity,

    #[error("Elegí al menos 1 asador")]
    NoGrills,

    #[error("Con {vehicles} vehículo(s) podés reservar hasta {max_grills} asador(es).")]
    TooManyGrillsForVehicles { vehicles: u32, max_grills: u32 },

    #[error("Quedan {remaining} asador(es) disponibles en este sector para esa fecha.")]
    NotEnoughGrillsLeft { remaining: u32 },

    #[error("Completá tu nombre y apellido")]
    MissingName,

    #[error("Ingresá un teléfono válido")]
    InvalidPhone,

    #[error("Ingresá un email válido")]
    InvalidEmail,

    #[error("Aceptá la política de cancelación para continuar")]
    PoliciesNotAccepted,
}

impl ReservationRejection {
    pub fn code(&self) -> &'static str {
        match self {
            ReservationRejection::TooManyPersons { .. } => "TOO_MANY_PERSONS",
            ReservationRejection::AvailabilityUnknown => "AVAILABILITY_UNKNOWN",
            ReservationRejection::NoCapacity => "NO_CAPACITY",
            ReservationRejection::NoGrills => "NO_GRILLS",
            ReservationRejection::TooManyGrillsForVehicles { .. } => "TOO_MANY_GRILLS_FOR_VEHICLES",
            ReservationRejection::NotEnoughGrillsLeft { .. } => "NOT_ENOUGH_GRILLS_LEFT",
            ReservationRejection::MissingName => "MISSING_NAME",
            ReservationRejection::InvalidPhone => "INVALID_PHONE",
            ReservationRejection::InvalidEmail => "INVALID_EMAIL",
            ReservationRejection::PoliciesNotAccepted => "POLICIES_NOT_ACCEPTED",
        }
    }
}

/// Valores derivados del formulario, se recalculan con cada cambio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationLimits {
    pub max_persons: u32,
    pub max_grills_by_vehicles: u32,
    pub max_grills_by_availability: u32,
    pub total: u64,
}

impl ReservationLimits {
    pub fn compute(
        venue: &VenueConfig,
        vehicles: u32,
        availability: Option<&AvailabilitySnapshot>,
    ) -> Self {
        let max_grills_by_vehicles = max_grills_by_vehicles(vehicles);
        let max_grills_by_availability = match availability {
            Some(snapshot) => max_grills_by_vehicles.min(snapshot.remaining),
            None => max_grills_by_vehicles,
        };

        Self {
            max_persons: max_persons(venue, vehicles),
            max_grills_by_vehicles,
            max_grills_by_availability,
            total: PricingService::total(venue, vehicles),
        }
    }
}

/// Un asador por vehículo, hasta dos con dos o más vehículos
pub fn max_grills_by_vehicles(vehicles: u32) -> u32 {
    if vehicles >= 2 {
        2
    } else {
        1
    }
}

pub fn max_persons(venue: &VenueConfig, vehicles: u32) -> u32 {
    vehicles.max(1).saturating_mul(venue.persons_per_vehicle)
}

#[derive(Clone)]
pub struct ReservationValidator {
    venue: Arc<VenueConfig>,
}

impl ReservationValidator {
    pub fn new(venue: Arc<VenueConfig>) -> Self {
        Self { venue }
    }

    pub fn limits(
        &self,
        form: &ReservationForm,
        availability: Option<&AvailabilitySnapshot>,
    ) -> ReservationLimits {
        ReservationLimits::compute(&self.venue, form.vehicles, availability)
    }

    /// Aviso para el campo personas cuando supera el máximo permitido
    pub fn persons_hint(&self, form: &ReservationForm) -> Option<String> {
        let max = max_persons(&self.venue, form.vehicles);
        (form.persons > max).then(|| {
            format!(
                "Supera el máximo de {} personas para {} vehículo(s).",
                max, form.vehicles
            )
        })
    }

    /// Validar el formulario contra el snapshot de disponibilidad de su (fecha, sector)
    pub fn validate(
        &self,
        form: &ReservationForm,
        availability: Option<&AvailabilitySnapshot>,
    ) -> Result<ReservationRequest, ReservationRejection> {
        let limits = self.limits(form, availability);

        if form.persons > limits.max_persons {
            return Err(ReservationRejection::TooManyPersons {
                max_persons: limits.max_persons,
            });
        }

        // Un snapshot de otra fecha o sector equivale a no saber el cupo
        let (key, snapshot) = match (form.availability_key(), availability) {
            (Some(key), Some(snapshot)) if snapshot.key == key => (key, snapshot),
            _ => return Err(ReservationRejection::AvailabilityUnknown),
        };

        if snapshot.remaining == 0 {
            return Err(ReservationRejection::NoCapacity);
        }
        if form.grills < 1 {
            return Err(ReservationRejection::NoGrills);
        }
        if form.grills > limits.max_grills_by_vehicles {
            return Err(ReservationRejection::TooManyGrillsForVehicles {
                vehicles: form.vehicles,
                max_grills: limits.max_grills_by_vehicles,
            });
        }
        if form.grills > snapshot.remaining {
            return Err(ReservationRejection::NotEnoughGrillsLeft {
                remaining: snapshot.remaining,
            });
        }

        self.validate_contact(form)?;

        Ok(ReservationRequest {
            date: key.date,
            sector_id: key.sector_id,
            grills: form.grills,
            persons: form.persons,
            vehicles: form.vehicles,
            nombre: form.nombre.trim().to_string(),
            telefono: form.telefono.trim().to_string(),
            email: form.email.clone(),
            payment: form.payment,
            total: limits.total,
            cancellation_policy: self.venue.cancellation.text.clone(),
        })
    }

    fn validate_contact(&self, form: &ReservationForm) -> Result<(), ReservationRejection> {
        validate_not_empty(&form.nombre).map_err(|_| ReservationRejection::MissingName)?;
        validate_phone(&form.telefono).map_err(|_| ReservationRejection::InvalidPhone)?;
        if let Some(email) = form.email.as_deref() {
            validate_email(email).map_err(|_| ReservationRejection::InvalidEmail)?;
        }
        if !form.accepts_policies {
            return Err(ReservationRejection::PoliciesNotAccepted);
        }
        Ok(())
    }
}
