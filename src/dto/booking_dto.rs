use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::{ContactInfo, VenueConfig};
use crate::models::availability::AvailabilitySnapshot;
use crate::models::sector::Sector;
use crate::services::pricing_service::CancellationTerms;
use crate::services::reservation_validator::ReservationLimits;

// Request para cotizar una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequest {
    #[validate(range(max = 100))]
    pub vehiculos: u32,
    #[serde(default)]
    pub personas: u32,
    #[serde(default)]
    pub grills: u32,
    pub fecha: Option<String>,
    pub sector_id: Option<String>,
}

// Response de cotización
#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub limits: ReservationLimits,
    pub persons_hint: Option<String>,
    pub availability: Option<AvailabilitySnapshot>,
    /// Solo cuando se cotiza con fecha
    pub cancellation: Option<CancellationTerms>,
}

// Datos públicos del parador para armar el formulario
#[derive(Debug, Serialize, Deserialize)]
pub struct VenueInfoResponse {
    pub name: String,
    pub sectors: Vec<Sector>,
    pub price_per_vehicle: u64,
    pub persons_per_vehicle: u32,
    pub contact: ContactInfo,
    pub opening_hours: String,
    pub location: String,
    pub cancellation_policy: String,
    pub min_date: NaiveDate,
}

impl VenueInfoResponse {
    pub fn from_venue(venue: &VenueConfig, min_date: NaiveDate) -> Self {
        Self {
            name: venue.name.clone(),
            sectors: venue.sectors.clone(),
            price_per_vehicle: venue.price_per_vehicle,
            persons_per_vehicle: venue.persons_per_vehicle,
            contact: venue.contact.clone(),
            opening_hours: venue.opening_hours.clone(),
            location: venue.location.clone(),
            cancellation_policy: venue.cancellation.text.clone(),
            min_date,
        }
    }
}
