use chrono::NaiveDate;
use tracing::info;
use validator::Validate;

use crate::dto::availability_dto::AvailabilityQuery;
use crate::dto::booking_dto::{QuoteRequest, QuoteResponse, VenueInfoResponse};
use crate::dto::reserva_dto::CreateReservaRequest;
use crate::models::availability::{AvailabilityKey, AvailabilitySnapshot};
use crate::models::reservation::ReservationForm;
use crate::services::{BookingSession, PricingService, RefreshOutcome, SubmissionOutcome};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};
use crate::utils::validation::{min_reservation_date, validate_date};

pub struct BookingController {
    state: AppState,
}

impl BookingController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn venue_info(&self) -> VenueInfoResponse {
        VenueInfoResponse::from_venue(&self.state.venue, min_reservation_date())
    }

    pub async fn availability(&self, query: AvailabilityQuery) -> AppResult<AvailabilitySnapshot> {
        let key = self.parse_key(&query.date, &query.sector)?;
        Ok(self.state.availability.lookup(&key).await)
    }

    pub async fn quote(&self, request: QuoteRequest) -> AppResult<QuoteResponse> {
        request.validate()?;

        let availability = match (request.fecha.as_deref(), request.sector_id.as_deref()) {
            (Some(fecha), Some(sector)) => {
                let key = self.parse_key(fecha, sector)?;
                Some(self.state.availability.lookup(&key).await)
            }
            _ => None,
        };
        let date = request.fecha.as_deref().map(parse_date).transpose()?;

        let form = ReservationForm {
            persons: request.personas,
            vehicles: request.vehiculos,
            grills: request.grills,
            ..ReservationForm::default()
        };

        let limits = self.state.validator.limits(&form, availability.as_ref());
        let cancellation = date.and_then(|date| {
            PricingService::cancellation_terms(&self.state.venue.cancellation, date, limits.total)
        });

        Ok(QuoteResponse {
            limits,
            persons_hint: self.state.validator.persons_hint(&form),
            availability,
            cancellation,
        })
    }

    /// Corre una sesión de reserva completa: disponibilidad fresca, validación y envío
    pub async fn create_reserva(&self, request: CreateReservaRequest) -> AppResult<SubmissionOutcome> {
        request.validate()?;
        let date = parse_date(&request.fecha)?;

        let mut session = BookingSession::new(self.state.venue.clone());
        session
            .fill(ReservationForm {
                date: Some(date),
                sector_id: Some(request.sector_id),
                persons: request.personas,
                vehicles: request.vehiculos,
                grills: request.grills,
                nombre: request.nombre,
                telefono: request.telefono,
                email: request.email,
                payment: request.metodo_pago,
                accepts_policies: request.acepta_politicas,
            })
            .await?;

        if let Some(RefreshOutcome::Applied(snapshot)) =
            session.refresh_availability(&self.state.availability).await
        {
            info!(
                "🧾 Sesión {}: {} con {} asador(es) libres",
                session.id(),
                snapshot.key,
                snapshot.remaining
            );
        }

        session.submit(&*self.state.backend).await
    }

    fn parse_key(&self, fecha: &str, sector: &str) -> AppResult<AvailabilityKey> {
        let date = parse_date(fecha)?;
        if self.state.venue.sector(sector).is_none() {
            return Err(not_found_error("Sector", sector));
        }
        Ok(AvailabilityKey::new(date, sector))
    }
}

fn parse_date(fecha: &str) -> AppResult<NaiveDate> {
    validate_date(fecha).map_err(|_| bad_request_error("Fecha inválida, usá el formato YYYY-MM-DD"))
}
