//! Sesión de reserva de un visitante
//!
//! Dueña del estado del formulario. Recalcula los valores derivados, refresca
//! la disponibilidad cuando cambia (fecha, sector) y envía la reserva con un
//! único envío en vuelo a la vez.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::ReservasBackend;
use crate::config::VenueConfig;
use crate::dto::reserva_dto::ReservaPayload;
use crate::models::availability::AvailabilitySnapshot;
use crate::models::reservation::{PaymentMethod, ReservationForm};
use crate::services::availability_service::{AvailabilityService, AvailabilityTracker, RefreshOutcome};
use crate::services::reservation_validator::{ReservationLimits, ReservationValidator};
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};
use crate::utils::validation::{min_reservation_date, normalize_optional};

/// Resultado de un envío aceptado por el backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub message: String,
    /// Checkout online: el navegador debe redirigir a este link
    pub payment_link: Option<String>,
}

impl SubmissionOutcome {
    pub fn redirect_to(&self) -> Option<&str> {
        self.payment_link.as_deref()
    }
}

/// Bloqueo de envío; se libera al salir de scope, haya éxito o error
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct BookingSession {
    id: Uuid,
    venue: Arc<VenueConfig>,
    validator: ReservationValidator,
    form: ReservationForm,
    availability: AvailabilityTracker,
    /// Cantidades cargadas con `fill`: se validan tal como llegaron
    keep_counts: bool,
    submitting: AtomicBool,
}

impl BookingSession {
    pub fn new(venue: Arc<VenueConfig>) -> Self {
        Self {
            id: Uuid::new_v4(),
            validator: ReservationValidator::new(venue.clone()),
            venue,
            form: ReservationForm::default(),
            availability: AvailabilityTracker::new(),
            keep_counts: false,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &ReservationForm {
        &self.form
    }

    /// Elegir fecha. No se aceptan fechas anteriores a hoy.
    pub async fn set_date(&mut self, date: NaiveDate) -> AppResult<()> {
        if date < min_reservation_date() {
            return Err(bad_request_error("Elegí una fecha desde hoy en adelante"));
        }
        if self.form.date != Some(date) {
            self.form.date = Some(date);
            self.availability.invalidate().await;
        }
        Ok(())
    }

    pub async fn set_sector(&mut self, sector_id: &str) -> AppResult<()> {
        if self.venue.sector(sector_id).is_none() {
            return Err(not_found_error("Sector", sector_id));
        }
        if self.form.sector_id.as_deref() != Some(sector_id) {
            self.form.sector_id = Some(sector_id.to_string());
            self.availability.invalidate().await;
        }
        Ok(())
    }

    /// Cargar un formulario completo tal como llegó, sin recortar cantidades.
    /// Fecha y sector pasan por las mismas reglas que `set_date` y `set_sector`;
    /// los refrescos posteriores de disponibilidad tampoco recortan asadores.
    pub async fn fill(&mut self, form: ReservationForm) -> AppResult<()> {
        if let Some(date) = form.date {
            self.set_date(date).await?;
        }
        if let Some(sector_id) = form.sector_id.as_deref() {
            self.set_sector(sector_id).await?;
        }

        self.form.persons = form.persons;
        self.form.vehicles = form.vehicles;
        self.form.grills = form.grills;
        self.set_contact(&form.nombre, &form.telefono, form.email);
        self.form.payment = form.payment;
        self.form.accepts_policies = form.accepts_policies;
        self.keep_counts = true;
        Ok(())
    }

    pub async fn set_vehicles(&mut self, vehicles: u32) {
        self.keep_counts = false;
        self.form.vehicles = vehicles.max(1);
        self.clamp_grills().await;
    }

    /// Las personas de más no se recortan: quedan marcadas con `persons_hint`
    pub fn set_persons(&mut self, persons: u32) {
        self.form.persons = persons.max(1);
    }

    pub async fn set_grills(&mut self, grills: u32) {
        self.keep_counts = false;
        self.form.grills = grills;
        self.clamp_grills().await;
    }

    pub fn set_contact(&mut self, nombre: &str, telefono: &str, email: Option<String>) {
        self.form.nombre = nombre.trim().to_string();
        self.form.telefono = telefono.trim().to_string();
        self.form.email = normalize_optional(email);
    }

    pub fn set_payment(&mut self, payment: PaymentMethod) {
        self.form.payment = payment;
    }

    pub fn accept_policies(&mut self, accepted: bool) {
        self.form.accepts_policies = accepted;
    }

    pub async fn availability(&self) -> Option<AvailabilitySnapshot> {
        self.availability.current().await
    }

    pub async fn limits(&self) -> ReservationLimits {
        let snapshot = self.availability.current().await;
        self.validator.limits(&self.form, snapshot.as_ref())
    }

    pub fn persons_hint(&self) -> Option<String> {
        self.validator.persons_hint(&self.form)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Refrescar la disponibilidad de la selección actual.
    /// Devuelve `None` mientras falte la fecha o el sector.
    pub async fn refresh_availability(&mut self, service: &AvailabilityService) -> Option<RefreshOutcome> {
        let Some(key) = self.form.availability_key() else {
            self.availability.invalidate().await;
            return None;
        };

        let outcome = service.refresh(&self.availability, key).await;
        if matches!(outcome, RefreshOutcome::Applied(_)) && !self.keep_counts {
            self.clamp_grills().await;
        }
        Some(outcome)
    }

    /// Validar y enviar la reserva.
    ///
    /// Los errores de validación no llegan a la red. Mientras un envío está en
    /// vuelo, cualquier otro envío de la misma sesión falla con
    /// `AppError::SubmissionInProgress`.
    pub async fn submit(&self, backend: &dyn ReservasBackend) -> AppResult<SubmissionOutcome> {
        let snapshot = self.availability.current().await;
        let request = self.validator.validate(&self.form, snapshot.as_ref())?;

        let _guard = SubmitGuard::acquire(&self.submitting).ok_or(AppError::SubmissionInProgress)?;
        info!("🧾 Sesión {}: enviando reserva por ${}", self.id, request.total());

        let payload = ReservaPayload::from(&request);
        let response = backend.submit_reserva(&payload).await.map_err(|e| {
            warn!("❌ Sesión {}: envío fallido: {}", self.id, e);
            e
        })?;

        let message = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| request.payment().default_success_message().to_string());
        let payment_link = response.payment_link.filter(|l| !l.trim().is_empty());

        Ok(SubmissionOutcome {
            message,
            payment_link,
        })
    }

    async fn clamp_grills(&mut self) {
        let max = self.limits().await.max_grills_by_availability.max(1);
        self.form.grills = self.form.grills.clamp(1, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::fake_backend::FakeBackend;
    use crate::dto::availability_dto::AvailabilityResponse;
    use crate::dto::reserva_dto::ReservaResponse;
    use crate::services::reservation_validator::ReservationRejection;
    use crate::utils::errors::SUBMIT_FAILED_MESSAGE;
    use chrono::{Days, NaiveDate};

    fn future_date() -> NaiveDate {
        min_reservation_date() + Days::new(7)
    }

    fn venue() -> Arc<VenueConfig> {
        Arc::new(VenueConfig::default())
    }

    async fn ready_session(
        backend: &Arc<FakeBackend>,
        vehicles: u32,
        persons: u32,
        grills: u32,
    ) -> BookingSession {
        let venue = venue();
        let service = AvailabilityService::new(backend.clone(), venue.clone());
        let mut session = BookingSession::new(venue);

        session.set_date(future_date()).await.unwrap();
        session.set_sector("rio").await.unwrap();
        session.refresh_availability(&service).await;
        session.set_vehicles(vehicles).await;
        session.set_persons(persons);
        session.set_grills(grills).await;
        session.set_contact("Martín Gómez", "+54 9 3512756126", Some("".to_string()));
        session.accept_policies(true);
        session
    }

    #[tokio::test]
    async fn test_rejects_past_dates_and_unknown_sectors() {
        let mut session = BookingSession::new(venue());
        let yesterday = min_reservation_date() - Days::new(1);

        assert!(matches!(session.set_date(yesterday).await, Err(AppError::BadRequest(_))));
        assert!(matches!(session.set_sector("lago").await, Err(AppError::NotFound(_))));
        assert!(session.form().availability_key().is_none());
    }

    #[tokio::test]
    async fn test_changing_key_invalidates_availability() {
        let backend = Arc::new(FakeBackend::new());
        let mut session = ready_session(&backend, 1, 2, 1).await;
        assert!(session.availability().await.is_some());

        session.set_sector("sombra").await.unwrap();
        assert!(session.availability().await.is_none());

        // Reelegir el mismo sector no invalida
        let service = AvailabilityService::new(backend.clone(), venue());
        session.refresh_availability(&service).await;
        session.set_sector("sombra").await.unwrap();
        assert!(session.availability().await.is_some());
    }

    #[tokio::test]
    async fn test_grills_are_clamped_to_availability() {
        let backend = Arc::new(
            FakeBackend::new()
                .with_availability("rio", AvailabilityResponse { total: Some(10), reserved: Some(9) }),
        );
        let mut session = ready_session(&backend, 3, 6, 2).await;

        let limits = session.limits().await;
        assert_eq!(limits.max_grills_by_vehicles, 2);
        assert_eq!(limits.max_grills_by_availability, 1);
        assert_eq!(session.form().grills, 1);

        session.set_grills(0).await;
        assert_eq!(session.form().grills, 1);

        session.set_vehicles(0).await;
        assert_eq!(session.form().vehicles, 1);
    }

    #[tokio::test]
    async fn test_submit_cash_reservation() {
        let backend = Arc::new(FakeBackend::new());
        let session = ready_session(&backend, 2, 10, 2).await;

        let outcome = session.submit(&*backend).await.unwrap();
        assert_eq!(outcome.message, "Reserva tomada. Te confirmamos por WhatsApp y email.");
        assert!(outcome.redirect_to().is_none());

        let submitted = backend.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].monto_total, 24_000);
        assert_eq!(submitted[0].grills_reservados, 2);
        assert_eq!(submitted[0].email, "");
        assert_eq!(submitted[0].metodo_pago, PaymentMethod::EfectivoTransferencia);
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_online_payment_redirects() {
        let backend = Arc::new(FakeBackend::new().with_submit_response(ReservaResponse {
            message: None,
            payment_link: Some("https://mpago.la/2xYz".to_string()),
        }));
        let mut session = ready_session(&backend, 1, 4, 1).await;
        session.set_payment(PaymentMethod::MercadoPago);

        let outcome = session.submit(&*backend).await.unwrap();
        assert_eq!(outcome.message, "Reserva preconfirmada. Te enviamos el link de pago.");
        assert_eq!(outcome.redirect_to(), Some("https://mpago.la/2xYz"));
        assert_eq!(backend.submitted()[0].metodo_pago, PaymentMethod::MercadoPago);
    }

    #[tokio::test]
    async fn test_backend_message_takes_precedence() {
        let backend = Arc::new(FakeBackend::new().with_submit_response(ReservaResponse {
            message: Some("¡Te esperamos!".to_string()),
            payment_link: None,
        }));
        let session = ready_session(&backend, 1, 1, 1).await;

        let outcome = session.submit(&*backend).await.unwrap();
        assert_eq!(outcome.message, "¡Te esperamos!");
    }

    #[tokio::test]
    async fn test_validation_errors_never_reach_backend() {
        let backend = Arc::new(FakeBackend::new());
        let session = ready_session(&backend, 2, 11, 1).await;
        assert!(session.persons_hint().is_some());

        let result = session.submit(&*backend).await;
        assert!(matches!(
            result,
            Err(AppError::Rejected(ReservationRejection::TooManyPersons { max_persons: 10 }))
        ));
        assert!(backend.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_availability_is_rejected() {
        let backend = Arc::new(FakeBackend::new());
        let mut session = BookingSession::new(venue());
        session.set_date(future_date()).await.unwrap();
        session.set_contact("Martín", "3512756126", None);
        session.accept_policies(true);

        let result = session.submit(&*backend).await;
        assert!(matches!(
            result,
            Err(AppError::Rejected(ReservationRejection::AvailabilityUnknown))
        ));
    }

    #[tokio::test]
    async fn test_lock_released_after_failure() {
        let backend = Arc::new(FakeBackend::new().with_failing_submit(500));
        let session = ready_session(&backend, 1, 2, 1).await;

        let error = session.submit(&*backend).await.unwrap_err();
        assert!(matches!(error, AppError::UpstreamStatus(500)));
        assert_eq!(error.user_message(), SUBMIT_FAILED_MESSAGE);
        assert!(!session.is_submitting());

        // El formulario sigue usable: se puede reintentar
        assert!(session.submit(&*backend).await.is_err());
        assert_eq!(backend.submitted().len(), 2);
    }

    #[tokio::test]
    async fn test_fill_keeps_submitted_counts() {
        let backend = Arc::new(FakeBackend::new());
        let service = AvailabilityService::new(backend.clone(), venue());
        let mut session = BookingSession::new(venue());

        session
            .fill(ReservationForm {
                date: Some(future_date()),
                sector_id: Some("sombra".to_string()),
                persons: 3,
                vehicles: 1,
                grills: 2,
                nombre: " Carla ".to_string(),
                telefono: "3512756126".to_string(),
                email: Some("carla@mail.com".to_string()),
                payment: PaymentMethod::MercadoPago,
                accepts_policies: true,
            })
            .await
            .unwrap();
        session.refresh_availability(&service).await;

        // Sin recorte: el exceso de asadores lo informa la validación
        assert_eq!(session.form().grills, 2);
        assert_eq!(session.form().nombre, "Carla");
        let result = session.submit(&*backend).await;
        assert!(matches!(
            result,
            Err(AppError::Rejected(ReservationRejection::TooManyGrillsForVehicles { vehicles: 1, max_grills: 1 }))
        ));
    }

    #[tokio::test]
    async fn test_fill_keeps_grills_outside_availability() {
        let backend = Arc::new(
            FakeBackend::new()
                .with_availability("rio", AvailabilityResponse { total: Some(10), reserved: Some(9) }),
        );
        let service = AvailabilityService::new(backend.clone(), venue());

        for (grills, expected) in [
            (0, ReservationRejection::NoGrills),
            (2, ReservationRejection::NotEnoughGrillsLeft { remaining: 1 }),
        ] {
            let mut session = BookingSession::new(venue());
            session
                .fill(ReservationForm {
                    date: Some(future_date()),
                    sector_id: Some("rio".to_string()),
                    persons: 4,
                    vehicles: 2,
                    grills,
                    nombre: "Carla".to_string(),
                    telefono: "3512756126".to_string(),
                    email: None,
                    payment: PaymentMethod::EfectivoTransferencia,
                    accepts_policies: true,
                })
                .await
                .unwrap();
            session.refresh_availability(&service).await;
            assert_eq!(session.form().grills, grills);

            let result = session.submit(&*backend).await;
            assert!(matches!(result, Err(AppError::Rejected(reason)) if reason == expected));
        }
        assert!(backend.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_clamps_interactive_grills() {
        let backend = Arc::new(
            FakeBackend::new()
                .with_availability("sombra", AvailabilityResponse { total: Some(10), reserved: Some(9) }),
        );
        let service = AvailabilityService::new(backend.clone(), venue());
        let mut session = ready_session(&backend, 2, 4, 2).await;
        assert_eq!(session.form().grills, 2);

        session.set_sector("sombra").await.unwrap();
        session.refresh_availability(&service).await;
        assert_eq!(session.form().grills, 1);
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_refused() {
        let mut backend = FakeBackend::new();
        let gate = backend.gate_submit();
        let backend = Arc::new(backend);
        let session = ready_session(&backend, 1, 2, 1).await;

        let first = session.submit(&*backend);
        let second = async {
            backend.submit_started.notified().await;
            assert!(session.is_submitting());
            let result = session.submit(&*backend).await;
            gate.notify_one();
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok());
        assert!(matches!(second, Err(AppError::SubmissionInProgress)));
        assert!(!session.is_submitting());
        assert_eq!(backend.submitted().len(), 1);
    }
}
