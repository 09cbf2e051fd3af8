//! Services module
//!
//! Este módulo contiene la lógica de negocio de las reservas: validación
//! contra el cupo, precios, consulta de disponibilidad y la sesión de reserva
//! que las orquesta.

pub mod availability_service;
pub mod booking_session;
pub mod pricing_service;
pub mod reservation_validator;

pub use availability_service::{AvailabilityService, AvailabilityTracker, RefreshOutcome};
pub use booking_session::{BookingSession, SubmissionOutcome};
pub use pricing_service::{CancellationTerms, PricingService};
pub use reservation_validator::{ReservationLimits, ReservationRejection, ReservationValidator};
