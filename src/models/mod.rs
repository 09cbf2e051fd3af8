//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio del parador: sectores,
//! disponibilidad y reservas.

pub mod availability;
pub mod reservation;
pub mod sector;

pub use availability::{AvailabilityKey, AvailabilitySnapshot, FallbackPolicy, SnapshotSource};
pub use reservation::{CancellationPolicy, PaymentMethod, ReservationForm, ReservationRequest};
pub use sector::Sector;
