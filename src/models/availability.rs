//! Modelos de disponibilidad
//!
//! Cupo de asadores de un sector para un día dado, tal como lo informa el
//! backend de reservas o como lo supone la política de fallback.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identidad de una consulta de disponibilidad: (fecha, sector)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailabilityKey {
    pub date: NaiveDate,
    pub sector_id: String,
}

impl AvailabilityKey {
    pub fn new(date: NaiveDate, sector_id: impl Into<String>) -> Self {
        Self {
            date,
            sector_id: sector_id.into(),
        }
    }
}

impl fmt::Display for AvailabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.date.format("%Y-%m-%d"), self.sector_id)
    }
}

/// Origen de un snapshot de disponibilidad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    Backend,
    Fallback,
}

/// Cupo de un sector para una fecha
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySnapshot {
    pub key: AvailabilityKey,
    pub total: u32,
    pub reserved: u32,
    /// `total - reserved`, nunca negativo
    pub remaining: u32,
    pub source: SnapshotSource,
}

impl AvailabilitySnapshot {
    pub fn new(key: AvailabilityKey, total: u32, reserved: u32, source: SnapshotSource) -> Self {
        Self {
            key,
            total,
            reserved,
            remaining: total.saturating_sub(reserved),
            source,
        }
    }

    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }
}

/// Qué suponer cuando la consulta de disponibilidad falla.
///
/// `Optimistic` confía en que hay cupo completo: el formulario nunca queda
/// bloqueado, pero ante una caída prolongada del backend se puede sobrevender.
/// `FailClosed` informa el sector como lleno hasta que el backend responda.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    #[default]
    Optimistic,
    FailClosed,
}

impl FallbackPolicy {
    /// Snapshot a usar en lugar de una respuesta del backend
    pub fn snapshot(&self, key: AvailabilityKey, nominal_capacity: u32) -> AvailabilitySnapshot {
        let reserved = match self {
            FallbackPolicy::Optimistic => 0,
            FallbackPolicy::FailClosed => nominal_capacity,
        };
        AvailabilitySnapshot::new(key, nominal_capacity, reserved, SnapshotSource::Fallback)
    }
}
