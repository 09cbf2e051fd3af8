//! Consulta de disponibilidad por (fecha, sector)
//!
//! Una consulta fallida nunca bloquea el formulario: se resuelve con la
//! `FallbackPolicy` configurada. Cada nueva selección de fecha o sector abre una
//! generación nueva en el `AvailabilityTracker`; el resultado de una consulta
//! solo se aplica si su generación sigue vigente al terminar.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::clients::ReservasBackend;
use crate::config::VenueConfig;
use crate::dto::availability_dto::AvailabilityResponse;
use crate::models::availability::{AvailabilityKey, AvailabilitySnapshot, FallbackPolicy, SnapshotSource};
use crate::utils::errors::AppError;

/// Consulta en curso, atada a la generación en la que se abrió
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    key: AvailabilityKey,
}

impl LookupTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn key(&self) -> &AvailabilityKey {
        &self.key
    }
}

/// Snapshot vigente de una sesión más su contador de generación
#[derive(Clone, Default)]
pub struct AvailabilityTracker {
    generation: Arc<AtomicU64>,
    current: Arc<RwLock<Option<AvailabilitySnapshot>>>,
}

impl AvailabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abrir una consulta para `key`; descarta el snapshot vigente
    pub async fn begin(&self, key: AvailabilityKey) -> LookupTicket {
        let mut current = self.current.write().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *current = None;
        LookupTicket { generation, key }
    }

    /// Cambió la selección: ninguna consulta abierta antes puede aplicarse
    pub async fn invalidate(&self) {
        let mut current = self.current.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *current = None;
    }

    /// Aplicar el resultado de una consulta. Devuelve `false` si quedó obsoleta.
    pub async fn complete(&self, ticket: &LookupTicket, snapshot: AvailabilitySnapshot) -> bool {
        let mut current = self.current.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket.generation {
            return false;
        }
        *current = Some(snapshot);
        true
    }

    pub async fn current(&self) -> Option<AvailabilitySnapshot> {
        self.current.read().await.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Resultado de refrescar la disponibilidad de una sesión
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied(AvailabilitySnapshot),
    /// Una selección más nueva se abrió mientras esta consulta estaba en vuelo
    Superseded,
}

#[derive(Clone)]
pub struct AvailabilityService {
    backend: Arc<dyn ReservasBackend>,
    venue: Arc<VenueConfig>,
}

impl AvailabilityService {
    pub fn new(backend: Arc<dyn ReservasBackend>, venue: Arc<VenueConfig>) -> Self {
        Self { backend, venue }
    }

    /// Consultar el cupo; nunca falla
    pub async fn lookup(&self, key: &AvailabilityKey) -> AvailabilitySnapshot {
        match self.backend.fetch_availability(key).await {
            Ok(response) => self.snapshot_from_response(key, response),
            Err(e) => self.fallback_snapshot(key, &e),
        }
    }

    /// Consultar y aplicar al tracker si la selección sigue vigente
    pub async fn refresh(&self, tracker: &AvailabilityTracker, key: AvailabilityKey) -> RefreshOutcome {
        let ticket = tracker.begin(key).await;
        let snapshot = self.lookup(ticket.key()).await;

        if tracker.complete(&ticket, snapshot.clone()).await {
            RefreshOutcome::Applied(snapshot)
        } else {
            debug!(
                "⏭️ Disponibilidad {} descartada (generación {} superada)",
                ticket.key(),
                ticket.generation()
            );
            RefreshOutcome::Superseded
        }
    }

    fn snapshot_from_response(
        &self,
        key: &AvailabilityKey,
        response: AvailabilityResponse,
    ) -> AvailabilitySnapshot {
        let total = response
            .total
            .unwrap_or_else(|| self.venue.nominal_capacity(&key.sector_id));
        let reserved = response.reserved.unwrap_or(0);
        let snapshot = AvailabilitySnapshot::new(key.clone(), total, reserved, SnapshotSource::Backend);

        info!(
            "📊 Disponibilidad {}: {}/{} reservados, quedan {}",
            key, snapshot.reserved, snapshot.total, snapshot.remaining
        );
        snapshot
    }

    fn fallback_snapshot(&self, key: &AvailabilityKey, error: &AppError) -> AvailabilitySnapshot {
        let policy = self.venue.availability_fallback;
        let nominal = self.venue.nominal_capacity(&key.sector_id);
        let snapshot = policy.snapshot(key.clone(), nominal);

        match policy {
            FallbackPolicy::Optimistic => warn!(
                "⚠️ Disponibilidad {} no disponible ({}), se asume cupo completo: {}",
                key, error, snapshot.remaining
            ),
            FallbackPolicy::FailClosed => warn!(
                "⚠️ Disponibilidad {} no disponible ({}), se informa sin cupo",
                key, error
            ),
        }
        snapshot
    }
}
