//! Backend de reservas en memoria para los tests de servicios

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::ReservasBackend;
use crate::dto::availability_dto::AvailabilityResponse;
use crate::dto::reserva_dto::{ReservaPayload, ReservaResponse};
use crate::models::availability::AvailabilityKey;
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
pub(crate) struct FakeBackend {
    availability: HashMap<String, Result<AvailabilityResponse, u16>>,
    availability_gates: HashMap<String, Arc<Notify>>,
    pub lookup_started: Arc<Notify>,
    submit_result: Option<Result<ReservaResponse, u16>>,
    submit_gate: Option<Arc<Notify>>,
    pub submit_started: Arc<Notify>,
    submitted: Mutex<Vec<ReservaPayload>>,
    lookups: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_availability(mut self, sector: &str, response: AvailabilityResponse) -> Self {
        self.availability.insert(sector.to_string(), Ok(response));
        self
    }

    pub fn with_failing_availability(mut self, sector: &str, status: u16) -> Self {
        self.availability.insert(sector.to_string(), Err(status));
        self
    }

    /// La consulta de `sector` queda esperando hasta que se notifique el gate
    pub fn gate_availability(&mut self, sector: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.availability_gates.insert(sector.to_string(), gate.clone());
        gate
    }

    pub fn with_submit_response(mut self, response: ReservaResponse) -> Self {
        self.submit_result = Some(Ok(response));
        self
    }

    pub fn with_failing_submit(mut self, status: u16) -> Self {
        self.submit_result = Some(Err(status));
        self
    }

    pub fn gate_submit(&mut self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.submit_gate = Some(gate.clone());
        gate
    }

    pub fn submitted(&self) -> Vec<ReservaPayload> {
        self.submitted.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReservasBackend for FakeBackend {
    async fn fetch_availability(&self, key: &AvailabilityKey) -> AppResult<AvailabilityResponse> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.lookup_started.notify_one();
        if let Some(gate) = self.availability_gates.get(&key.sector_id) {
            gate.notified().await;
        }

        match self.availability.get(&key.sector_id) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(status)) => Err(AppError::UpstreamStatus(*status)),
            None => Ok(AvailabilityResponse::default()),
        }
    }

    async fn submit_reserva(&self, payload: &ReservaPayload) -> AppResult<ReservaResponse> {
        self.submit_started.notify_one();
        if let Some(gate) = &self.submit_gate {
            gate.notified().await;
        }
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(payload.clone());
        }

        match &self.submit_result {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(status)) => Err(AppError::UpstreamStatus(*status)),
            None => Ok(ReservaResponse::default()),
        }
    }
}
