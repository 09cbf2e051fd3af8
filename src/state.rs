//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todo lo que contiene es inmutable después
//! del arranque.

use std::sync::Arc;

use crate::clients::{ReservasBackend, ReservasHttpClient};
use crate::config::environment::EnvironmentConfig;
use crate::config::VenueConfig;
use crate::services::{AvailabilityService, ReservationValidator};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub venue: Arc<VenueConfig>,
    pub backend: Arc<dyn ReservasBackend>,
    pub availability: AvailabilityService,
    pub validator: ReservationValidator,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, venue: Arc<VenueConfig>, backend: Arc<dyn ReservasBackend>) -> Self {
        Self {
            availability: AvailabilityService::new(backend.clone(), venue.clone()),
            validator: ReservationValidator::new(venue.clone()),
            config,
            venue,
            backend,
        }
    }

    /// Estado con el cliente HTTP real apuntando a `RESERVAS_API_URL`
    pub fn from_config(config: EnvironmentConfig, venue: Arc<VenueConfig>) -> AppResult<Self> {
        let client = ReservasHttpClient::new(&config.reservas_api_url, config.http_timeout)?;
        Ok(Self::new(config, venue, Arc::new(client)))
    }
}
