//! Configuración del parador
//!
//! Precio por vehículo, sectores, datos de contacto y políticas. Se carga una
//! sola vez al iniciar el proceso y se comparte como `Arc<VenueConfig>`; no se
//! modifica después de la carga.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::models::availability::FallbackPolicy;
use crate::models::reservation::CancellationPolicy;
use crate::models::sector::Sector;
use crate::utils::errors::{AppError, AppResult};

/// Datos de contacto publicados del parador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub whatsapp: String,
    pub email: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            whatsapp: "+54 9 3512756126".to_string(),
            email: "gestiondigitalsdi@gmail.com".to_string(),
        }
    }
}

/// Configuración completa del parador
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    pub name: String,
    /// Precio por vehículo en pesos, incluye asador, mesa y parrilla
    pub price_per_vehicle: u64,
    pub persons_per_vehicle: u32,
    pub sectors: Vec<Sector>,
    /// Capacidad asumida para un sector que no figura en `sectors`
    pub default_sector_capacity: u32,
    pub contact: ContactInfo,
    pub opening_hours: String,
    pub location: String,
    pub cancellation: CancellationPolicy,
    pub availability_fallback: FallbackPolicy,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            name: "Parador La Fontana".to_string(),
            price_per_vehicle: 12_000,
            persons_per_vehicle: 5,
            sectors: vec![
                Sector::new(
                    "rio",
                    "El río",
                    "Orillas limpias y acceso directo al balneario.",
                    10,
                ),
                Sector::new(
                    "sombra",
                    "La sombra",
                    "Arboleda amplia, reparo y siesta asegurada.",
                    10,
                ),
            ],
            default_sector_capacity: 10,
            contact: ContactInfo::default(),
            opening_hours: "10:00–19:00".to_string(),
            location: "Los Reartes".to_string(),
            cancellation: CancellationPolicy::default(),
            availability_fallback: FallbackPolicy::default(),
        }
    }
}

impl VenueConfig {
    /// Cargar la configuración: archivo JSON si se indica, si no los valores por defecto
    pub fn load(path: Option<&str>) -> AppResult<Arc<Self>> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;

        info!(
            "🏞️ {} - {} sectores, ${} por vehículo, fallback {:?}",
            config.name,
            config.sectors.len(),
            config.price_per_vehicle,
            config.availability_fallback
        );
        Ok(Arc::new(config))
    }

    /// Leer la configuración desde un archivo JSON; los campos ausentes toman su valor por defecto
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("No se pudo leer {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::Config(format!("Configuración del parador inválida: {}", e)))
    }

    /// Verificar los invariantes de la configuración
    pub fn validate(&self) -> AppResult<()> {
        if self.price_per_vehicle == 0 {
            return Err(AppError::Config("price_per_vehicle debe ser mayor a 0".to_string()));
        }
        if self.persons_per_vehicle == 0 {
            return Err(AppError::Config("persons_per_vehicle debe ser mayor a 0".to_string()));
        }
        if self.cancellation.deadline_hour > 23 {
            return Err(AppError::Config("cancellation.deadline_hour debe estar entre 0 y 23".to_string()));
        }
        if self.sectors.is_empty() {
            return Err(AppError::Config("Debe existir al menos un sector".to_string()));
        }

        let mut seen = HashSet::new();
        for sector in &self.sectors {
            if sector.id.trim().is_empty() {
                return Err(AppError::Config("Sector sin identificador".to_string()));
            }
            if !seen.insert(sector.id.as_str()) {
                return Err(AppError::Config(format!("Sector duplicado: {}", sector.id)));
            }
        }
        Ok(())
    }

    pub fn sector(&self, id: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == id)
    }

    /// Capacidad nominal diaria de un sector
    pub fn nominal_capacity(&self, sector_id: &str) -> u32 {
        self.sector(sector_id)
            .map(|s| s.capacity)
            .unwrap_or(self.default_sector_capacity)
    }
}
