//! Modelo de Sector
//!
//! Un sector es una zona del parador con su propio cupo diario de asadores
//! (por ejemplo, a la orilla del río o bajo la arboleda).

use serde::{Deserialize, Serialize};

/// Sector del parador - dato de referencia inmutable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    /// Cupo diario de asadores del sector
    #[serde(alias = "cupos")]
    pub capacity: u32,
}

impl Sector {
    pub fn new(id: &str, name: &str, description: &str, capacity: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            capacity,
        }
    }
}
