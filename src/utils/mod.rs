//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y validación
//! de datos de contacto.

pub mod errors;
pub mod validation;

pub use errors::{AppError, AppResult};
