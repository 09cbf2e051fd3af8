//! Middleware del servicio
//!
//! Este módulo contiene la configuración de CORS.

pub mod cors;
