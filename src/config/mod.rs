//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno del servicio y la
//! configuración del parador (precios, sectores, políticas).

pub mod environment;
pub mod venue;

pub use environment::*;
pub use venue::*;
