//! Clients - HTTP Clients for External APIs
//!
//! This module contains the HTTP client for the reservas backend that keeps
//! the per-day, per-sector capacity.

pub mod reservas_client;

#[cfg(test)]
pub(crate) mod fake_backend;

pub use reservas_client::{ReservasBackend, ReservasHttpClient};
