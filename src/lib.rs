//! Reservas de asadores para Parador La Fontana
//!
//! Validación de reservas contra el cupo diario por sector, cálculo de precio
//! por vehículo y el contrato con el backend que lleva los cupos.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
