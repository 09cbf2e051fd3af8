//! Backend de reservas falso, levantado con axum en un puerto local

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Days, Local, NaiveDate};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct FakeUpstream {
    /// sector -> (status, cuerpo JSON)
    pub availability: HashMap<String, (StatusCode, Value)>,
    pub availability_queries: Vec<HashMap<String, String>>,
    pub reservas_status: Option<StatusCode>,
    pub reservas_body: String,
    pub received: Vec<Value>,
}

pub type SharedUpstream = Arc<Mutex<FakeUpstream>>;

impl FakeUpstream {
    pub fn shared() -> SharedUpstream {
        Arc::new(Mutex::new(FakeUpstream::default()))
    }
}

pub fn set_availability(upstream: &SharedUpstream, sector: &str, status: StatusCode, body: Value) {
    upstream
        .lock()
        .unwrap()
        .availability
        .insert(sector.to_string(), (status, body));
}

pub fn set_reservas_response(upstream: &SharedUpstream, status: StatusCode, body: &str) {
    let mut upstream = upstream.lock().unwrap();
    upstream.reservas_status = Some(status);
    upstream.reservas_body = body.to_string();
}

pub fn received(upstream: &SharedUpstream) -> Vec<Value> {
    upstream.lock().unwrap().received.clone()
}

async fn availability(
    State(upstream): State<SharedUpstream>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut upstream = upstream.lock().unwrap();
    let sector = query.get("sector").cloned().unwrap_or_default();
    upstream.availability_queries.push(query);

    match upstream.availability.get(&sector) {
        Some((status, body)) => (*status, Json(body.clone())).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn reservas(State(upstream): State<SharedUpstream>, Json(body): Json<Value>) -> Response {
    let mut upstream = upstream.lock().unwrap();
    upstream.received.push(body);
    let status = upstream.reservas_status.unwrap_or(StatusCode::OK);
    (status, upstream.reservas_body.clone()).into_response()
}

/// Levanta el backend falso y devuelve su URL base
pub async fn spawn_backend(upstream: SharedUpstream) -> String {
    let app = Router::new()
        .route("/api/availability", get(availability))
        .route("/api/reservas", post(reservas))
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// URL donde no escucha nadie
pub async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn future_date() -> NaiveDate {
    Local::now().date_naive() + Days::new(10)
}
