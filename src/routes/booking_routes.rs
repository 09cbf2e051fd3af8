use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::booking_controller::BookingController;
use crate::dto::availability_dto::AvailabilityQuery;
use crate::dto::booking_dto::{QuoteRequest, QuoteResponse, VenueInfoResponse};
use crate::dto::reserva_dto::CreateReservaRequest;
use crate::dto::ApiResponse;
use crate::models::availability::AvailabilitySnapshot;
use crate::services::SubmissionOutcome;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_venue_config))
        .route("/availability", get(get_availability))
        .route("/quote", post(quote))
        .route("/reservas", post(create_reserva))
}

async fn get_venue_config(State(state): State<AppState>) -> Json<ApiResponse<VenueInfoResponse>> {
    let controller = BookingController::new(state);
    Json(ApiResponse::success(controller.venue_info()))
}

async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilitySnapshot>>, AppError> {
    let controller = BookingController::new(state);
    let snapshot = controller.availability(query).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, AppError> {
    let controller = BookingController::new(state);
    let response = controller.quote(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn create_reserva(
    State(state): State<AppState>,
    Json(request): Json<CreateReservaRequest>,
) -> Result<Json<ApiResponse<SubmissionOutcome>>, AppError> {
    let controller = BookingController::new(state);
    let outcome = controller.create_reserva(request).await?;
    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success_with_message(outcome, message)))
}
