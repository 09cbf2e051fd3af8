pub mod api_response;
pub mod availability_dto;
pub mod booking_dto;
pub mod reserva_dto;

pub use api_response::ApiResponse;
