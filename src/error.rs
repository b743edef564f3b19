use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// SQLite: BUSY, LOCKED, BUSY_RECOVERY, BUSY_SNAPSHOT
const SQLITE_TRANSIENT_CODES: [&str; 4] = ["5", "6", "261", "517"];
// PostgreSQL: serialization_failure, deadlock_detected
const POSTGRES_TRANSIENT_CODES: [&str; 2] = ["40001", "40P01"];

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Hotel not found")]
    HotelNotFound,
    #[error("Room not found")]
    RoomNotFound,
    #[error("Booking not found")]
    BookingNotFound,
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
    #[error("No available slots for this room type ({available_slots} left)")]
    NoAvailability { available_slots: i64 },
    #[error("Booking is already cancelled")]
    AlreadyCancelled,
    #[error("Room capacity below booked units ({booked} booked at peak)")]
    CapacityBelowBookings { booked: i64 },
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// True when the store rejected a commit because of a concurrent writer
    /// and the same statement may succeed if issued again.
    pub fn is_transient_conflict(&self) -> bool {
        let AppError::Database(e) = self else {
            return false;
        };
        let Some(db_err) = e.as_database_error() else {
            return false;
        };
        let code = db_err.code().unwrap_or_default();
        SQLITE_TRANSIENT_CODES.contains(&code.as_ref()) || POSTGRES_TRANSIENT_CODES.contains(&code.as_ref())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Resource already exists (duplicate entry)" }))
                        ).into_response();
                    }
                    if db_err.is_foreign_key_violation() {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Resource is still referenced by other records" }))
                        ).into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NoAvailability { available_slots } => {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "No available slots for this room type",
                        "available_slots": available_slots
                    }))
                ).into_response();
            }
            AppError::CapacityBelowBookings { booked } => {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "Total count is below the units already booked",
                        "booked": booked
                    }))
                ).into_response();
            }
            AppError::HotelNotFound => (StatusCode::NOT_FOUND, "Hotel not found".to_string()),
            AppError::RoomNotFound => (StatusCode::NOT_FOUND, "Room not found".to_string()),
            AppError::BookingNotFound => (StatusCode::NOT_FOUND, "Booking not found or email mismatch".to_string()),
            AppError::InvalidRange(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::AlreadyCancelled => (StatusCode::CONFLICT, "Booking is already cancelled".to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
