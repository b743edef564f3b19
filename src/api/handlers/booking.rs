use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateBookingRequest, EmailQuery, HistoryQuery},
    responses::{AdminBookingsResponse, BookingCancelledResponse, BookingCreatedResponse, BookingHistoryResponse, HistoryMeta},
};
use crate::domain::models::booking::BookingRequest;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_booking: room {} from {} to {}", payload.room_id, payload.check_in, payload.check_out);

    if !payload.email.contains('@') {
        return Err(AppError::Validation("Invalid email".into()));
    }

    let admitted = state.booking_service.create_booking(BookingRequest {
        hotel_id: payload.hotel_id,
        room_id: payload.room_id,
        email: payload.email,
        full_name: payload.full_name,
        phone: payload.phone_number,
        check_in: payload.check_in,
        check_out: payload.check_out,
        payment_method: payload.payment_method,
        payment_account_number: payload.payment_account_number,
        notes: payload.notes,
    }).await?;

    Ok((StatusCode::CREATED, Json(BookingCreatedResponse {
        booking: admitted.booking,
        available_slots: admitted.available_slots,
        message: "Booking created successfully",
    })))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.get_booking(&booking_id, &query.email).await?;
    Ok(Json(booking))
}

pub async fn list_booking_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_history(&query.email, query.filter).await?;

    Ok(Json(BookingHistoryResponse {
        bookings,
        meta: HistoryMeta {
            filter: query.filter,
            current_date: Utc::now(),
        },
    }))
}

pub async fn get_confirmation(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let confirmation = state.booking_service.get_confirmation(&booking_id, &query.email).await?;
    Ok(Json(confirmation))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.cancel_booking(&booking_id, &query.email).await?;

    Ok(Json(BookingCancelledResponse {
        booking,
        message: "Booking cancelled successfully",
    }))
}

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_all().await?;
    Ok(Json(AdminBookingsResponse { bookings }))
}
