use axum::{
    body::Body,
    extract::Request,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{booking, health, hotel, room};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Hotels
        .route("/api/v1/hotels", post(hotel::create_hotel).get(hotel::list_hotels))
        .route("/api/v1/hotels/{hotel_id}", get(hotel::get_hotel).put(hotel::update_hotel).delete(hotel::delete_hotel))

        // Rooms
        .route("/api/v1/rooms", post(room::create_room).get(room::list_rooms))
        .route("/api/v1/rooms/available", get(room::list_available_rooms))
        .route("/api/v1/rooms/{room_id}", get(room::get_room).patch(room::update_room).delete(room::delete_room))

        // Guest Booking Flow
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/history", get(booking::list_booking_history))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/confirmation", get(booking::get_confirmation))
        .route("/api/v1/bookings/{booking_id}/cancel", patch(booking::cancel_booking))

        // Admin
        .route("/api/v1/admin/bookings", get(booking::list_all_bookings))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
