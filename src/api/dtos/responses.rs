use crate::domain::models::booking::{Booking, BookingOverview, HistoryFilter};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub booking: Booking,
    pub available_slots: i64,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct BookingCancelledResponse {
    pub booking: Booking,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HistoryMeta {
    #[serde(rename = "type")]
    pub filter: HistoryFilter,
    pub current_date: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct BookingHistoryResponse {
    pub bookings: Vec<Booking>,
    pub meta: HistoryMeta,
}

#[derive(Serialize)]
pub struct AdminBookingsResponse {
    pub bookings: Vec<BookingOverview>,
}
