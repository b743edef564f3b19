use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::{hotel::Hotel, room::Room};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub hotel_id: String,
    pub room_id: String,
    pub user_id: Option<String>,
    pub guest_email: String,
    pub guest_name: String,
    pub guest_phone: String,
    pub payment_method: Option<String>,
    pub payment_account_number: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_price: f64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled.as_str()
    }
}

/// Everything a caller supplies when asking for a room.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub hotel_id: String,
    pub room_id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub payment_method: Option<String>,
    pub payment_account_number: Option<String>,
    pub notes: Option<String>,
}

pub struct NewBookingParams {
    pub request: BookingRequest,
    pub user_id: Option<String>,
    pub total_price: f64,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let request = params.request;

        Self {
            id: Uuid::new_v4().to_string(),
            hotel_id: request.hotel_id,
            room_id: request.room_id,
            user_id: params.user_id,
            guest_email: request.email,
            guest_name: request.full_name,
            guest_phone: request.phone,
            payment_method: request.payment_method,
            payment_account_number: request.payment_account_number,
            check_in: request.check_in,
            check_out: request.check_out,
            total_price: params.total_price,
            status: BookingStatus::Confirmed.as_str().to_string(),
            notes: request.notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    Past,
    Upcoming,
    #[default]
    All,
}

/// A freshly admitted booking and the slot count left right after it.
#[derive(Debug, Serialize, Clone)]
pub struct AdmittedBooking {
    pub booking: Booking,
    pub available_slots: i64,
}

#[derive(Debug, Serialize, Clone)]
pub struct BookingConfirmation {
    pub confirmation_number: String,
    pub hotel_name: String,
    pub room_type: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub nights: i64,
    pub total_price: f64,
    pub status: String,
    pub available_slots: i64,
}

impl BookingConfirmation {
    pub fn new(booking: &Booking, hotel: &Hotel, room: &Room, available_slots: i64) -> Self {
        Self {
            confirmation_number: booking.id.clone(),
            hotel_name: hotel.name.clone(),
            room_type: room.room_type.clone(),
            check_in: booking.check_in,
            check_out: booking.check_out,
            nights: crate::domain::services::availability::nights(booking.check_in, booking.check_out),
            total_price: booking.total_price,
            status: booking.status.clone(),
            available_slots,
        }
    }
}

/// Admin-facing row: the stored booking plus where it is and how full its room is.
#[derive(Debug, Serialize, Clone)]
pub struct BookingOverview {
    #[serde(flatten)]
    pub booking: Booking,
    pub hotel_name: Option<String>,
    pub room_type: Option<String>,
    pub available_slots: Option<i64>,
}

impl BookingOverview {
    pub fn new(booking: Booking, hotel: Option<&Hotel>, room: Option<&Room>, available_slots: Option<i64>) -> Self {
        Self {
            booking,
            hotel_name: hotel.map(|h| h.name.clone()),
            room_type: room.map(|r| r.room_type.clone()),
            available_slots,
        }
    }
}
