use crate::domain::models::{booking::HistoryFilter, room::RoomType};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateHotelRequest {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub class_hotel: i32,
    pub facilities: String,
    pub images: String,
}

#[derive(Deserialize)]
pub struct UpdateHotelRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub price: Option<f64>,
    pub class_hotel: Option<i32>,
    pub facilities: Option<String>,
    pub images: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub hotel_id: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub description: Option<String>,
    pub price: f64,
    pub capacity: Option<i32>,
    pub total_count: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateRoomRequest {
    pub price: Option<f64>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub total_count: Option<i32>,
}

#[derive(Deserialize)]
pub struct ListRoomsQuery {
    pub hotel_id: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct AvailableRoomsQuery {
    pub hotel_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub hotel_id: String,
    pub room_id: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub payment_method: Option<String>,
    pub payment_account_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub email: String,
    #[serde(rename = "type", default)]
    pub filter: HistoryFilter,
}
