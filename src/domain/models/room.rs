use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

const FACILITY_SEPARATOR: &str = ", ";

/// Room categories a hotel can offer. Each one carries a fixed display name,
/// facility list and refund policy.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Junior,
    Deluxe,
    Premier,
}

pub struct RoomPreset {
    pub name: &'static str,
    pub facilities: &'static [&'static str],
    pub refundable: bool,
}

impl RoomType {
    pub fn preset(self) -> RoomPreset {
        match self {
            RoomType::Junior => RoomPreset {
                name: "Junior Suite",
                facilities: &["Wifi", "AC", "Parking"],
                refundable: false,
            },
            RoomType::Deluxe => RoomPreset {
                name: "Deluxe",
                facilities: &["Wifi", "AC", "Parking", "Breakfast"],
                refundable: true,
            },
            RoomType::Premier => RoomPreset {
                name: "Premier",
                facilities: &["Wifi", "AC", "Parking", "Breakfast", "Discount Food & Beverage"],
                refundable: true,
            },
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            RoomType::Junior => "JUNIOR",
            RoomType::Deluxe => "DELUXE",
            RoomType::Premier => "PREMIER",
        }
    }

    /// Maps a filter value (`JUNIOR`) or a stored display name (`Junior Suite`) to the type.
    pub fn parse(value: &str) -> Option<Self> {
        [RoomType::Junior, RoomType::Deluxe, RoomType::Premier]
            .into_iter()
            .find(|t| t.code() == value || t.preset().name == value)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Room {
    pub id: String,
    pub hotel_id: String,
    pub room_type: String,
    pub description: String,
    pub price: f64,
    pub capacity: i32,
    pub facilities: String,
    pub refundable: bool,
    pub total_count: i32,
    pub created_at: DateTime<Utc>,
}

pub struct NewRoomParams {
    pub hotel_id: String,
    pub room_type: RoomType,
    pub description: Option<String>,
    pub price: f64,
    pub capacity: Option<i32>,
    pub total_count: Option<i32>,
}

impl Room {
    pub fn new(params: NewRoomParams) -> Self {
        let preset = params.room_type.preset();

        Self {
            id: Uuid::new_v4().to_string(),
            hotel_id: params.hotel_id,
            room_type: preset.name.to_string(),
            description: params.description.unwrap_or_else(|| format!("{} room", preset.name)),
            price: params.price,
            capacity: params.capacity.unwrap_or(2),
            facilities: preset.facilities.join(FACILITY_SEPARATOR),
            refundable: preset.refundable,
            total_count: params.total_count.unwrap_or(1),
            created_at: Utc::now(),
        }
    }

    pub fn facility_list(&self) -> Vec<String> {
        self.facilities
            .split(FACILITY_SEPARATOR)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RoomFilter {
    pub hotel_id: Option<String>,
    pub room_type: Option<String>,
}

/// Read-only projection of a room as clients see it: facilities as a list and
/// the number of units still free for the window the view was computed for.
#[derive(Debug, Serialize, Clone)]
pub struct RoomView {
    pub id: String,
    pub hotel_id: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub description: String,
    pub price: f64,
    pub capacity: i32,
    pub facilities: Vec<String>,
    pub refundable: bool,
    pub total_count: i32,
    pub available_slots: i64,
}

impl RoomView {
    pub fn new(room: &Room, available_slots: i64) -> Self {
        Self {
            id: room.id.clone(),
            hotel_id: room.hotel_id.clone(),
            room_type: room.room_type.clone(),
            description: room.description.clone(),
            price: room.price,
            capacity: room.capacity,
            facilities: room.facility_list(),
            refundable: room.refundable,
            total_count: room.total_count,
            available_slots,
        }
    }
}
