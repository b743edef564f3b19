use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::room::RoomView;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub class_hotel: i32,
    pub facilities: String,
    pub images: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewHotelParams {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub class_hotel: i32,
    pub facilities: String,
    pub images: String,
}

impl Hotel {
    pub fn new(params: NewHotelParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            description: params.description,
            address: params.address,
            city: params.city,
            price: params.price,
            class_hotel: params.class_hotel,
            facilities: params.facilities,
            images: params.images,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct HotelFilter {
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub class_hotel: Option<i32>,
}

/// A hotel together with its rooms and their current availability.
#[derive(Debug, Serialize, Clone)]
pub struct HotelDetails {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub rooms: Vec<RoomView>,
}
