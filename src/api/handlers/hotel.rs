use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateHotelRequest, UpdateHotelRequest};
use crate::domain::models::{hotel::{Hotel, HotelDetails, HotelFilter, NewHotelParams}, room::RoomFilter};
use crate::domain::services::availability::default_window;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

fn validate_hotel_fields(price: f64, class_hotel: i32) -> Result<(), AppError> {
    if price < 0.0 {
        return Err(AppError::Validation("Price must not be negative".into()));
    }
    if !(1..=5).contains(&class_hotel) {
        return Err(AppError::Validation("Hotel class must be between 1 and 5".into()));
    }
    Ok(())
}

pub async fn create_hotel(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateHotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_hotel_fields(payload.price, payload.class_hotel)?;

    let hotel = Hotel::new(NewHotelParams {
        name: payload.name,
        description: payload.description,
        address: payload.address,
        city: payload.city,
        price: payload.price,
        class_hotel: payload.class_hotel,
        facilities: payload.facilities,
        images: payload.images,
    });

    let created = state.hotel_repo.create(&hotel).await?;
    info!("Hotel created: {} ({})", created.id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_hotels(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<HotelFilter>,
) -> Result<impl IntoResponse, AppError> {
    let hotels = state.hotel_repo.list(&filter).await?;
    Ok(Json(hotels))
}

pub async fn get_hotel(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = state.hotel_repo.find_by_id(&hotel_id).await?
        .ok_or(AppError::HotelNotFound)?;

    let rooms = state.room_repo.list(&RoomFilter { hotel_id: Some(hotel.id.clone()), room_type: None }).await?;
    let (start, end) = default_window(Utc::now());
    let rooms = state.booking_service.room_views(&rooms, Some(&hotel.id), start, end).await?;

    Ok(Json(HotelDetails { hotel, rooms }))
}

pub async fn update_hotel(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
    Json(payload): Json<UpdateHotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut hotel = state.hotel_repo.find_by_id(&hotel_id).await?
        .ok_or(AppError::HotelNotFound)?;

    if let Some(name) = payload.name { hotel.name = name; }
    if let Some(description) = payload.description { hotel.description = description; }
    if let Some(address) = payload.address { hotel.address = address; }
    if let Some(city) = payload.city { hotel.city = city; }
    if let Some(price) = payload.price { hotel.price = price; }
    if let Some(class_hotel) = payload.class_hotel { hotel.class_hotel = class_hotel; }
    if let Some(facilities) = payload.facilities { hotel.facilities = facilities; }
    if let Some(images) = payload.images { hotel.images = images; }

    validate_hotel_fields(hotel.price, hotel.class_hotel)?;

    let updated = state.hotel_repo.update(&hotel).await?;
    info!("Hotel updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_hotel(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.hotel_repo.delete(&hotel_id).await?;
    info!("Hotel deleted: {}", hotel_id);
    Ok(Json(serde_json::json!({"message": "Hotel deleted successfully"})))
}
