use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{AvailableRoomsQuery, CreateRoomRequest, ListRoomsQuery, UpdateRoomRequest};
use crate::domain::models::room::{NewRoomParams, Room, RoomFilter, RoomType, RoomView};
use crate::domain::services::availability::{default_window, validate_range};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

fn validate_room_fields(price: f64, capacity: i32, total_count: i32) -> Result<(), AppError> {
    if price < 0.0 {
        return Err(AppError::Validation("Price must not be negative".into()));
    }
    if capacity < 1 {
        return Err(AppError::Validation("Capacity must be at least 1".into()));
    }
    if total_count < 1 {
        return Err(AppError::Validation("Total count must be at least 1".into()));
    }
    Ok(())
}

async fn view_of(state: &AppState, room: &Room) -> Result<RoomView, AppError> {
    let (start, end) = default_window(Utc::now());
    let mut views = state.booking_service.room_views(std::slice::from_ref(room), Some(&room.hotel_id), start, end).await?;
    views.pop().ok_or(AppError::Internal)
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.hotel_repo.find_by_id(&payload.hotel_id).await?
        .ok_or(AppError::HotelNotFound)?;

    let room = Room::new(NewRoomParams {
        hotel_id: payload.hotel_id,
        room_type: payload.room_type,
        description: payload.description,
        price: payload.price,
        capacity: payload.capacity,
        total_count: payload.total_count,
    });
    validate_room_fields(room.price, room.capacity, room.total_count)?;

    let created = state.room_repo.create(&room).await?;
    info!("Room created: {} ({}) in hotel {}", created.id, created.room_type, created.hotel_id);

    let view = RoomView::new(&created, created.total_count as i64);
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListRoomsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (start, end) = match (query.check_in, query.check_out) {
        (Some(check_in), Some(check_out)) => {
            validate_range(check_in, check_out)?;
            (check_in, check_out)
        }
        (None, None) => default_window(Utc::now()),
        _ => return Err(AppError::Validation("check_in and check_out must be given together".into())),
    };

    let room_type = match query.room_type {
        Some(value) => Some(
            RoomType::parse(&value)
                .ok_or(AppError::Validation("Invalid room type".into()))?
                .preset()
                .name
                .to_string(),
        ),
        None => None,
    };

    let filter = RoomFilter { hotel_id: query.hotel_id, room_type };
    let rooms = state.room_repo.list(&filter).await?;
    let views = state.booking_service.room_views(&rooms, filter.hotel_id.as_deref(), start, end).await?;
    Ok(Json(views))
}

pub async fn list_available_rooms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableRoomsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let views = state.booking_service.available_rooms(&query.hotel_id, query.check_in, query.check_out).await?;
    Ok(Json(views))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::RoomNotFound)?;
    Ok(Json(view_of(&state, &room).await?))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::RoomNotFound)?;

    if let Some(price) = payload.price { room.price = price; }
    if let Some(description) = payload.description { room.description = description; }
    if let Some(capacity) = payload.capacity { room.capacity = capacity; }
    if let Some(total_count) = payload.total_count { room.total_count = total_count; }

    validate_room_fields(room.price, room.capacity, room.total_count)?;

    let updated = state.booking_service.update_room(&room).await?;
    info!("Room updated: {}", updated.id);
    Ok(Json(view_of(&state, &updated).await?))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.room_repo.delete(&room_id).await?;
    info!("Room deleted: {}", room_id);
    Ok(Json(serde_json::json!({"message": "Room deleted successfully"})))
}
