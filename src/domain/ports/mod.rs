use crate::domain::models::{
    booking::{Booking, HistoryFilter},
    hotel::{Hotel, HotelFilter},
    room::{Room, RoomFilter},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Hotel>, AppError>;
    async fn list(&self, filter: &HotelFilter) -> Result<Vec<Hotel>, AppError>;
    async fn update(&self, hotel: &Hotel) -> Result<Hotel, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &Room) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError>;
    async fn list(&self, filter: &RoomFilter) -> Result<Vec<Room>, AppError>;
    /// Writes the room only if `total_count` still covers the peak number of
    /// active bookings overlapping at any instant. Returns `None` otherwise.
    async fn update_if_capacity_covers(&self, room: &Room) -> Result<Option<Room>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking only if, at commit time, fewer than `rooms.total_count`
    /// active bookings of the same room overlap its stay. Returns `None` when the
    /// last slot was taken in the meantime; nothing is written in that case.
    async fn create_if_available(&self, booking: &Booking) -> Result<Option<Booking>, AppError>;
    /// Looks a booking up for a caller identified only by email. The email must
    /// match the guest email or the email of the linked user.
    async fn find_owned(&self, id: &str, email: &str) -> Result<Option<Booking>, AppError>;
    async fn list_owned(&self, email: &str, filter: HistoryFilter, now: DateTime<Utc>) -> Result<Vec<Booking>, AppError>;
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;
    async fn list_active_in_window(&self, hotel_id: Option<&str>, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Booking>, AppError>;
    async fn list_active_for_room(&self, room_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn count_overlap(&self, room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, AppError>;
    /// Flips an active booking to CANCELLED. Returns `None` if it was already cancelled.
    async fn cancel(&self, id: &str) -> Result<Option<Booking>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}
