use std::sync::Arc;
use crate::domain::ports::{BookingRepository, HotelRepository, RoomRepository, UserRepository};
use crate::domain::services::booking_service::BookingService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub hotel_repo: Arc<dyn HotelRepository>,
    pub room_repo: Arc<dyn RoomRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub booking_service: Arc<BookingService>,
}

impl AppState {
    pub fn new(
        config: Config,
        hotel_repo: Arc<dyn HotelRepository>,
        room_repo: Arc<dyn RoomRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        let booking_service = Arc::new(BookingService::new(
            hotel_repo.clone(),
            room_repo.clone(),
            booking_repo,
            user_repo.clone(),
        ));

        Self { config, hotel_repo, room_repo, user_repo, booking_service }
    }
}
