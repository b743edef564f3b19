use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{
    models::{
        booking::{AdmittedBooking, Booking, BookingConfirmation, BookingOverview, BookingRequest, HistoryFilter, NewBookingParams},
        hotel::{Hotel, HotelFilter},
        room::{Room, RoomFilter, RoomView},
    },
    ports::{BookingRepository, HotelRepository, RoomRepository, UserRepository},
    services::availability::{available_slots, count_active_overlapping, peak_concurrent, room_views, validate_range},
};
use crate::error::AppError;

/// The guarded insert is retried once when the store reports a write conflict.
const MAX_ADMISSION_ATTEMPTS: u32 = 2;

pub struct BookingService {
    hotel_repo: Arc<dyn HotelRepository>,
    room_repo: Arc<dyn RoomRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl BookingService {
    pub fn new(
        hotel_repo: Arc<dyn HotelRepository>,
        room_repo: Arc<dyn RoomRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self { hotel_repo, room_repo, booking_repo, user_repo }
    }

    pub async fn create_booking(&self, request: BookingRequest) -> Result<AdmittedBooking, AppError> {
        let nights = validate_range(request.check_in, request.check_out)?;

        let hotel = self.hotel_repo.find_by_id(&request.hotel_id).await?
            .ok_or(AppError::HotelNotFound)?;

        let room = self.room_repo.find_by_id(&request.room_id).await?
            .filter(|r| r.hotel_id == hotel.id)
            .ok_or(AppError::RoomNotFound)?;

        let user_id = match self.user_repo.find_by_email(&request.email).await {
            Ok(user) => user.map(|u| u.id),
            Err(e) => {
                warn!("User lookup for booking failed, continuing as guest: {}", e);
                None
            }
        };

        let booking = Booking::new(NewBookingParams {
            total_price: room.price * nights as f64,
            user_id,
            request,
        });

        let mut attempt = 1;
        loop {
            match self.admit(&room, &booking).await {
                Err(e) if attempt < MAX_ADMISSION_ATTEMPTS && e.is_transient_conflict() => {
                    warn!("Admission for room {} hit a write conflict, retrying: {}", room.id, e);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn admit(&self, room: &Room, booking: &Booking) -> Result<AdmittedBooking, AppError> {
        let taken = self.booking_repo.count_overlap(&room.id, booking.check_in, booking.check_out).await?;
        let slots = available_slots(room.total_count, taken);

        if slots <= 0 {
            info!("Booking rejected: room {} has {} slots for {} - {}", room.id, slots, booking.check_in, booking.check_out);
            return Err(AppError::NoAvailability { available_slots: slots });
        }

        match self.booking_repo.create_if_available(booking).await? {
            Some(created) => {
                info!("Booking confirmed: {} for room {} ({} slots left)", created.id, room.id, slots - 1);
                Ok(AdmittedBooking { booking: created, available_slots: slots - 1 })
            }
            None => {
                let taken = self.booking_repo.count_overlap(&room.id, booking.check_in, booking.check_out).await?;
                let slots = available_slots(room.total_count, taken);
                info!("Booking rejected at commit: room {} was filled concurrently ({} slots)", room.id, slots);
                Err(AppError::NoAvailability { available_slots: slots })
            }
        }
    }

    pub async fn get_booking(&self, id: &str, email: &str) -> Result<Booking, AppError> {
        self.booking_repo.find_owned(id, email).await?
            .ok_or(AppError::BookingNotFound)
    }

    pub async fn list_history(&self, email: &str, filter: HistoryFilter) -> Result<Vec<Booking>, AppError> {
        self.booking_repo.list_owned(email, filter, Utc::now()).await
    }

    pub async fn get_confirmation(&self, id: &str, email: &str) -> Result<BookingConfirmation, AppError> {
        let booking = self.get_booking(id, email).await?;

        let hotel = self.hotel_repo.find_by_id(&booking.hotel_id).await?
            .ok_or(AppError::Internal)?;
        let room = self.room_repo.find_by_id(&booking.room_id).await?
            .ok_or(AppError::Internal)?;

        let taken = self.booking_repo.count_overlap(&room.id, booking.check_in, booking.check_out).await?;
        Ok(BookingConfirmation::new(&booking, &hotel, &room, available_slots(room.total_count, taken)))
    }

    pub async fn cancel_booking(&self, id: &str, email: &str) -> Result<Booking, AppError> {
        let booking = self.get_booking(id, email).await?;

        if !booking.is_active() {
            return Err(AppError::AlreadyCancelled);
        }

        let cancelled = self.booking_repo.cancel(&booking.id).await?
            .ok_or(AppError::AlreadyCancelled)?;

        info!("Booking cancelled: {}", cancelled.id);
        Ok(cancelled)
    }

    pub async fn list_all(&self) -> Result<Vec<BookingOverview>, AppError> {
        let bookings = self.booking_repo.list_all().await?;
        let hotels = self.hotel_repo.list(&HotelFilter::default()).await?;
        let rooms = self.room_repo.list(&RoomFilter::default()).await?;

        let hotels: HashMap<&str, &Hotel> = hotels.iter().map(|h| (h.id.as_str(), h)).collect();
        let rooms: HashMap<&str, &Room> = rooms.iter().map(|r| (r.id.as_str(), r)).collect();
        let active: Vec<Booking> = bookings.iter().filter(|b| b.is_active()).cloned().collect();

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let hotel = hotels.get(booking.hotel_id.as_str()).copied();
                let room = rooms.get(booking.room_id.as_str()).copied();
                let slots = room.map(|r| {
                    available_slots(r.total_count, count_active_overlapping(&active, &r.id, booking.check_in, booking.check_out))
                });
                BookingOverview::new(booking, hotel, room, slots)
            })
            .collect())
    }

    /// Saves room changes unless the new unit count would leave existing
    /// bookings overlapping beyond it.
    pub async fn update_room(&self, room: &Room) -> Result<Room, AppError> {
        let booked = peak_concurrent(&self.booking_repo.list_active_for_room(&room.id).await?, &room.id);
        if (room.total_count as i64) < booked {
            info!("Room update rejected: {} units requested for room {}, {} booked at peak", room.total_count, room.id, booked);
            return Err(AppError::CapacityBelowBookings { booked });
        }

        match self.room_repo.update_if_capacity_covers(room).await? {
            Some(updated) => Ok(updated),
            None => {
                self.room_repo.find_by_id(&room.id).await?
                    .ok_or(AppError::RoomNotFound)?;
                let booked = peak_concurrent(&self.booking_repo.list_active_for_room(&room.id).await?, &room.id);
                info!("Room update rejected at commit: room {} now has {} booked at peak", room.id, booked);
                Err(AppError::CapacityBelowBookings { booked })
            }
        }
    }

    /// Availability of the given rooms over `[start, end)`.
    pub async fn room_views(
        &self,
        rooms: &[Room],
        hotel_id: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RoomView>, AppError> {
        let active = self.booking_repo.list_active_in_window(hotel_id, start, end).await?;
        Ok(room_views(rooms, &active, start, end))
    }

    /// Rooms of a hotel that still have at least one free unit for the whole stay.
    pub async fn available_rooms(
        &self,
        hotel_id: &str,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Vec<RoomView>, AppError> {
        validate_range(check_in, check_out)?;

        self.hotel_repo.find_by_id(hotel_id).await?
            .ok_or(AppError::HotelNotFound)?;

        let rooms = self.room_repo.list(&RoomFilter { hotel_id: Some(hotel_id.to_string()), room_type: None }).await?;
        let mut views = self.room_views(&rooms, Some(hotel_id), check_in, check_out).await?;
        views.retain(|v| v.available_slots > 0);
        Ok(views)
    }
}
