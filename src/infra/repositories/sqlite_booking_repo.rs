use crate::domain::{models::booking::{Booking, HistoryFilter}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqlitePool, Row};
use chrono::{DateTime, Utc};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_if_available(&self, booking: &Booking) -> Result<Option<Booking>, AppError> {
        // One write statement: SQLite takes the write lock before evaluating the
        // capacity guard, so concurrent admissions for a room are serialized.
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, hotel_id, room_id, user_id, guest_email, guest_name, guest_phone, payment_method, payment_account_number, check_in, check_out, total_price, status, notes, created_at)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
             WHERE (SELECT COUNT(*) FROM bookings WHERE room_id = ? AND status != 'CANCELLED' AND check_in < ? AND check_out > ?)
                 < (SELECT total_count FROM rooms WHERE id = ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.hotel_id).bind(&booking.room_id).bind(&booking.user_id)
            .bind(&booking.guest_email).bind(&booking.guest_name).bind(&booking.guest_phone)
            .bind(&booking.payment_method).bind(&booking.payment_account_number)
            .bind(booking.check_in).bind(booking.check_out).bind(booking.total_price)
            .bind(&booking.status).bind(&booking.notes).bind(booking.created_at)
            .bind(&booking.room_id).bind(booking.check_out).bind(booking.check_in)
            .bind(&booking.room_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_owned(&self, id: &str, email: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b LEFT JOIN users u ON u.id = b.user_id
             WHERE b.id = ? AND (b.guest_email = ? OR u.email = ?)"
        )
            .bind(id).bind(email).bind(email)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_owned(&self, email: &str, filter: HistoryFilter, now: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        let date_condition = match filter {
            HistoryFilter::Past => " AND b.check_out < ?",
            HistoryFilter::Upcoming => " AND b.check_in > ?",
            HistoryFilter::All => "",
        };
        let sql = format!(
            "SELECT b.* FROM bookings b LEFT JOIN users u ON u.id = b.user_id
             WHERE (b.guest_email = ? OR u.email = ?){}
             ORDER BY b.created_at DESC",
            date_condition
        );

        let mut query = sqlx::query_as::<_, Booking>(&sql).bind(email).bind(email);
        if filter != HistoryFilter::All {
            query = query.bind(now);
        }
        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_in_window(&self, hotel_id: Option<&str>, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        let sql = format!(
            "SELECT * FROM bookings WHERE status != 'CANCELLED' AND check_in < ? AND check_out > ?{}",
            if hotel_id.is_some() { " AND hotel_id = ?" } else { "" }
        );

        let mut query = sqlx::query_as::<_, Booking>(&sql).bind(end).bind(start);
        if let Some(hotel_id) = hotel_id {
            query = query.bind(hotel_id);
        }
        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_for_room(&self, room_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE room_id = ? AND status != 'CANCELLED' ORDER BY check_in ASC").bind(room_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_overlap(&self, room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE room_id = ? AND status != 'CANCELLED' AND check_in < ? AND check_out > ?").bind(room_id).bind(end).bind(start).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }

    async fn cancel(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = 'CANCELLED' WHERE id = ? AND status != 'CANCELLED' RETURNING *").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
