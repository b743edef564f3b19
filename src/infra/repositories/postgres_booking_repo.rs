use crate::domain::{models::booking::{Booking, HistoryFilter}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::{DateTime, Utc};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create_if_available(&self, booking: &Booking) -> Result<Option<Booking>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Row lock on the room serializes admissions for it until commit.
        let locked = sqlx::query("SELECT id FROM rooms WHERE id = $1 FOR UPDATE").bind(&booking.room_id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?;
        if locked.is_none() {
            return Ok(None);
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, hotel_id, room_id, user_id, guest_email, guest_name, guest_phone, payment_method, payment_account_number, check_in, check_out, total_price, status, notes, created_at)
             SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15
             WHERE (SELECT COUNT(*) FROM bookings WHERE room_id = $3 AND status != 'CANCELLED' AND check_in < $11 AND check_out > $10)
                 < (SELECT total_count FROM rooms WHERE id = $3)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.hotel_id).bind(&booking.room_id).bind(&booking.user_id)
            .bind(&booking.guest_email).bind(&booking.guest_name).bind(&booking.guest_phone)
            .bind(&booking.payment_method).bind(&booking.payment_account_number)
            .bind(booking.check_in).bind(booking.check_out).bind(booking.total_price)
            .bind(&booking.status).bind(&booking.notes).bind(booking.created_at)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_owned(&self, id: &str, email: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b LEFT JOIN users u ON u.id = b.user_id
             WHERE b.id = $1 AND (b.guest_email = $2 OR u.email = $2)"
        )
            .bind(id).bind(email)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_owned(&self, email: &str, filter: HistoryFilter, now: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        let date_condition = match filter {
            HistoryFilter::Past => " AND b.check_out < $2",
            HistoryFilter::Upcoming => " AND b.check_in > $2",
            HistoryFilter::All => "",
        };
        let sql = format!(
            "SELECT b.* FROM bookings b LEFT JOIN users u ON u.id = b.user_id
             WHERE (b.guest_email = $1 OR u.email = $1){}
             ORDER BY b.created_at DESC",
            date_condition
        );

        let mut query = sqlx::query_as::<_, Booking>(&sql).bind(email);
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
            "SELECT * FROM bookings WHERE status != 'CANCELLED' AND check_in < $1 AND check_out > $2{}",
            if hotel_id.is_some() { " AND hotel_id = $3" } else { "" }
        );

        let mut query = sqlx::query_as::<_, Booking>(&sql).bind(end).bind(start);
        if let Some(hotel_id) = hotel_id {
            query = query.bind(hotel_id);
        }
        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_for_room(&self, room_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE room_id = $1 AND status != 'CANCELLED' ORDER BY check_in ASC").bind(room_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_overlap(&self, room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE room_id = $1 AND status != 'CANCELLED' AND check_in < $2 AND check_out > $3").bind(room_id).bind(end).bind(start).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }

    async fn cancel(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = 'CANCELLED' WHERE id = $1 AND status != 'CANCELLED' RETURNING *").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
