use crate::domain::{models::room::{Room, RoomFilter}, ports::RoomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteRoomRepo {
    pool: SqlitePool,
}

impl SqliteRoomRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for SqliteRoomRepo {
    async fn create(&self, room: &Room) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (id, hotel_id, room_type, description, price, capacity, facilities, refundable, total_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&room.id).bind(&room.hotel_id).bind(&room.room_type).bind(&room.description)
            .bind(room.price).bind(room.capacity).bind(&room.facilities).bind(room.refundable)
            .bind(room.total_count).bind(room.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &RoomFilter) -> Result<Vec<Room>, AppError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM rooms WHERE 1 = 1");

        if let Some(hotel_id) = &filter.hotel_id {
            builder.push(" AND hotel_id = ").push_bind(hotel_id.clone());
        }
        if let Some(room_type) = &filter.room_type {
            builder.push(" AND room_type = ").push_bind(room_type.clone());
        }
        builder.push(" ORDER BY created_at ASC");

        builder.build_query_as::<Room>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_if_capacity_covers(&self, room: &Room) -> Result<Option<Room>, AppError> {
        // Peak concurrency is reached at some booking's check-in, so counting the
        // bookings that cover each check-in instant is enough.
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET description=?, price=?, capacity=?, total_count=?
             WHERE id=?
               AND ? >= (SELECT COALESCE(MAX(covering), 0) FROM (
                   SELECT (SELECT COUNT(*) FROM bookings x
                           WHERE x.room_id = b.room_id AND x.status != 'CANCELLED'
                             AND x.check_in <= b.check_in AND x.check_out > b.check_in) AS covering
                   FROM bookings b WHERE b.room_id = ? AND b.status != 'CANCELLED'
               ) peaks)
             RETURNING *"
        )
            .bind(&room.description).bind(room.price).bind(room.capacity).bind(room.total_count)
            .bind(&room.id)
            .bind(room.total_count).bind(&room.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::RoomNotFound); }
        Ok(())
    }
}
