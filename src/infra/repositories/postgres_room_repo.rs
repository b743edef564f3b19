use crate::domain::{models::room::{Room, RoomFilter}, ports::RoomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Postgres, PgPool};

pub struct PostgresRoomRepo {
    pool: PgPool,
}

impl PostgresRoomRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepo {
    async fn create(&self, room: &Room) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (id, hotel_id, room_type, description, price, capacity, facilities, refundable, total_count, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&room.id).bind(&room.hotel_id).bind(&room.room_type).bind(&room.description)
            .bind(room.price).bind(room.capacity).bind(&room.facilities).bind(room.refundable)
            .bind(room.total_count).bind(room.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &RoomFilter) -> Result<Vec<Room>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM rooms WHERE 1 = 1");

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
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Same lock admissions take, so no booking lands between the check and the write.
        let locked = sqlx::query("SELECT id FROM rooms WHERE id = $1 FOR UPDATE").bind(&room.id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?;
        if locked.is_none() {
            return Ok(None);
        }

        let updated = sqlx::query_as::<_, Room>(
            "UPDATE rooms SET description=$1, price=$2, capacity=$3, total_count=$4
             WHERE id=$5
               AND $4 >= (SELECT COALESCE(MAX(covering), 0) FROM (
                   SELECT (SELECT COUNT(*) FROM bookings x
                           WHERE x.room_id = b.room_id AND x.status != 'CANCELLED'
                             AND x.check_in <= b.check_in AND x.check_out > b.check_in) AS covering
                   FROM bookings b WHERE b.room_id = $5 AND b.status != 'CANCELLED'
               ) peaks)
             RETURNING *"
        )
            .bind(&room.description).bind(room.price).bind(room.capacity).bind(room.total_count)
            .bind(&room.id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::RoomNotFound); }
        Ok(())
    }
}
