use crate::domain::{models::hotel::{Hotel, HotelFilter}, ports::HotelRepository};
use crate::error::AppError;
use crate::infra::repositories::contains_pattern;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteHotelRepo {
    pool: SqlitePool,
}

impl SqliteHotelRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelRepository for SqliteHotelRepo {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        sqlx::query_as::<_, Hotel>(
            "INSERT INTO hotels (id, name, description, address, city, price, class_hotel, facilities, images, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&hotel.id).bind(&hotel.name).bind(&hotel.description).bind(&hotel.address)
            .bind(&hotel.city).bind(hotel.price).bind(hotel.class_hotel).bind(&hotel.facilities)
            .bind(&hotel.images).bind(hotel.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &HotelFilter) -> Result<Vec<Hotel>, AppError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM hotels WHERE 1 = 1");

        if let Some(city) = &filter.city {
            builder.push(" AND city LIKE ").push_bind(contains_pattern(city)).push(" ESCAPE '\\'");
        }
        if let Some(min_price) = filter.min_price {
            builder.push(" AND price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            builder.push(" AND price <= ").push_bind(max_price);
        }
        if let Some(class_hotel) = filter.class_hotel {
            builder.push(" AND class_hotel = ").push_bind(class_hotel);
        }
        builder.push(" ORDER BY created_at ASC");

        builder.build_query_as::<Hotel>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        sqlx::query_as::<_, Hotel>(
            "UPDATE hotels SET name=?, description=?, address=?, city=?, price=?, class_hotel=?, facilities=?, images=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&hotel.name).bind(&hotel.description).bind(&hotel.address).bind(&hotel.city)
            .bind(hotel.price).bind(hotel.class_hotel).bind(&hotel.facilities).bind(&hotel.images)
            .bind(&hotel.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::HotelNotFound); }
        Ok(())
    }
}
