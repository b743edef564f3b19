use crate::domain::{models::hotel::{Hotel, HotelFilter}, ports::HotelRepository};
use crate::error::AppError;
use crate::infra::repositories::contains_pattern;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Postgres, PgPool};

pub struct PostgresHotelRepo {
    pool: PgPool,
}

impl PostgresHotelRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelRepository for PostgresHotelRepo {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        sqlx::query_as::<_, Hotel>(
            "INSERT INTO hotels (id, name, description, address, city, price, class_hotel, facilities, images, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&hotel.id).bind(&hotel.name).bind(&hotel.description).bind(&hotel.address)
            .bind(&hotel.city).bind(hotel.price).bind(hotel.class_hotel).bind(&hotel.facilities)
            .bind(&hotel.images).bind(hotel.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &HotelFilter) -> Result<Vec<Hotel>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM hotels WHERE 1 = 1");

        if let Some(city) = &filter.city {
            builder.push(" AND city ILIKE ").push_bind(contains_pattern(city)).push(" ESCAPE '\\'");
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
            "UPDATE hotels SET name=$1, description=$2, address=$3, city=$4, price=$5, class_hotel=$6, facilities=$7, images=$8
             WHERE id=$9
             RETURNING *"
        )
            .bind(&hotel.name).bind(&hotel.description).bind(&hotel.address).bind(&hotel.city)
            .bind(hotel.price).bind(hotel.class_hotel).bind(&hotel.facilities).bind(&hotel.images)
            .bind(&hotel.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::HotelNotFound); }
        Ok(())
    }
}
