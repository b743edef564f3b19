use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, full_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            full_name,
            role: "USER".to_string(),
            created_at: Utc::now(),
        }
    }
}
