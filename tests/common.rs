use hotel_booking::{
    api::router::create_router,
    config::Config,
    domain::models::user::User,
    infra::factory::sqlite_state,
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
        };

        let state = Arc::new(sqlite_state(config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Sends one request through the router and returns the status with the JSON body
    /// (`Value::Null` when the body is not JSON).
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send_request(self.router.clone(), method, uri, body).await
    }

    pub async fn create_hotel(&self, name: &str, city: &str, price: f64) -> String {
        let (status, body) = self.send("POST", "/api/v1/hotels", Some(json!({
            "name": name,
            "description": "A place to stay",
            "address": "1 Main Street",
            "city": city,
            "price": price,
            "class_hotel": 4,
            "facilities": "Pool, Spa",
            "images": "https://img.example.com/1.jpg"
        }))).await;
        assert_eq!(status, StatusCode::CREATED, "hotel creation failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_room(&self, hotel_id: &str, room_type: &str, price: f64, total_count: i32) -> String {
        let (status, body) = self.send("POST", "/api/v1/rooms", Some(json!({
            "hotel_id": hotel_id,
            "type": room_type,
            "price": price,
            "total_count": total_count
        }))).await;
        assert_eq!(status, StatusCode::CREATED, "room creation failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn book(&self, hotel_id: &str, room_id: &str, email: &str, check_in: &str, check_out: &str) -> (StatusCode, Value) {
        self.send("POST", "/api/v1/bookings", Some(booking_payload(hotel_id, room_id, email, check_in, check_out))).await
    }

    pub async fn register_user(&self, email: &str, full_name: &str) -> User {
        self.state.user_repo
            .create(&User::new(email.to_string(), full_name.to_string()))
            .await
            .expect("Failed to seed user")
    }
}

pub fn booking_payload(hotel_id: &str, room_id: &str, email: &str, check_in: &str, check_out: &str) -> Value {
    json!({
        "hotel_id": hotel_id,
        "room_id": room_id,
        "email": email,
        "full_name": "Test Guest",
        "phone_number": "+49 30 1234567",
        "check_in": check_in,
        "check_out": check_out,
        "payment_method": "CARD",
        "payment_account_number": "4111111111111111"
    })
}

pub async fn send_request(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
