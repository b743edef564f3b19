mod common;

use axum::http::StatusCode;
use common::{booking_payload, send_request, TestApp};
use hotel_booking::{
    config::Config,
    domain::models::booking::BookingRequest,
    domain::models::hotel::{Hotel, NewHotelParams},
    domain::models::room::{NewRoomParams, Room, RoomType},
    error::AppError,
    infra::repositories::{
        postgres_booking_repo::PostgresBookingRepo, postgres_hotel_repo::PostgresHotelRepo,
        postgres_room_repo::PostgresRoomRepo, postgres_user_repo::PostgresUserRepo,
    },
    state::AppState,
};
use chrono::{TimeZone, Utc};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::task::JoinSet;

async fn race(app: &TestApp, hotel_id: &str, room_id: &str, attempts: usize) -> Vec<(StatusCode, serde_json::Value)> {
    let mut set = JoinSet::new();

    for i in 0..attempts {
        let router = app.router.clone();
        let payload = booking_payload(hotel_id, room_id, &format!("racer{}@example.com", i), "2024-08-01T00:00:00Z", "2024-08-04T00:00:00Z");
        set.spawn(async move {
            send_request(router, "POST", "/api/v1/bookings", Some(payload)).await
        });
    }

    let mut results = Vec::new();
    while let Some(res) = set.join_next().await {
        results.push(res.expect("booking task panicked"));
    }
    results
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_slot_is_admitted_exactly_once() {
    let app = TestApp::new().await;
    let hotel_id = app.create_hotel("Harbor View", "Lisbon", 120.0).await;
    let room_id = app.create_room(&hotel_id, "DELUXE", 100.0, 1).await;

    let results = race(&app, &hotel_id, &room_id, 8).await;

    let created = results.iter().filter(|(s, _)| *s == StatusCode::CREATED).count();
    let rejected = results.iter().filter(|(s, _)| *s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1, "results: {:?}", results);
    assert_eq!(rejected, 7, "results: {:?}", results);

    for (status, body) in &results {
        if *status == StatusCode::CONFLICT {
            assert_eq!(body["available_slots"], 0);
        }
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE room_id = ?")
        .bind(&room_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_admissions_never_exceed_total_count() {
    let app = TestApp::new().await;
    let hotel_id = app.create_hotel("Harbor View", "Lisbon", 120.0).await;
    let room_id = app.create_room(&hotel_id, "PREMIER", 300.0, 3).await;

    let results = race(&app, &hotel_id, &room_id, 12).await;

    let created = results.iter().filter(|(s, _)| *s == StatusCode::CREATED).count();
    assert_eq!(created, 3, "results: {:?}", results);
    assert!(results.iter().all(|(s, _)| *s == StatusCode::CREATED || *s == StatusCode::CONFLICT));

    let (_, admin) = app.send("GET", "/api/v1/admin/bookings", None).await;
    let bookings = admin["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 3);
    assert!(bookings.iter().all(|b| b["available_slots"] == 0));
}

#[tokio::test]
async fn test_postgres_admission_race() {
    let Ok(db_url) = std::env::var("DATABASE_URL") else {
        println!("Skipping Postgres admission race (DATABASE_URL not set)");
        return;
    };
    if !db_url.starts_with("postgres") {
        println!("Skipping Postgres admission race (not targeting Postgres)");
        return;
    }

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&db_url)
        .await
        .expect("Failed to connect to DB");

    sqlx::migrate!("./migrations/postgres").run(&pool).await.unwrap();

    let state = AppState::new(
        Config { database_url: db_url.clone(), port: 0 },
        Arc::new(PostgresHotelRepo::new(pool.clone())),
        Arc::new(PostgresRoomRepo::new(pool.clone())),
        Arc::new(PostgresBookingRepo::new(pool.clone())),
        Arc::new(PostgresUserRepo::new(pool.clone())),
    );

    let hotel = state.hotel_repo.create(&Hotel::new(NewHotelParams {
        name: "Race Hotel".into(),
        description: "Concurrency fixture".into(),
        address: "1 Race Road".into(),
        city: "Berlin".into(),
        price: 100.0,
        class_hotel: 3,
        facilities: "Wifi".into(),
        images: String::new(),
    })).await.unwrap();

    let room = state.room_repo.create(&Room::new(NewRoomParams {
        hotel_id: hotel.id.clone(),
        room_type: RoomType::Junior,
        description: None,
        price: 80.0,
        capacity: None,
        total_count: Some(2),
    })).await.unwrap();

    let service = state.booking_service.clone();
    let mut set = JoinSet::new();

    for i in 0..10 {
        let service = service.clone();
        let request = BookingRequest {
            hotel_id: hotel.id.clone(),
            room_id: room.id.clone(),
            email: format!("pg-racer{}@example.com", i),
            full_name: "Racer".into(),
            phone: "555".into(),
            check_in: Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(),
            check_out: Utc.with_ymd_and_hms(2024, 9, 3, 0, 0, 0).unwrap(),
            payment_method: None,
            payment_account_number: None,
            notes: None,
        };
        set.spawn(async move { service.create_booking(request).await });
    }

    let mut admitted = 0;
    while let Some(res) = set.join_next().await {
        match res.unwrap() {
            Ok(_) => admitted += 1,
            Err(AppError::NoAvailability { available_slots }) => assert!(available_slots <= 0),
            Err(e) => panic!("unexpected admission error: {}", e),
        }
    }

    assert_eq!(admitted, 2);
}
