#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    hotel_booking::run().await;
}
