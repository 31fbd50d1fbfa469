use std::sync::Arc;

use catalog_backend::api::{HealthApi, ItemsApi};
use catalog_backend::config::{connect_database, init_logging, migrate_database};
use catalog_backend::stores::SqlItemStore;
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    // Load database URL from environment or use default
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://catalog.db?mode=rwc".to_string());

    let db = connect_database(&database_url)
        .await
        .expect("Failed to connect to database");

    migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    // Wire the item store into the API
    let item_store = Arc::new(SqlItemStore::new(db));
    let items_api = ItemsApi::new(item_store);

    // Create OpenAPI service with API implementations
    let api_service = OpenApiService::new(
        (HealthApi, items_api),
        "Catalog API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("http://localhost:3000/api");

    // Generate Swagger UI from OpenAPI service
    let ui = api_service.swagger_ui();

    // Compose routes: nest API service under /api and Swagger UI under /swagger
    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://0.0.0.0:3000");
    tracing::info!("Swagger UI available at http://localhost:3000/swagger");

    Server::new(TcpListener::bind("0.0.0.0:3000"))
        .run(app)
        .await
}
