use axum::{Router, http::HeaderValue, routing::get};
use log::info;
use migration::{Migrator, MigratorTrait};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod doc;
mod dtos;
mod error;
mod export;
mod routes;
mod utils;

fn cors_layer() -> CorsLayer {
    match std::env::var("CORS_ORIGIN") {
        Ok(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .expect("CORS_ORIGIN is not a valid origin"),
            )
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => CorsLayer::permissive(),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let db = database::db::create_connection()
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    info!("Database migrated and ready");

    let app = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .nest("/api/kelas", routes::kelas::router())
        .nest("/api/siswa", routes::siswa::router())
        .nest("/api/guru", routes::guru::router())
        .nest("/api/absensi", routes::absensi::router())
        .nest("/api/absensi-guru", routes::absensi_guru::router())
        .fallback(routes::not_found)
        .layer(ServiceBuilder::new().layer(cors_layer()))
        .with_state(db)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", doc::ApiDoc::openapi()));

    let port = std::env::var("PORT").unwrap_or_else(|_| "3002".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap();
    info!("Running axum on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .unwrap();
}
