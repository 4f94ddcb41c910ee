use axum::http::StatusCode;

/// Liveness probe. Answers without touching the database, so it stays
/// green even when the attendance store is unreachable.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Attendance service is up", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
