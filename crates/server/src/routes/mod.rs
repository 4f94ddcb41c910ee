use axum::{Json, http::StatusCode};
use serde_json::json;

pub mod absensi;
pub mod absensi_guru;
pub mod guru;
pub mod health;
pub mod kelas;
pub mod root;
pub mod siswa;

/// Fallback for unknown paths
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Endpoint tidak ditemukan" })),
    )
}
