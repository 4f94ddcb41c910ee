use axum::Json;
use serde_json::json;

/// Service banner listing the endpoint groups
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information")
    ),
    tag = ""
)]
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "API Absensi Sekolah berjalan dengan baik!",
        "endpoints": {
            "kelas": "/api/kelas",
            "siswa": "/api/siswa",
            "guru": "/api/guru",
            "absensi": "/api/absensi",
            "absensi_guru": "/api/absensi-guru"
        }
    }))
}
