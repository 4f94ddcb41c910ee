use crate::dtos::{
    kelas::{KelasPayload, KelasResponse},
    response::ApiResponse,
};
use crate::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use database::services::roster::RosterService;
use sea_orm::DatabaseConnection;

pub fn router() -> Router<DatabaseConnection> {
    Router::new()
        .route("/", get(get_all_kelas).post(create_kelas))
        .route(
            "/{id}",
            get(get_kelas_by_id).put(update_kelas).delete(delete_kelas),
        )
}

/// List all classes with their student counts
#[utoipa::path(
    get,
    path = "/api/kelas",
    responses(
        (status = 200, description = "List of classes", body = ApiResponse<Vec<KelasResponse>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Kelas"
)]
pub async fn get_all_kelas(
    State(db): State<DatabaseConnection>,
) -> Result<Json<ApiResponse<Vec<KelasResponse>>>, ApiError> {
    let kelas = RosterService::get_all_kelas(&db)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data kelas", e))?;

    let data = kelas
        .into_iter()
        .map(|(model, jumlah)| KelasResponse::with_count(model, jumlah))
        .collect();

    Ok(Json(ApiResponse::data(data)))
}

/// Get a class by id
#[utoipa::path(
    get,
    path = "/api/kelas/{id}",
    params(("id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class found", body = ApiResponse<KelasResponse>),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Kelas"
)]
pub async fn get_kelas_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<KelasResponse>>, ApiError> {
    let kelas = RosterService::get_kelas(&db, id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data kelas", e))?
        .ok_or_else(|| ApiError::NotFound("Kelas tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::data(KelasResponse::from_model(kelas))))
}

/// Create a class; the name must be unique
#[utoipa::path(
    post,
    path = "/api/kelas",
    request_body = KelasPayload,
    responses(
        (status = 201, description = "Class created", body = ApiResponse<KelasResponse>),
        (status = 400, description = "Missing or duplicate name"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Kelas"
)]
pub async fn create_kelas(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<KelasPayload>,
) -> Result<(StatusCode, Json<ApiResponse<KelasResponse>>), ApiError> {
    let nama_kelas = payload
        .nama_kelas
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Nama kelas harus diisi".to_string()))?;

    let kelas = RosterService::create_kelas(&db, nama_kelas)
        .await
        .map_err(|e| ApiError::from_write(e, "Nama kelas sudah ada", "Gagal membuat kelas"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Kelas berhasil dibuat",
            KelasResponse::from_model(kelas),
        )),
    ))
}

/// Rename a class
#[utoipa::path(
    put,
    path = "/api/kelas/{id}",
    params(("id" = i32, Path, description = "Class ID")),
    request_body = KelasPayload,
    responses(
        (status = 200, description = "Class updated", body = ApiResponse<KelasResponse>),
        (status = 400, description = "Missing or duplicate name"),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Kelas"
)]
pub async fn update_kelas(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<KelasPayload>,
) -> Result<Json<ApiResponse<KelasResponse>>, ApiError> {
    let kelas = RosterService::get_kelas(&db, id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data kelas", e))?
        .ok_or_else(|| ApiError::NotFound("Kelas tidak ditemukan".to_string()))?;

    let nama_kelas = payload
        .nama_kelas
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Nama kelas harus diisi".to_string()))?;

    let kelas = RosterService::update_kelas(&db, kelas, nama_kelas)
        .await
        .map_err(|e| ApiError::from_write(e, "Nama kelas sudah ada", "Gagal mengupdate kelas"))?;

    Ok(Json(ApiResponse::with_message(
        "Kelas berhasil diupdate",
        KelasResponse::from_model(kelas),
    )))
}

/// Delete a class; dependent students and their attendance cascade
#[utoipa::path(
    delete,
    path = "/api/kelas/{id}",
    params(("id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Kelas"
)]
pub async fn delete_kelas(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let kelas = RosterService::get_kelas(&db, id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data kelas", e))?
        .ok_or_else(|| ApiError::NotFound("Kelas tidak ditemukan".to_string()))?;

    RosterService::delete_kelas(&db, kelas)
        .await
        .map_err(|e| ApiError::internal("Gagal menghapus kelas", e))?;

    Ok(Json(ApiResponse::message("Kelas berhasil dihapus")))
}
