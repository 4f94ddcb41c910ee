use crate::dtos::{
    guru::{GuruBatchPayload, GuruBatchResult, GuruPayload, GuruResponse},
    response::ApiResponse,
};
use crate::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use database::services::roster::RosterService;
use sea_orm::DatabaseConnection;

pub fn router() -> Router<DatabaseConnection> {
    Router::new()
        .route("/", get(get_all_guru).post(create_guru))
        .route("/batch", post(create_guru_batch))
        .route(
            "/{id}",
            get(get_guru_by_id).put(update_guru).delete(delete_guru),
        )
}

/// List all teachers, name ascending
#[utoipa::path(
    get,
    path = "/api/guru",
    responses(
        (status = 200, description = "List of teachers", body = ApiResponse<Vec<GuruResponse>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Guru"
)]
pub async fn get_all_guru(
    State(db): State<DatabaseConnection>,
) -> Result<Json<ApiResponse<Vec<GuruResponse>>>, ApiError> {
    let guru = RosterService::get_all_guru(&db)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data guru", e))?;

    let data = guru.into_iter().map(GuruResponse::from_model).collect();
    Ok(Json(ApiResponse::data(data)))
}

/// Get a teacher by id
#[utoipa::path(
    get,
    path = "/api/guru/{id}",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher found", body = ApiResponse<GuruResponse>),
        (status = 404, description = "Teacher not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Guru"
)]
pub async fn get_guru_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<GuruResponse>>, ApiError> {
    let guru = RosterService::get_guru(&db, id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data guru", e))?
        .ok_or_else(|| ApiError::NotFound("Guru tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::data(GuruResponse::from_model(guru))))
}

/// Create a teacher
#[utoipa::path(
    post,
    path = "/api/guru",
    request_body = GuruPayload,
    responses(
        (status = 201, description = "Teacher created", body = ApiResponse<GuruResponse>),
        (status = 400, description = "Missing name"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Guru"
)]
pub async fn create_guru(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<GuruPayload>,
) -> Result<(StatusCode, Json<ApiResponse<GuruResponse>>), ApiError> {
    let nama = payload
        .nama
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Nama harus diisi".to_string()))?;

    let guru = RosterService::create_guru(&db, nama)
        .await
        .map_err(|e| ApiError::internal("Gagal menambahkan guru", e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Guru berhasil ditambahkan",
            GuruResponse::from_model(guru),
        )),
    ))
}

/// Create many teachers at once, reporting each item independently.
/// Blank and duplicate names are skipped, not fatal.
#[utoipa::path(
    post,
    path = "/api/guru/batch",
    request_body = GuruBatchPayload,
    responses(
        (status = 200, description = "Per-item results", body = ApiResponse<Vec<GuruBatchResult>>),
        (status = 400, description = "Empty batch"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Guru"
)]
pub async fn create_guru_batch(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<GuruBatchPayload>,
) -> Result<Json<ApiResponse<Vec<GuruBatchResult>>>, ApiError> {
    let guru_list = payload.guru_list.filter(|list| !list.is_empty()).ok_or_else(|| {
        ApiError::Validation("Data guru harus berupa array dan tidak boleh kosong".to_string())
    })?;

    let mut results = Vec::with_capacity(guru_list.len());
    for item in guru_list {
        let nama = match item.nama {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            other => {
                results.push(GuruBatchResult {
                    nama: other.unwrap_or_else(|| "N/A".to_string()),
                    success: false,
                    message: "Nama guru harus diisi".to_string(),
                    data: None,
                });
                continue;
            }
        };

        let existing = RosterService::find_guru_by_nama(&db, &nama)
            .await
            .map_err(|e| ApiError::internal("Gagal memproses data guru", e))?;
        if existing.is_some() {
            results.push(GuruBatchResult {
                nama,
                success: false,
                message: "Guru dengan nama ini sudah ada".to_string(),
                data: None,
            });
            continue;
        }

        match RosterService::create_guru(&db, nama.clone()).await {
            Ok(guru) => results.push(GuruBatchResult {
                nama,
                success: true,
                message: "Guru berhasil ditambahkan".to_string(),
                data: Some(GuruResponse::from_model(guru)),
            }),
            Err(e) => results.push(GuruBatchResult {
                nama,
                success: false,
                message: e.to_string(),
                data: None,
            }),
        }
    }

    Ok(Json(ApiResponse::with_message(
        "Proses batch guru selesai",
        results,
    )))
}

/// Rename a teacher
#[utoipa::path(
    put,
    path = "/api/guru/{id}",
    params(("id" = i32, Path, description = "Teacher ID")),
    request_body = GuruPayload,
    responses(
        (status = 200, description = "Teacher updated", body = ApiResponse<GuruResponse>),
        (status = 400, description = "Missing name"),
        (status = 404, description = "Teacher not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Guru"
)]
pub async fn update_guru(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<GuruPayload>,
) -> Result<Json<ApiResponse<GuruResponse>>, ApiError> {
    let guru = RosterService::get_guru(&db, id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data guru", e))?
        .ok_or_else(|| ApiError::NotFound("Guru tidak ditemukan".to_string()))?;

    let nama = payload
        .nama
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Nama harus diisi".to_string()))?;

    let guru = RosterService::update_guru(&db, guru, nama)
        .await
        .map_err(|e| ApiError::internal("Gagal mengupdate guru", e))?;

    Ok(Json(ApiResponse::with_message(
        "Guru berhasil diupdate",
        GuruResponse::from_model(guru),
    )))
}

/// Delete a teacher; their attendance rows cascade
#[utoipa::path(
    delete,
    path = "/api/guru/{id}",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher deleted"),
        (status = 404, description = "Teacher not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Guru"
)]
pub async fn delete_guru(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let guru = RosterService::get_guru(&db, id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data guru", e))?
        .ok_or_else(|| ApiError::NotFound("Guru tidak ditemukan".to_string()))?;

    RosterService::delete_guru(&db, guru)
        .await
        .map_err(|e| ApiError::internal("Gagal menghapus guru", e))?;

    Ok(Json(ApiResponse::message("Guru berhasil dihapus")))
}
