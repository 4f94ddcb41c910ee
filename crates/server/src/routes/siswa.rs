use crate::dtos::{
    response::ApiResponse,
    siswa::{SiswaBatchPayload, SiswaPayload, SiswaResponse},
};
use crate::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use database::services::roster::RosterService;
use sea_orm::{DatabaseConnection, DbErr};

pub fn router() -> Router<DatabaseConnection> {
    Router::new()
        .route("/", get(get_all_siswa).post(create_siswa))
        .route("/batch", post(create_siswa_batch))
        .route("/kelas/{kelas_id}", get(get_siswa_by_kelas))
        .route(
            "/{id}",
            get(get_siswa_by_id).put(update_siswa).delete(delete_siswa),
        )
}

/// List all students with their classes
#[utoipa::path(
    get,
    path = "/api/siswa",
    responses(
        (status = 200, description = "List of students", body = ApiResponse<Vec<SiswaResponse>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Siswa"
)]
pub async fn get_all_siswa(
    State(db): State<DatabaseConnection>,
) -> Result<Json<ApiResponse<Vec<SiswaResponse>>>, ApiError> {
    let siswa = RosterService::get_all_siswa(&db)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data siswa", e))?;

    let data = siswa
        .into_iter()
        .map(|(model, kelas)| SiswaResponse::with_kelas(model, kelas))
        .collect();

    Ok(Json(ApiResponse::data(data)))
}

/// List the students of one class
#[utoipa::path(
    get,
    path = "/api/siswa/kelas/{kelas_id}",
    params(("kelas_id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Students in the class", body = ApiResponse<Vec<SiswaResponse>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Siswa"
)]
pub async fn get_siswa_by_kelas(
    State(db): State<DatabaseConnection>,
    Path(kelas_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<SiswaResponse>>>, ApiError> {
    let siswa = RosterService::get_siswa_by_kelas(&db, kelas_id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data siswa", e))?;

    let data = siswa
        .into_iter()
        .map(|(model, kelas)| SiswaResponse::with_kelas(model, kelas))
        .collect();

    Ok(Json(ApiResponse::data(data)))
}

/// Get a student by id
#[utoipa::path(
    get,
    path = "/api/siswa/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = ApiResponse<SiswaResponse>),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Siswa"
)]
pub async fn get_siswa_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SiswaResponse>>, ApiError> {
    let (model, kelas) = RosterService::get_siswa(&db, id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data siswa", e))?
        .ok_or_else(|| ApiError::NotFound("Siswa tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::data(SiswaResponse::with_kelas(
        model, kelas,
    ))))
}

/// Create a student in an existing class
#[utoipa::path(
    post,
    path = "/api/siswa",
    request_body = SiswaPayload,
    responses(
        (status = 201, description = "Student created", body = ApiResponse<SiswaResponse>),
        (status = 400, description = "Missing fields or unknown class"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Siswa"
)]
pub async fn create_siswa(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<SiswaPayload>,
) -> Result<(StatusCode, Json<ApiResponse<SiswaResponse>>), ApiError> {
    let (nama, kelas_id) = match (payload.nama, payload.kelas_id) {
        (Some(nama), Some(kelas_id)) if !nama.trim().is_empty() => (nama, kelas_id),
        _ => return Err(ApiError::Validation("Nama dan kelas harus diisi".to_string())),
    };

    RosterService::get_kelas(&db, kelas_id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data kelas", e))?
        .ok_or_else(|| ApiError::Validation("Kelas tidak ditemukan".to_string()))?;

    let siswa = RosterService::create_siswa(&db, nama, kelas_id)
        .await
        .map_err(|e| ApiError::internal("Gagal menambahkan siswa", e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Siswa berhasil ditambahkan",
            SiswaResponse::from_model(siswa),
        )),
    ))
}

/// Create many students at once. All class references are validated before
/// anything is written; one bad reference rejects the whole batch.
#[utoipa::path(
    post,
    path = "/api/siswa/batch",
    request_body = SiswaBatchPayload,
    responses(
        (status = 201, description = "Students created", body = ApiResponse<Vec<SiswaResponse>>),
        (status = 400, description = "Empty batch or invalid class reference"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Siswa"
)]
pub async fn create_siswa_batch(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<SiswaBatchPayload>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<SiswaResponse>>>), ApiError> {
    let siswa_list = payload
        .siswa
        .filter(|list| !list.is_empty())
        .ok_or_else(|| ApiError::Validation("Data siswa kosong!".to_string()))?;

    let mut items = Vec::with_capacity(siswa_list.len());
    for item in siswa_list {
        match (item.nama, item.kelas_id) {
            (Some(nama), Some(kelas_id)) if !nama.trim().is_empty() => {
                items.push((nama, kelas_id));
            }
            _ => {
                return Err(ApiError::Validation(
                    "Setiap siswa harus punya nama dan kelas_id".to_string(),
                ));
            }
        }
    }

    let created = RosterService::create_siswa_batch(&db, items)
        .await
        .map_err(|e| match e {
            DbErr::Custom(message) => ApiError::Validation(message),
            e => ApiError::internal("Gagal menambahkan siswa", e),
        })?;

    let data = created.into_iter().map(SiswaResponse::from_model).collect();
    Ok((StatusCode::CREATED, Json(ApiResponse::data(data))))
}

/// Update a student; a changed class reference must exist
#[utoipa::path(
    put,
    path = "/api/siswa/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = SiswaPayload,
    responses(
        (status = 200, description = "Student updated", body = ApiResponse<SiswaResponse>),
        (status = 400, description = "Unknown class"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Siswa"
)]
pub async fn update_siswa(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<SiswaPayload>,
) -> Result<Json<ApiResponse<SiswaResponse>>, ApiError> {
    let (model, _) = RosterService::get_siswa(&db, id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data siswa", e))?
        .ok_or_else(|| ApiError::NotFound("Siswa tidak ditemukan".to_string()))?;

    if let Some(kelas_id) = payload.kelas_id {
        RosterService::get_kelas(&db, kelas_id)
            .await
            .map_err(|e| ApiError::internal("Gagal mengambil data kelas", e))?
            .ok_or_else(|| ApiError::Validation("Kelas tidak ditemukan".to_string()))?;
    }

    let siswa = RosterService::update_siswa(&db, model, payload.nama, payload.kelas_id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengupdate siswa", e))?;

    Ok(Json(ApiResponse::with_message(
        "Siswa berhasil diupdate",
        SiswaResponse::from_model(siswa),
    )))
}

/// Delete a student; their attendance rows cascade
#[utoipa::path(
    delete,
    path = "/api/siswa/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Siswa"
)]
pub async fn delete_siswa(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let (model, _) = RosterService::get_siswa(&db, id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data siswa", e))?
        .ok_or_else(|| ApiError::NotFound("Siswa tidak ditemukan".to_string()))?;

    RosterService::delete_siswa(&db, model)
        .await
        .map_err(|e| ApiError::internal("Gagal menghapus siswa", e))?;

    Ok(Json(ApiResponse::message("Siswa berhasil dihapus")))
}
