use crate::dtos::{
    absensi_guru::{
        AbsensiGuruBatchPayload, AbsensiGuruItem, AbsensiGuruItemResult, AbsensiGuruResponse,
        AbsensiGuruWithGuru, InputAbsensiGuruPayload, RekapGuruQuery,
    },
    response::ApiResponse,
};
use crate::error::ApiError;
use crate::export::{self, GuruSheetRow};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use database::services::attendance::AttendanceService;
use models::{date, rekap, status::StatusGuru};
use sea_orm::DatabaseConnection;
use std::str::FromStr;

pub fn router() -> Router<DatabaseConnection> {
    Router::new()
        .route("/", post(input_absensi_guru))
        .route("/batch", post(input_absensi_guru_batch))
        .route("/rekap", get(get_rekap_absensi_guru))
        .route("/download-excel", get(download_rekap_excel))
        .route("/{tanggal}", get(get_absensi_guru_by_tanggal))
}

/// Record one teacher's attendance for one day, overwriting on resubmit
#[utoipa::path(
    post,
    path = "/api/absensi-guru",
    request_body = InputAbsensiGuruPayload,
    responses(
        (status = 201, description = "Attendance stored", body = ApiResponse<AbsensiGuruResponse>),
        (status = 200, description = "Attendance updated", body = ApiResponse<AbsensiGuruResponse>),
        (status = 400, description = "Missing fields, bad status, or unknown teacher"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi Guru"
)]
pub async fn input_absensi_guru(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<InputAbsensiGuruPayload>,
) -> Result<(StatusCode, Json<ApiResponse<AbsensiGuruResponse>>), ApiError> {
    let (guru_id, tanggal, status) = match (payload.guru_id, &payload.tanggal, &payload.status) {
        (Some(id), Some(tanggal), Some(status)) => (id, tanggal.as_str(), status.as_str()),
        _ => {
            return Err(ApiError::Validation(
                "Guru, tanggal, dan status harus diisi".to_string(),
            ));
        }
    };

    let tanggal = date::parse_date(tanggal)
        .ok_or_else(|| ApiError::Validation("Format tanggal tidak valid".to_string()))?;
    let status = StatusGuru::from_str(status)
        .map_err(|_| ApiError::Validation("Status tidak valid".to_string()))?;

    AttendanceService::guru_exists(&db, guru_id)
        .await
        .map_err(|e| ApiError::internal("Gagal menyimpan absensi guru", e))?
        .then_some(())
        .ok_or_else(|| ApiError::Validation("Guru tidak ditemukan".to_string()))?;

    let (stored, created) =
        AttendanceService::upsert_absensi_guru(&db, guru_id, tanggal, status, payload.keterangan)
            .await
            .map_err(|e| ApiError::internal("Gagal menyimpan absensi guru", e))?;

    let (code, message) = if created {
        (StatusCode::CREATED, "Absensi guru berhasil disimpan")
    } else {
        (StatusCode::OK, "Absensi guru berhasil diupdate")
    };

    Ok((
        code,
        Json(ApiResponse::with_message(
            message,
            AbsensiGuruResponse::from_model(stored),
        )),
    ))
}

/// Record the whole teacher roster for one day, one result per item
#[utoipa::path(
    post,
    path = "/api/absensi-guru/batch",
    request_body = AbsensiGuruBatchPayload,
    responses(
        (status = 200, description = "Per-item results", body = ApiResponse<Vec<AbsensiGuruItemResult>>),
        (status = 400, description = "Missing date or data"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi Guru"
)]
pub async fn input_absensi_guru_batch(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<AbsensiGuruBatchPayload>,
) -> Result<Json<ApiResponse<Vec<AbsensiGuruItemResult>>>, ApiError> {
    let (tanggal, absensi_data) = match (&payload.tanggal, payload.absensi_data) {
        (Some(tanggal), Some(data)) => (tanggal.as_str(), data),
        _ => {
            return Err(ApiError::Validation(
                "Tanggal dan data absensi harus diisi".to_string(),
            ));
        }
    };
    let tanggal = date::parse_date(tanggal)
        .ok_or_else(|| ApiError::Validation("Format tanggal tidak valid".to_string()))?;

    let mut results = Vec::with_capacity(absensi_data.len());
    for item in absensi_data {
        let guru_id = item.guru_id;
        let (guru_id, status, keterangan) = match validate_item(item) {
            Ok(valid) => valid,
            Err(message) => {
                results.push(AbsensiGuruItemResult {
                    guru_id,
                    success: false,
                    message,
                    data: None,
                });
                continue;
            }
        };

        let outcome = async {
            let exists = AttendanceService::guru_exists(&db, guru_id).await?;
            if !exists {
                return Ok::<_, sea_orm::DbErr>(None);
            }
            let (stored, created) =
                AttendanceService::upsert_absensi_guru(&db, guru_id, tanggal, status, keterangan)
                    .await?;
            Ok(Some((stored, created)))
        }
        .await;

        results.push(match outcome {
            Ok(Some((stored, created))) => AbsensiGuruItemResult {
                guru_id: Some(guru_id),
                success: true,
                message: if created {
                    "Absensi disimpan".to_string()
                } else {
                    "Absensi diupdate".to_string()
                },
                data: Some(AbsensiGuruResponse::from_model(stored)),
            },
            Ok(None) => AbsensiGuruItemResult {
                guru_id: Some(guru_id),
                success: false,
                message: "Guru tidak ditemukan".to_string(),
                data: None,
            },
            Err(e) => AbsensiGuruItemResult {
                guru_id: Some(guru_id),
                success: false,
                message: e.to_string(),
                data: None,
            },
        });
    }

    Ok(Json(ApiResponse::with_message(
        "Proses input absensi guru selesai",
        results,
    )))
}

fn validate_item(item: AbsensiGuruItem) -> Result<(i32, StatusGuru, Option<String>), String> {
    let (guru_id, status) = match (item.guru_id, item.status) {
        (Some(id), Some(status)) => (id, status),
        _ => return Err("Guru ID dan status harus diisi".to_string()),
    };
    let status = StatusGuru::from_str(&status).map_err(|_| "Status tidak valid".to_string())?;
    Ok((guru_id, status, item.keterangan))
}

/// One day of the teacher roster, name ascending
#[utoipa::path(
    get,
    path = "/api/absensi-guru/{tanggal}",
    params(("tanggal" = String, Path, description = "Date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Attendance rows", body = ApiResponse<Vec<AbsensiGuruWithGuru>>),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi Guru"
)]
pub async fn get_absensi_guru_by_tanggal(
    State(db): State<DatabaseConnection>,
    Path(tanggal): Path<String>,
) -> Result<Json<ApiResponse<Vec<AbsensiGuruWithGuru>>>, ApiError> {
    let tanggal = date::parse_date(&tanggal)
        .ok_or_else(|| ApiError::Validation("Format tanggal tidak valid".to_string()))?;

    let rows = AttendanceService::absensi_guru_by_tanggal(&db, tanggal)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data absensi guru", e))?;

    let data = rows
        .into_iter()
        .map(|(model, guru)| AbsensiGuruWithGuru::from_join(model, guru))
        .collect();

    Ok(Json(ApiResponse::data(data)))
}

/// Recap rows, newest first. An invalid or partial date range is ignored.
#[utoipa::path(
    get,
    path = "/api/absensi-guru/rekap",
    params(RekapGuruQuery),
    responses(
        (status = 200, description = "Recap rows", body = ApiResponse<Vec<AbsensiGuruWithGuru>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi Guru"
)]
pub async fn get_rekap_absensi_guru(
    State(db): State<DatabaseConnection>,
    Query(params): Query<RekapGuruQuery>,
) -> Result<Json<ApiResponse<Vec<AbsensiGuruWithGuru>>>, ApiError> {
    let range = date::parse_range(params.start_date.as_deref(), params.end_date.as_deref());

    let rows = AttendanceService::rekap_absensi_guru(&db, params.guru_id, range)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil rekap absensi guru", e))?;

    let data = rows
        .into_iter()
        .map(|(model, guru)| AbsensiGuruWithGuru::from_join(model, guru))
        .collect();

    Ok(Json(ApiResponse::data(data)))
}

/// Export the teacher recap with a summary block
#[utoipa::path(
    get,
    path = "/api/absensi-guru/download-excel",
    params(RekapGuruQuery),
    responses(
        (status = 200, description = "Workbook attachment"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi Guru"
)]
pub async fn download_rekap_excel(
    State(db): State<DatabaseConnection>,
    Query(params): Query<RekapGuruQuery>,
) -> Result<Response, ApiError> {
    log::debug!("download rekap guru excel: {params:?}");
    let range = date::parse_range(params.start_date.as_deref(), params.end_date.as_deref());

    let rows = AttendanceService::rekap_absensi_guru(&db, params.guru_id, range)
        .await
        .map_err(|e| ApiError::internal("Gagal mengunduh file Excel", e))?;

    let counts = rekap::tally_guru(rows.iter().map(|(model, _)| model.status));
    let sheet_rows: Vec<GuruSheetRow> = rows
        .into_iter()
        .map(|(model, guru)| GuruSheetRow {
            tanggal: model.tanggal,
            nama_guru: guru.map(|g| g.nama).unwrap_or_else(|| "-".to_string()),
            status: model.status.label().to_string(),
            keterangan: model.keterangan.unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let bytes = export::rekap_guru_sheet(&sheet_rows, counts, date::total_hari(range))
        .map_err(|e| ApiError::export("Gagal membuat file Excel", e))?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S");
    let filename = format!("rekap_absensi_guru_{timestamp}.xlsx");
    Ok(export::xlsx_response(&filename, bytes))
}
