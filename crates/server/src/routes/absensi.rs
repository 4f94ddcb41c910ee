use crate::dtos::{
    absensi::{
        AbsensiBatchPayload, AbsensiItem, AbsensiItemResult, AbsensiResponse, AbsensiWithSiswa,
        ExportQuery, InputAbsensiPayload, RekapDetail, RekapKelasQuery, RekapQuery,
        RekapSiswaEntry,
    },
    response::ApiResponse,
    siswa::{KelasRef, SiswaResponse},
};
use crate::error::ApiError;
use crate::export::{self, SiswaSheetRow};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use database::{
    entities::{absensi, siswa},
    services::{attendance::AttendanceService, roster::RosterService},
};
use models::{date, rekap::StatusCounts, status::StatusSiswa};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::str::FromStr;

pub fn router() -> Router<DatabaseConnection> {
    Router::new()
        .route("/", post(input_absensi))
        .route("/batch", post(input_absensi_batch))
        .route("/rekap", get(get_rekap_absensi))
        .route("/rekap/kelas", get(get_rekap_absensi_kelas))
        .route("/rekap/excel", get(download_rekap_excel))
        .route("/rekap/excel-all", get(download_rekap_excel_all))
        .route("/{tanggal}/{kelas_id}", get(get_absensi_by_tanggal_kelas))
}

/// Record one student's attendance for one day. Resubmitting the same
/// (student, date) overwrites the stored status instead of duplicating.
#[utoipa::path(
    post,
    path = "/api/absensi",
    request_body = InputAbsensiPayload,
    responses(
        (status = 201, description = "Attendance stored", body = ApiResponse<AbsensiResponse>),
        (status = 200, description = "Attendance updated", body = ApiResponse<AbsensiResponse>),
        (status = 400, description = "Missing fields, bad status, or unknown student"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi"
)]
pub async fn input_absensi(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<InputAbsensiPayload>,
) -> Result<(StatusCode, Json<ApiResponse<AbsensiResponse>>), ApiError> {
    let (siswa_id, tanggal, status) = match (payload.siswa_id, &payload.tanggal, &payload.status) {
        (Some(id), Some(tanggal), Some(status)) => (id, tanggal.as_str(), status.as_str()),
        _ => {
            return Err(ApiError::Validation(
                "Siswa, tanggal, dan status harus diisi".to_string(),
            ));
        }
    };

    let tanggal = date::parse_date(tanggal)
        .ok_or_else(|| ApiError::Validation("Format tanggal tidak valid".to_string()))?;
    let status = StatusSiswa::from_str(status)
        .map_err(|_| ApiError::Validation("Status tidak valid".to_string()))?;

    AttendanceService::siswa_exists(&db, siswa_id)
        .await
        .map_err(|e| ApiError::internal("Gagal menyimpan absensi", e))?
        .then_some(())
        .ok_or_else(|| ApiError::Validation("Siswa tidak ditemukan".to_string()))?;

    let (stored, created) =
        AttendanceService::upsert_absensi(&db, siswa_id, tanggal, status, payload.keterangan)
            .await
            .map_err(|e| ApiError::internal("Gagal menyimpan absensi", e))?;

    let (code, message) = if created {
        (StatusCode::CREATED, "Absensi berhasil disimpan")
    } else {
        (StatusCode::OK, "Absensi berhasil diupdate")
    };

    Ok((
        code,
        Json(ApiResponse::with_message(
            message,
            AbsensiResponse::from_model(stored),
        )),
    ))
}

/// Record a whole class for one day. Items succeed or fail independently;
/// the response carries one result per submitted item.
#[utoipa::path(
    post,
    path = "/api/absensi/batch",
    request_body = AbsensiBatchPayload,
    responses(
        (status = 200, description = "Per-item results", body = ApiResponse<Vec<AbsensiItemResult>>),
        (status = 400, description = "Missing class, date, or data"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi"
)]
pub async fn input_absensi_batch(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<AbsensiBatchPayload>,
) -> Result<Json<ApiResponse<Vec<AbsensiItemResult>>>, ApiError> {
    let (tanggal, absensi_data) = match (payload.kelas_id, &payload.tanggal, payload.absensi_data)
    {
        (Some(_), Some(tanggal), Some(data)) => (tanggal.as_str(), data),
        _ => {
            return Err(ApiError::Validation(
                "Kelas, tanggal, dan data absensi harus diisi".to_string(),
            ));
        }
    };
    let tanggal = date::parse_date(tanggal)
        .ok_or_else(|| ApiError::Validation("Format tanggal tidak valid".to_string()))?;

    let mut results = Vec::with_capacity(absensi_data.len());
    for item in absensi_data {
        let siswa_id = item.siswa_id;
        let (siswa_id, status, keterangan) = match validate_item(item) {
            Ok(valid) => valid,
            Err(message) => {
                results.push(AbsensiItemResult {
                    siswa_id,
                    success: false,
                    message,
                    data: None,
                });
                continue;
            }
        };

        let outcome = async {
            let exists = AttendanceService::siswa_exists(&db, siswa_id).await?;
            if !exists {
                return Ok::<_, sea_orm::DbErr>(None);
            }
            let (stored, created) =
                AttendanceService::upsert_absensi(&db, siswa_id, tanggal, status, keterangan)
                    .await?;
            Ok(Some((stored, created)))
        }
        .await;

        results.push(match outcome {
            Ok(Some((stored, created))) => AbsensiItemResult {
                siswa_id: Some(siswa_id),
                success: true,
                message: if created {
                    "Absensi disimpan".to_string()
                } else {
                    "Absensi diupdate".to_string()
                },
                data: Some(AbsensiResponse::from_model(stored)),
            },
            Ok(None) => AbsensiItemResult {
                siswa_id: Some(siswa_id),
                success: false,
                message: "Siswa tidak ditemukan".to_string(),
                data: None,
            },
            Err(e) => AbsensiItemResult {
                siswa_id: Some(siswa_id),
                success: false,
                message: e.to_string(),
                data: None,
            },
        });
    }

    Ok(Json(ApiResponse::with_message(
        "Proses input absensi selesai",
        results,
    )))
}

/// One item of a batch submission, checked before touching the database.
fn validate_item(item: AbsensiItem) -> Result<(i32, StatusSiswa, Option<String>), String> {
    let (siswa_id, status) = match (item.siswa_id, item.status) {
        (Some(id), Some(status)) => (id, status),
        _ => return Err("Siswa ID dan status harus diisi".to_string()),
    };
    let status =
        StatusSiswa::from_str(&status).map_err(|_| "Status tidak valid".to_string())?;
    Ok((siswa_id, status, item.keterangan))
}

/// One day of one class, student name ascending
#[utoipa::path(
    get,
    path = "/api/absensi/{tanggal}/{kelas_id}",
    params(
        ("tanggal" = String, Path, description = "Date, YYYY-MM-DD"),
        ("kelas_id" = i32, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Attendance rows", body = ApiResponse<Vec<AbsensiWithSiswa>>),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi"
)]
pub async fn get_absensi_by_tanggal_kelas(
    State(db): State<DatabaseConnection>,
    Path((tanggal, kelas_id)): Path<(String, i32)>,
) -> Result<Json<ApiResponse<Vec<AbsensiWithSiswa>>>, ApiError> {
    let tanggal = date::parse_date(&tanggal)
        .ok_or_else(|| ApiError::Validation("Format tanggal tidak valid".to_string()))?;

    let kelas = RosterService::get_kelas(&db, kelas_id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data absensi", e))?;

    let rows = AttendanceService::absensi_by_tanggal_kelas(&db, tanggal, kelas_id)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil data absensi", e))?;

    let data = rows
        .into_iter()
        .map(|(model, s)| AbsensiWithSiswa::from_join(model, s, kelas.clone()))
        .collect();

    Ok(Json(ApiResponse::data(data)))
}

/// Aggregated recap per student, optionally filtered by student and range
#[utoipa::path(
    get,
    path = "/api/absensi/rekap",
    params(RekapQuery),
    responses(
        (status = 200, description = "Recap entries", body = ApiResponse<Vec<RekapSiswaEntry>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi"
)]
pub async fn get_rekap_absensi(
    State(db): State<DatabaseConnection>,
    Query(params): Query<RekapQuery>,
) -> Result<Json<ApiResponse<Vec<RekapSiswaEntry>>>, ApiError> {
    let range = date::parse_range(params.start_date.as_deref(), params.end_date.as_deref());

    let rows = AttendanceService::rekap_absensi(&db, params.siswa_id, None, range)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil rekap absensi", e))?;
    let kelas_map = RosterService::kelas_name_map(&db)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil rekap absensi", e))?;

    Ok(Json(ApiResponse::data(build_rekap(rows, &kelas_map))))
}

/// Aggregated recap per student for one class
#[utoipa::path(
    get,
    path = "/api/absensi/rekap/kelas",
    params(RekapKelasQuery),
    responses(
        (status = 200, description = "Recap entries", body = ApiResponse<Vec<RekapSiswaEntry>>),
        (status = 400, description = "Missing class id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi"
)]
pub async fn get_rekap_absensi_kelas(
    State(db): State<DatabaseConnection>,
    Query(params): Query<RekapKelasQuery>,
) -> Result<Json<ApiResponse<Vec<RekapSiswaEntry>>>, ApiError> {
    let kelas_id = params
        .kelas_id
        .ok_or_else(|| ApiError::Validation("ID kelas harus diisi".to_string()))?;
    let range = date::parse_range(params.start_date.as_deref(), params.end_date.as_deref());

    let rows = AttendanceService::rekap_absensi(&db, None, Some(kelas_id), range)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil rekap absensi kelas", e))?;
    let kelas_map = RosterService::kelas_name_map(&db)
        .await
        .map_err(|e| ApiError::internal("Gagal mengambil rekap absensi kelas", e))?;

    Ok(Json(ApiResponse::data(build_rekap(rows, &kelas_map))))
}

/// Groups recap rows per student, keeping first-seen order. Counts are
/// counts of rows that exist, never calendar days.
fn build_rekap(
    rows: Vec<(absensi::Model, Option<siswa::Model>)>,
    kelas_map: &HashMap<i32, String>,
) -> Vec<RekapSiswaEntry> {
    let mut order: Vec<i32> = Vec::new();
    let mut entries: HashMap<i32, (Option<SiswaResponse>, StatusCounts, Vec<RekapDetail>)> =
        HashMap::new();

    for (model, siswa) in rows {
        let entry = entries.entry(model.siswa_id).or_insert_with(|| {
            order.push(model.siswa_id);
            let siswa = siswa.map(|s| {
                let kelas = kelas_map.get(&s.kelas_id).map(|nama| KelasRef {
                    id: s.kelas_id,
                    nama_kelas: nama.clone(),
                });
                SiswaResponse {
                    id: s.id,
                    nama: s.nama,
                    kelas_id: s.kelas_id,
                    kelas,
                }
            });
            (siswa, StatusCounts::new(), Vec::new())
        });

        entry.1.add_siswa(model.status);
        entry.2.push(RekapDetail {
            tanggal: model.tanggal,
            status: model.status.as_str().to_string(),
            keterangan: model.keterangan,
        });
    }

    order
        .into_iter()
        .filter_map(|id| entries.remove(&id))
        .map(|(siswa, counts, detail)| RekapSiswaEntry {
            siswa,
            total: counts.total(),
            sakit: counts.sakit,
            izin: counts.izin,
            alpa: counts.alpa,
            terlambat: counts.terlambat,
            persentase_kehadiran: counts.persentase_kehadiran(),
            detail,
        })
        .collect()
}

/// Export the filtered recap as a spreadsheet
#[utoipa::path(
    get,
    path = "/api/absensi/rekap/excel",
    params(ExportQuery),
    responses(
        (status = 200, description = "Workbook attachment"),
        (status = 400, description = "Missing filters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi"
)]
pub async fn download_rekap_excel(
    State(db): State<DatabaseConnection>,
    Query(params): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    log::debug!("download rekap excel: {params:?}");
    let (kelas_id, start, end) = match (params.kelas_id, &params.start_date, &params.end_date) {
        (Some(id), Some(start), Some(end)) => (id, start.as_str(), end.as_str()),
        _ => {
            return Err(ApiError::Validation(
                "kelas_id, start_date, dan end_date wajib diisi!".to_string(),
            ));
        }
    };
    let range = date::parse_range(Some(start), Some(end))
        .ok_or_else(|| ApiError::Validation("Format tanggal tidak valid".to_string()))?;

    let rows = AttendanceService::export_rows(&db, Some(kelas_id), Some(range))
        .await
        .map_err(|e| ApiError::internal("Gagal mengunduh rekap absensi", e))?;
    let kelas_map = RosterService::kelas_name_map(&db)
        .await
        .map_err(|e| ApiError::internal("Gagal mengunduh rekap absensi", e))?;

    let bytes = export::rekap_siswa_sheet(&sheet_rows(rows, &kelas_map))
        .map_err(|e| ApiError::export("Gagal membuat file Excel", e))?;
    Ok(export::xlsx_response("rekap-absensi.xlsx", bytes))
}

/// Export every attendance row as a spreadsheet
#[utoipa::path(
    get,
    path = "/api/absensi/rekap/excel-all",
    responses(
        (status = 200, description = "Workbook attachment"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Absensi"
)]
pub async fn download_rekap_excel_all(
    State(db): State<DatabaseConnection>,
) -> Result<Response, ApiError> {
    let rows = AttendanceService::export_rows(&db, None, None)
        .await
        .map_err(|e| ApiError::internal("Gagal mengunduh rekap absensi", e))?;
    let kelas_map = RosterService::kelas_name_map(&db)
        .await
        .map_err(|e| ApiError::internal("Gagal mengunduh rekap absensi", e))?;

    let bytes = export::rekap_siswa_sheet(&sheet_rows(rows, &kelas_map))
        .map_err(|e| ApiError::export("Gagal membuat file Excel", e))?;
    Ok(export::xlsx_response("rekap-absensi-semua.xlsx", bytes))
}

fn sheet_rows(
    rows: Vec<(absensi::Model, Option<siswa::Model>)>,
    kelas_map: &HashMap<i32, String>,
) -> Vec<SiswaSheetRow> {
    rows.into_iter()
        .map(|(model, siswa)| {
            let (nama, kelas) = match siswa {
                Some(s) => {
                    let kelas = kelas_map.get(&s.kelas_id).cloned().unwrap_or_default();
                    (s.nama, kelas)
                }
                None => (String::new(), String::new()),
            };
            SiswaSheetRow {
                tanggal: model.tanggal,
                kelas,
                nama,
                status: model.status.label().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn item(siswa_id: Option<i32>, status: Option<&str>) -> AbsensiItem {
        AbsensiItem {
            siswa_id,
            status: status.map(str::to_string),
            keterangan: None,
        }
    }

    #[test]
    fn test_validate_item_requires_id_and_status() {
        assert!(validate_item(item(None, Some("sakit"))).is_err());
        assert!(validate_item(item(Some(7), None)).is_err());
        assert_eq!(
            validate_item(item(Some(7), Some("sakit"))).unwrap(),
            (7, StatusSiswa::Sakit, None)
        );
    }

    #[test]
    fn test_validate_item_rejects_hadir_for_students() {
        let err = validate_item(item(Some(7), Some("hadir"))).unwrap_err();
        assert_eq!(err, "Status tidak valid");
    }

    fn row(
        siswa_id: i32,
        tanggal: NaiveDate,
        status: StatusSiswa,
    ) -> (absensi::Model, Option<siswa::Model>) {
        let now = chrono::Utc::now().naive_utc();
        (
            absensi::Model {
                id: siswa_id * 100 + tanggal.ordinal() as i32,
                siswa_id,
                tanggal,
                status,
                keterangan: None,
                created_at: now,
                updated_at: now,
            },
            Some(siswa::Model {
                id: siswa_id,
                nama: format!("Siswa {siswa_id}"),
                kelas_id: 1,
                created_at: now,
                updated_at: now,
            }),
        )
    }

    #[test]
    fn test_build_rekap_groups_by_student() {
        let d1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let kelas_map = HashMap::from([(1, "VII A".to_string())]);

        let entries = build_rekap(
            vec![
                row(7, d1, StatusSiswa::Sakit),
                row(8, d1, StatusSiswa::Alpa),
                row(7, d2, StatusSiswa::Terlambat),
            ],
            &kelas_map,
        );

        assert_eq!(entries.len(), 2);
        let first = &entries[0];
        assert_eq!(first.total, 2);
        assert_eq!(first.sakit, 1);
        assert_eq!(first.terlambat, 1);
        assert_eq!(first.persentase_kehadiran, 0);
        assert_eq!(first.detail.len(), 2);
        assert_eq!(
            first.siswa.as_ref().unwrap().kelas.as_ref().unwrap().nama_kelas,
            "VII A"
        );
    }

    #[test]
    fn test_build_rekap_empty_rows() {
        let entries = build_rekap(vec![], &HashMap::new());
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_batch_stores_valid_items_and_flags_invalid_ones() {
        use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

        let tanggal = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        // one submission = exists check, pre-read, upsert, re-fetch
        let mut mock = MockDatabase::new(DatabaseBackend::MySql);
        for siswa_id in [1, 2, 3, 4] {
            let (stored, siswa) = row(siswa_id, tanggal, StatusSiswa::Sakit);
            mock = mock
                .append_query_results([vec![siswa.unwrap()]])
                .append_query_results([Vec::<absensi::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: stored.id as u64,
                    rows_affected: 1,
                }])
                .append_query_results([vec![stored]]);
        }
        let db = mock.into_connection();

        let payload = AbsensiBatchPayload {
            kelas_id: Some(1),
            tanggal: Some("2024-03-01".to_string()),
            absensi_data: Some(vec![
                item(Some(1), Some("sakit")),
                item(Some(2), Some("sakit")),
                item(Some(5), None),
                item(Some(3), Some("sakit")),
                item(Some(4), Some("sakit")),
            ]),
        };

        let Json(body) = input_absensi_batch(State(db.clone()), Json(payload))
            .await
            .unwrap();
        let results = body.data.unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results.iter().filter(|r| r.success).count(), 4);
        assert!(!results[2].success);
        assert_eq!(results[2].message, "Siswa ID dan status harus diisi");
        assert_eq!(results[2].siswa_id, Some(5));

        // the invalid item never reaches the database
        let inserts = db
            .into_transaction_log()
            .iter()
            .filter(|t| format!("{t:?}").contains("INSERT INTO"))
            .count();
        assert_eq!(inserts, 4);
    }
}
