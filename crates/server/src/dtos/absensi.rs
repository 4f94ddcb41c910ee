use crate::dtos::siswa::SiswaResponse;
use chrono::NaiveDate;
use database::entities::{absensi, kelas, siswa};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct AbsensiResponse {
    pub id: i32,
    pub siswa_id: i32,
    pub tanggal: NaiveDate,
    pub status: String,
    pub keterangan: Option<String>,
}

impl AbsensiResponse {
    pub fn from_model(model: absensi::Model) -> Self {
        AbsensiResponse {
            id: model.id,
            siswa_id: model.siswa_id,
            tanggal: model.tanggal,
            status: model.status.as_str().to_string(),
            keterangan: model.keterangan,
        }
    }
}

/// Daily-view row: attendance with the student (and their class) embedded
#[derive(Debug, Serialize, ToSchema)]
pub struct AbsensiWithSiswa {
    pub id: i32,
    pub siswa_id: i32,
    pub tanggal: NaiveDate,
    pub status: String,
    pub keterangan: Option<String>,
    pub siswa: Option<SiswaResponse>,
}

impl AbsensiWithSiswa {
    pub fn from_join(
        model: absensi::Model,
        siswa: Option<siswa::Model>,
        kelas: Option<kelas::Model>,
    ) -> Self {
        AbsensiWithSiswa {
            id: model.id,
            siswa_id: model.siswa_id,
            tanggal: model.tanggal,
            status: model.status.as_str().to_string(),
            keterangan: model.keterangan,
            siswa: siswa.map(|s| SiswaResponse::with_kelas(s, kelas)),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InputAbsensiPayload {
    pub siswa_id: Option<i32>,
    pub tanggal: Option<String>,
    pub status: Option<String>,
    pub keterangan: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AbsensiBatchPayload {
    pub kelas_id: Option<i32>,
    pub tanggal: Option<String>,
    pub absensi_data: Option<Vec<AbsensiItem>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AbsensiItem {
    pub siswa_id: Option<i32>,
    pub status: Option<String>,
    pub keterangan: Option<String>,
}

/// Per-item outcome of a batch submission. The batch itself never aborts;
/// callers retry only the failed subset.
#[derive(Debug, Serialize, ToSchema)]
pub struct AbsensiItemResult {
    pub siswa_id: Option<i32>,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AbsensiResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RekapQuery {
    pub siswa_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RekapKelasQuery {
    pub kelas_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportQuery {
    pub kelas_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RekapDetail {
    pub tanggal: NaiveDate,
    pub status: String,
    pub keterangan: Option<String>,
}

/// Aggregated recap for one student over the filtered rows
#[derive(Debug, Serialize, ToSchema)]
pub struct RekapSiswaEntry {
    pub siswa: Option<SiswaResponse>,
    pub total: u32,
    pub sakit: u32,
    pub izin: u32,
    pub alpa: u32,
    pub terlambat: u32,
    pub persentase_kehadiran: u32,
    pub detail: Vec<RekapDetail>,
}
