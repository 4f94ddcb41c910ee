use crate::dtos::guru::GuruResponse;
use chrono::NaiveDate;
use database::entities::{absensi_guru, guru};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct AbsensiGuruResponse {
    pub id: i32,
    pub guru_id: i32,
    pub tanggal: NaiveDate,
    pub status: String,
    pub keterangan: Option<String>,
}

impl AbsensiGuruResponse {
    pub fn from_model(model: absensi_guru::Model) -> Self {
        AbsensiGuruResponse {
            id: model.id,
            guru_id: model.guru_id,
            tanggal: model.tanggal,
            status: model.status.as_str().to_string(),
            keterangan: model.keterangan,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AbsensiGuruWithGuru {
    pub id: i32,
    pub guru_id: i32,
    pub tanggal: NaiveDate,
    pub status: String,
    pub keterangan: Option<String>,
    pub guru: Option<GuruResponse>,
}

impl AbsensiGuruWithGuru {
    pub fn from_join(model: absensi_guru::Model, guru: Option<guru::Model>) -> Self {
        AbsensiGuruWithGuru {
            id: model.id,
            guru_id: model.guru_id,
            tanggal: model.tanggal,
            status: model.status.as_str().to_string(),
            keterangan: model.keterangan,
            guru: guru.map(GuruResponse::from_model),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InputAbsensiGuruPayload {
    pub guru_id: Option<i32>,
    pub tanggal: Option<String>,
    pub status: Option<String>,
    pub keterangan: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AbsensiGuruBatchPayload {
    pub tanggal: Option<String>,
    pub absensi_data: Option<Vec<AbsensiGuruItem>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AbsensiGuruItem {
    pub guru_id: Option<i32>,
    pub status: Option<String>,
    pub keterangan: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AbsensiGuruItemResult {
    pub guru_id: Option<i32>,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AbsensiGuruResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RekapGuruQuery {
    pub guru_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
