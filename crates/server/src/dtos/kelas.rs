use database::entities::kelas;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct KelasResponse {
    pub id: i32,
    pub nama_kelas: String,
    /// Student count, present on the list endpoint only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumlah_siswa: Option<i64>,
}

impl KelasResponse {
    pub fn from_model(model: kelas::Model) -> Self {
        KelasResponse {
            id: model.id,
            nama_kelas: model.nama_kelas,
            jumlah_siswa: None,
        }
    }

    pub fn with_count(model: kelas::Model, jumlah_siswa: i64) -> Self {
        KelasResponse {
            jumlah_siswa: Some(jumlah_siswa),
            ..Self::from_model(model)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct KelasPayload {
    pub nama_kelas: Option<String>,
}
