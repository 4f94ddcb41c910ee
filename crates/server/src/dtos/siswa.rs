use database::entities::{kelas, siswa};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Abbreviated class embedded in student payloads
#[derive(Debug, Serialize, ToSchema)]
pub struct KelasRef {
    pub id: i32,
    pub nama_kelas: String,
}

impl KelasRef {
    pub fn from_model(model: kelas::Model) -> Self {
        KelasRef {
            id: model.id,
            nama_kelas: model.nama_kelas,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SiswaResponse {
    pub id: i32,
    pub nama: String,
    pub kelas_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kelas: Option<KelasRef>,
}

impl SiswaResponse {
    pub fn from_model(model: siswa::Model) -> Self {
        SiswaResponse {
            id: model.id,
            nama: model.nama,
            kelas_id: model.kelas_id,
            kelas: None,
        }
    }

    pub fn with_kelas(model: siswa::Model, kelas: Option<kelas::Model>) -> Self {
        SiswaResponse {
            kelas: kelas.map(KelasRef::from_model),
            ..Self::from_model(model)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SiswaPayload {
    pub nama: Option<String>,
    pub kelas_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SiswaBatchPayload {
    pub siswa: Option<Vec<SiswaItem>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SiswaItem {
    pub nama: Option<String>,
    pub kelas_id: Option<i32>,
}
