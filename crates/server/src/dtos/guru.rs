use database::entities::guru;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct GuruResponse {
    pub id: i32,
    pub nama: String,
}

impl GuruResponse {
    pub fn from_model(model: guru::Model) -> Self {
        GuruResponse {
            id: model.id,
            nama: model.nama,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GuruPayload {
    pub nama: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GuruBatchPayload {
    pub guru_list: Option<Vec<GuruItem>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GuruItem {
    pub nama: Option<String>,
}

/// Per-item outcome of a batch teacher insert
#[derive(Debug, Serialize, ToSchema)]
pub struct GuruBatchResult {
    pub nama: String,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<GuruResponse>,
}
