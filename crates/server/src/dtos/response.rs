use serde::Serialize;
use utoipa::ToSchema;

/// The envelope every endpoint answers with.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_skips_absent_fields() {
        let body = serde_json::to_value(ApiResponse::data(vec![1, 2])).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true, "data": [1, 2] }));

        let body = serde_json::to_value(ApiResponse::message("Kelas berhasil dihapus")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": true, "message": "Kelas berhasil dihapus" })
        );
    }
}
