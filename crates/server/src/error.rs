use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_xlsxwriter::XlsxError;
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler, rendered as the standard
/// `{success: false, message, error?}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input -> 400
    #[error("{0}")]
    Validation(String),

    /// Unknown resource id -> 404
    #[error("{0}")]
    NotFound(String),

    /// Unique-name collision -> 400 with an "already exists" message
    #[error("{0}")]
    Conflict(String),

    /// Anything the database threw that no other class covers -> 500
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: DbErr,
    },

    /// Workbook rendering failure -> 500
    #[error("{message}")]
    Export {
        message: String,
        #[source]
        source: XlsxError,
    },
}

impl ApiError {
    pub fn internal(message: &str, source: DbErr) -> Self {
        ApiError::Internal {
            message: message.to_string(),
            source,
        }
    }

    pub fn export(message: &str, source: XlsxError) -> Self {
        ApiError::Export {
            message: message.to_string(),
            source,
        }
    }

    /// Maps a write failure, turning a unique-constraint violation into a
    /// user-facing conflict and everything else into a 500.
    pub fn from_write(err: DbErr, conflict_message: &str, internal_message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::Conflict(conflict_message.to_string())
            }
            _ => ApiError::internal(internal_message, err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": message }),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": message }),
            ),
            ApiError::Conflict(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": message }),
            ),
            ApiError::Internal { message, source } => {
                log::error!("{message}: {source}");
                // driver detail only leaves the process in debug builds
                let body = if cfg!(debug_assertions) {
                    json!({ "success": false, "message": message, "error": source.to_string() })
                } else {
                    json!({ "success": false, "message": message })
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            ApiError::Export { message, source } => {
                log::error!("{message}: {source}");
                let body = if cfg!(debug_assertions) {
                    json!({ "success": false, "message": message, "error": source.to_string() })
                } else {
                    json!({ "success": false, "message": message })
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_export_failure_is_a_server_error() {
        let mut workbook = Workbook::new();
        let err = match workbook.add_worksheet().set_name("") {
            Err(e) => e,
            Ok(_) => panic!("blank sheet name accepted"),
        };
        let resp = ApiError::export("Gagal membuat file Excel", err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_and_not_found_statuses() {
        let resp = ApiError::Validation("Nama harus diisi".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::NotFound("Kelas tidak ditemukan".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
