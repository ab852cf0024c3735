use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use super::schema::MissingField;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("Unexpected field")]
    UnexpectedField,

    #[error("Too many files")]
    TooManyFiles,

    #[error("Invalid payload")]
    InvalidPayload,

    #[error("Malformed multipart body")]
    Multipart(#[from] MultipartError),
}

impl From<MissingField> for ApiError {
    fn from(_: MissingField) -> Self {
        ApiError::InvalidPayload
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(_: serde_json::Error) -> Self {
        ApiError::InvalidPayload
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Multipart(e) => e.status(),
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        for err in [
            ApiError::NoFileUploaded,
            ApiError::UnexpectedField,
            ApiError::TooManyFiles,
            ApiError::InvalidPayload,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_missing_field_maps_to_invalid_payload() {
        let err: ApiError = MissingField::Evidence.into();
        assert_eq!(err.to_string(), "Invalid payload");
    }

    #[test]
    fn test_response_carries_status() {
        let response = ApiError::NoFileUploaded.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
