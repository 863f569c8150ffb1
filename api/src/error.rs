use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::validation::SchemaError;

/// Non-validation failures: unknown routes, unknown schemas, internal faults.
/// Validation failures use [`crate::validation::ValidationError`] instead.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    status: &'static str,
    error: String,
    message: String,
    code: u16,
    timestamp: String,
    correlation_id: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "InternalServerError", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Unknown(name) => {
                Self::not_found("SchemaNotFound", format!("No schema named '{}'", name))
            }
            SchemaError::NotRegistered(name) => {
                tracing::error!(schema = %name, "schema missing from registry");
                Self::internal("Request schema is not configured")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let correlation_id = Uuid::new_v4().to_string();
        let payload = ErrorResponse {
            status: "error",
            error: self.error,
            message: self.message,
            code: self.status.as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: correlation_id.clone(),
        };

        let mut response = (self.status, Json(payload)).into_response();
        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
            response.headers_mut().insert(header::HeaderName::from_static("x-correlation-id"), value);
        }
        response
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::SchemaName;

    #[tokio::test]
    async fn not_found_body_and_header() {
        let resp = ApiError::not_found("RouteNotFound", "No route for /nope").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().contains_key("x-correlation-id"));

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "RouteNotFound");
        assert_eq!(json["code"], 404);
        assert!(json["correlationId"].is_string());
    }

    #[test]
    fn schema_errors_map_to_status() {
        let unknown: ApiError = SchemaError::Unknown("bogus".into()).into();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let missing: ApiError = SchemaError::NotRegistered(SchemaName::Order).into();
        assert_eq!(missing.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
