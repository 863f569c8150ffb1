//! Custom Axum extractors for validated input
//!
//! `ValidatedJson<T>`, `ValidatedQuery<T>` and `ValidatedPath<T>` run the
//! payload through the schema `T` is bound to. The handler only ever sees
//! the sanitized payload; failures short-circuit into a structured 4xx.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRef, FromRequest, FromRequestParts, Path, Query, Request},
    http::{header, request::Parts, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::evaluate::validate;
use super::registry::SchemaRegistry;
use super::schema::{Location, SchemaName};
use super::validators::validate_json_depth;
use crate::error::ApiError;
use crate::metrics;

/// Maximum JSON nesting depth accepted in a body
const MAX_JSON_DEPTH: usize = 10;

/// A field-level validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation error response body
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<FieldError>,
}

/// Validation error that converts to an HTTP response
#[derive(Debug)]
pub struct ValidationError {
    pub location: Location,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(location: Location, errors: Vec<FieldError>) -> Self {
        Self { location, errors }
    }

    pub fn single(location: Location, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location,
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Bodies are well-formed but unprocessable; bad query strings and paths are bad requests
    pub fn status(&self) -> StatusCode {
        match self.location {
            Location::Body => StatusCode::UNPROCESSABLE_ENTITY,
            Location::Query | Location::Params => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> &'static str {
        match self.location {
            Location::Body => "Validation failed",
            Location::Query => "Invalid query parameters",
            Location::Params => "Invalid parameters",
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ValidationErrorResponse {
            status: "error",
            message: self.message(),
            errors: self.errors,
        };

        let mut response = (status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            response
                .headers_mut()
                .insert(header::HeaderName::from_static("x-correlation-id"), value);
        }
        response
    }
}

/// Payload type bound to a registered schema
///
/// The sanitized map is deserialized into `Self`, so field names and
/// types must agree with the schema's.
pub trait SchemaBound: DeserializeOwned {
    const SCHEMA: SchemaName;
}

/// Validate `raw` against `T`'s schema and deserialize the sanitized result
pub fn validate_into<T: SchemaBound>(
    registry: &SchemaRegistry,
    raw: &Value,
    location: Location,
) -> Result<T, Response> {
    let schema_name = T::SCHEMA;
    let schema = registry.get(schema_name).map_err(|err| {
        tracing::error!(error = %err, "schema lookup failed");
        ApiError::internal("Request schema is not configured").into_response()
    })?;

    let sanitized = validate(schema, raw, location).map_err(|errors| {
        metrics::record_validation_failure(schema_name.as_str(), location.as_str());
        tracing::debug!(
            schema = %schema_name,
            location = %location,
            errors = errors.len(),
            "payload rejected"
        );
        ValidationError::new(location, errors).into_response()
    })?;

    serde_json::from_value(Value::Object(sanitized)).map_err(|err| {
        tracing::error!(schema = %schema_name, error = %err, "schema and payload type disagree");
        ApiError::internal("Failed to decode validated payload").into_response()
    })
}

/// Human-readable reason for a rejected JSON body
pub fn json_rejection_message(err: &JsonRejection) -> String {
    match err {
        JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {}", e.body_text()),
        JsonRejection::JsonSyntaxError(e) => format!("JSON syntax error: {}", e.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type must be application/json".to_string()
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Invalid JSON payload".to_string(),
    }
}

/// Custom JSON extractor that validates and sanitizes the request body
///
/// ```ignore
/// pub async fn create_product(
///     ValidatedJson(product): ValidatedJson<ProductPayload>,
/// ) -> impl IntoResponse {
///     // product is already sanitized and validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: SchemaBound + Send,
    S: Send + Sync,
    Arc<SchemaRegistry>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let registry = Arc::<SchemaRegistry>::from_ref(state);

        let Json(raw) = Json::<Value>::from_request(req, state).await.map_err(|err| {
            ValidationError::single(Location::Body, "body", json_rejection_message(&err))
                .into_response()
        })?;

        validate_json_depth(&raw, MAX_JSON_DEPTH).map_err(|message| {
            ValidationError::single(Location::Body, "body", message).into_response()
        })?;

        validate_into(&registry, &raw, Location::Body).map(ValidatedJson)
    }
}

/// Query-string extractor; values arrive as strings and are coerced by the schema
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: SchemaBound + Send,
    S: Send + Sync,
    Arc<SchemaRegistry>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let registry = Arc::<SchemaRegistry>::from_ref(state);

        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                ValidationError::single(Location::Query, "query", err.body_text()).into_response()
            })?;

        validate_into(&registry, &string_map(params), Location::Query).map(ValidatedQuery)
    }
}

/// Path-parameter extractor
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: SchemaBound + Send,
    S: Send + Sync,
    Arc<SchemaRegistry>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let registry = Arc::<SchemaRegistry>::from_ref(state);

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                ValidationError::single(Location::Params, "params", err.body_text())
                    .into_response()
            })?;

        validate_into(&registry, &string_map(params), Location::Params).map(ValidatedPath)
    }
}

fn string_map(params: HashMap<String, String>) -> Value {
    Value::Object(
        params
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect::<Map<String, Value>>(),
    )
}

// Implement Deref for ergonomic access
impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::Deref for ValidatedPath<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Builder for accumulating validation errors
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<FieldError>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Add an error directly
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    /// Add error if condition is true
    pub fn check_condition(
        &mut self,
        condition: bool,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        if condition {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Finish building and return Result
    pub fn build(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Whether `field` already has an error recorded
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Get current error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error() {
        let error = FieldError::new("name", "is required");
        assert_eq!(error.field, "name");
        assert_eq!(error.message, "is required");
    }

    #[test]
    fn test_validation_builder() {
        let mut builder = ValidationBuilder::new();

        builder
            .add_error("name", "is required")
            .check_condition(false, "email", "must be a valid email")
            .check_condition(true, "price", "must be positive");

        assert!(builder.has_error_for("price"));
        assert!(!builder.has_error_for("email"));
        assert_eq!(builder.error_count(), 2);

        let errors = builder.build().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[1].field, "price");
    }

    #[test]
    fn test_status_discriminator_per_location() {
        let body = ValidationError::single(Location::Body, "name", "is required");
        assert_eq!(body.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.message(), "Validation failed");

        let query = ValidationError::single(Location::Query, "page", "must be an integer");
        assert_eq!(query.status(), StatusCode::BAD_REQUEST);
        assert_eq!(query.message(), "Invalid query parameters");

        let params = ValidationError::single(Location::Params, "id", "must be a valid id");
        assert_eq!(params.status(), StatusCode::BAD_REQUEST);
        assert_eq!(params.message(), "Invalid parameters");
    }

    #[test]
    fn test_error_response_carries_correlation_id() {
        let response =
            ValidationError::single(Location::Body, "name", "is required").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.headers().contains_key("x-correlation-id"));
    }
}
