use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use shared::models::{ApiResponse, DiseaseDetection, DiseaseDetectionRequest};

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    models::{
        CropSuggestionQuery, IdParam, LoginPayload, NotificationPayload, OrderPayload,
        OrderStatusPayload, Pagination, ProductPayload, RegisterPayload, SchemePayload, SoilReport,
    },
    state::AppState,
    validation::{
        extractors::json_rejection_message, validate, Location, SchemaName, ValidatedJson,
        ValidatedPath, ValidatedQuery, ValidationError,
    },
};

type Accepted = (StatusCode, Json<ApiResponse<Value>>);

/// Persistence lives in another service; accepted payloads are echoed back sanitized
fn accepted(kind: &str, payload: Map<String, Value>) -> Accepted {
    tracing::info!(kind, fields = payload.len(), "payload accepted");
    (
        StatusCode::ACCEPTED,
        Json(ApiResponse::with_message(
            Value::Object(payload),
            format!("{kind} accepted"),
        )),
    )
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();
    let schemas = state.schemas.iter().count();

    tracing::info!(uptime_secs = uptime, schemas, "health check passed");
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": now,
            "uptimeSecs": uptime,
            "schemas": schemas,
            "predictor": state.engine.predictor_name()
        })),
    )
}

pub async fn list_schemas(State(state): State<AppState>) -> Json<ApiResponse<Value>> {
    let schemas: Vec<Value> = state
        .schemas
        .iter()
        .map(|schema| {
            json!({
                "name": schema.name.as_str(),
                "location": schema.location.as_str(),
                "fields": schema.field_names().collect::<Vec<_>>(),
            })
        })
        .collect();
    Json(ApiResponse::success(Value::Array(schemas)))
}

/// Dry run: validate any payload against a named schema without acting on it
pub async fn validate_payload(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<Value>>, Response> {
    let schema_name: SchemaName = name.parse().map_err(|err| ApiError::from(err).into_response())?;
    let schema = state
        .schemas
        .get(schema_name)
        .map_err(|err| ApiError::from(err).into_response())?;

    let Json(raw) = body.map_err(|err| {
        ValidationError::single(Location::Body, "body", json_rejection_message(&err))
            .into_response()
    })?;

    match validate(schema, &raw, schema.location) {
        Ok(sanitized) => Ok(Json(ApiResponse::with_message(
            Value::Object(sanitized),
            "Payload is valid",
        ))),
        Err(errors) => {
            metrics::record_validation_failure(schema_name.as_str(), schema.location.as_str());
            Err(ValidationError::new(schema.location, errors).into_response())
        }
    }
}

// ── Accounts ─────────────────────────────────────────────────────────────────

pub async fn register(ValidatedJson(payload): ValidatedJson<RegisterPayload>) -> Accepted {
    accepted("Registration", payload.redacted())
}

pub async fn login(ValidatedJson(payload): ValidatedJson<LoginPayload>) -> Accepted {
    accepted("Login", payload.redacted())
}

// ── Marketplace ──────────────────────────────────────────────────────────────

pub async fn list_products(
    ValidatedQuery(query): ValidatedQuery<Pagination>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let offset = query.offset();
    let value = serde_json::to_value(&query).map_err(|err| ApiError::internal(err.to_string()))?;
    Ok(Json(ApiResponse::success(json!({
        "query": value,
        "offset": offset,
        "items": [],
    }))))
}

pub async fn create_product(ValidatedJson(payload): ValidatedJson<ProductPayload>) -> Accepted {
    accepted("Product", payload.into_inner())
}

pub async fn get_product(
    ValidatedPath(params): ValidatedPath<IdParam>,
) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({ "id": params.id })))
}

pub async fn create_order(ValidatedJson(payload): ValidatedJson<OrderPayload>) -> Accepted {
    accepted("Order", payload.into_inner())
}

pub async fn update_order_status(
    ValidatedPath(params): ValidatedPath<IdParam>,
    ValidatedJson(payload): ValidatedJson<OrderStatusPayload>,
) -> Accepted {
    let mut update = payload.into_inner();
    update.insert("id".into(), Value::String(params.id));
    accepted("Order status update", update)
}

pub async fn create_scheme(ValidatedJson(payload): ValidatedJson<SchemePayload>) -> Accepted {
    accepted("Scheme", payload.into_inner())
}

pub async fn create_notification(
    ValidatedJson(payload): ValidatedJson<NotificationPayload>,
) -> Accepted {
    accepted("Notification", payload.into_inner())
}

// ── Recommendations ──────────────────────────────────────────────────────────

pub async fn submit_soil_report(
    State(state): State<AppState>,
    ValidatedJson(report): ValidatedJson<SoilReport>,
) -> Json<ApiResponse<Value>> {
    let params = report.parameters();
    let health = state.engine.soil_health(&params);
    let suggestions = state
        .engine
        .suggest_crops(&params, crate::recommendation::crops::DEFAULT_LIMIT);

    metrics::record_soil_analysis(&health.classification.to_string());
    metrics::CROP_SUGGESTIONS.inc();
    tracing::info!(
        score = health.score,
        classification = %health.classification,
        "soil report analysed"
    );

    Json(ApiResponse::success(json!({
        "report": report,
        "health": health,
        "cropSuggestions": suggestions,
    })))
}

pub async fn crop_suggestions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CropSuggestionQuery>,
) -> Json<ApiResponse<Value>> {
    let suggestions = state.engine.suggest_crops(&query.parameters(), query.limit);
    metrics::CROP_SUGGESTIONS.inc();
    Json(ApiResponse::success(json!({ "suggestions": suggestions })))
}

pub async fn detect_disease(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<DiseaseDetectionRequest>,
) -> Json<ApiResponse<DiseaseDetection>> {
    let detection = state.engine.detect_disease(&request);
    metrics::record_disease_detection(
        request.crop_type.as_deref().unwrap_or_default(),
        &detection.severity.to_string(),
    );
    Json(ApiResponse::success(detection))
}

pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found("RouteNotFound", format!("No route for {}", uri.path()))
}
