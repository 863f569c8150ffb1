//! Request payload types bound to validation schemas.
//!
//! Marketplace payloads are forwarded as-is once sanitized, so they stay
//! JSON maps. Payloads the engine computes on are typed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::models::{DiseaseDetectionRequest, SoilParameters};

use crate::validation::{SchemaBound, SchemaName};

macro_rules! map_payload {
    ($(#[$meta:meta])* $name:ident => $schema:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Map<String, Value>);

        impl SchemaBound for $name {
            const SCHEMA: SchemaName = $schema;
        }

        impl $name {
            pub fn into_inner(self) -> Map<String, Value> {
                self.0
            }
        }
    };
}

map_payload!(
    /// New user account
    RegisterPayload => SchemaName::Register
);
map_payload!(LoginPayload => SchemaName::Login);
map_payload!(
    /// Marketplace product listing
    ProductPayload => SchemaName::Product
);
map_payload!(OrderPayload => SchemaName::Order);
map_payload!(OrderStatusPayload => SchemaName::OrderStatus);
map_payload!(
    /// Government scheme announcement
    SchemePayload => SchemaName::Scheme
);
map_payload!(NotificationPayload => SchemaName::Notification);

impl RegisterPayload {
    /// Credentials never leave the validation layer
    pub fn redacted(mut self) -> Map<String, Value> {
        self.0.remove("password");
        self.0.remove("confirmPassword");
        self.0
    }
}

impl LoginPayload {
    pub fn redacted(mut self) -> Map<String, Value> {
        self.0.remove("password");
        self.0
    }
}

/// Soil test submitted by a farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilReport {
    pub farm_name: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub organic_matter: f64,
    pub moisture: Option<f64>,
    pub test_date: Option<String>,
    pub crop_type: Option<String>,
}

impl SchemaBound for SoilReport {
    const SCHEMA: SchemaName = SchemaName::SoilReport;
}

impl SoilReport {
    pub fn parameters(&self) -> SoilParameters {
        SoilParameters {
            ph: self.ph,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            organic_matter: self.organic_matter,
            moisture: self.moisture,
        }
    }
}

/// List query for product browsing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub sort: String,
    pub order: String,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl SchemaBound for Pagination {
    const SCHEMA: SchemaName = SchemaName::Pagination;
}

impl Pagination {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSuggestionQuery {
    #[serde(rename = "pH")]
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub organic_matter: f64,
    pub limit: usize,
}

impl SchemaBound for CropSuggestionQuery {
    const SCHEMA: SchemaName = SchemaName::CropSuggestion;
}

impl CropSuggestionQuery {
    pub fn parameters(&self) -> SoilParameters {
        SoilParameters {
            ph: self.ph,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            organic_matter: self.organic_matter,
            moisture: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdParam {
    pub id: String,
}

impl SchemaBound for IdParam {
    const SCHEMA: SchemaName = SchemaName::IdParam;
}

impl SchemaBound for DiseaseDetectionRequest {
    const SCHEMA: SchemaName = SchemaName::DiseaseDetection;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate, Location, SchemaRegistry};
    use serde_json::json;

    fn sanitized<T: SchemaBound>(payload: Value, location: Location) -> T {
        let registry = SchemaRegistry::new();
        let schema = registry.get(T::SCHEMA).unwrap();
        let map = validate(schema, &payload, location).unwrap();
        serde_json::from_value(Value::Object(map)).unwrap()
    }

    #[test]
    fn soil_report_deserializes_after_validation() {
        let report: SoilReport = sanitized(
            json!({"pH": "6.5", "nitrogen": 300, "phosphorus": 30, "potassium": 250, "organicMatter": 3}),
            Location::Body,
        );
        assert_eq!(report.ph, 6.5);
        assert_eq!(report.parameters().nitrogen, 300.0);
        assert!(report.farm_name.is_none());
    }

    #[test]
    fn pagination_defaults_deserialize() {
        let page: Pagination = sanitized(json!({"page": "3"}), Location::Query);
        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 10);
        assert_eq!(page.sort, "createdAt");
        assert_eq!(page.order, "desc");
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn crop_query_applies_defaults() {
        let q: CropSuggestionQuery = sanitized(
            json!({"pH": "6.8", "nitrogen": "250", "phosphorus": "20", "potassium": "200"}),
            Location::Query,
        );
        assert_eq!(q.organic_matter, 2.0);
        assert_eq!(q.limit, 5);
    }

    #[test]
    fn disease_request_binds_to_schema() {
        let req: DiseaseDetectionRequest =
            sanitized(json!({"cropType": "  Rice ", "extra": true}), Location::Body);
        assert_eq!(req.crop_type.as_deref(), Some("Rice"));
        assert!(req.image_url.is_none());
    }

    #[test]
    fn register_redacts_credentials() {
        let payload: RegisterPayload = sanitized(
            json!({
                "name": "Asha Devi",
                "email": "Asha@Example.com",
                "password": "secret123",
                "confirmPassword": "secret123",
                "phone": "9876543210"
            }),
            Location::Body,
        );
        let public = payload.redacted();
        assert!(!public.contains_key("password"));
        assert!(!public.contains_key("confirmPassword"));
        assert_eq!(public["email"], "asha@example.com");
        assert_eq!(public["role"], "farmer");
    }
}
