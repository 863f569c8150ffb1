use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// DISEASE DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Input for the disease detection endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDetectionRequest {
    pub crop_type: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
}

/// How badly a plant is affected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Progression of an infection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiseaseStage {
    Early,
    Mid,
    Advanced,
}

impl From<Severity> for DiseaseStage {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low => DiseaseStage::Early,
            Severity::Medium => DiseaseStage::Mid,
            Severity::High | Severity::Critical => DiseaseStage::Advanced,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    pub organic: Vec<String>,
    pub chemical: Vec<String>,
    pub immediate: Vec<String>,
    pub preventive: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Immediate,
    Treatment,
    Monitoring,
    Prevention,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub description: String,
    pub priority: Priority,
    pub timeline: String,
}

/// Conditions that favour the spread of a disease
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherFactors {
    pub temperature: String,
    pub humidity: String,
    pub rainfall: String,
    pub risk_level: String,
}

/// Full disease detection result returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDetection {
    pub disease: String,
    pub confidence: u8,
    pub severity: Severity,
    pub affected_area: u8,
    pub stage: DiseaseStage,
    pub treatment_plan: TreatmentPlan,
    pub recommended_actions: Vec<RecommendedAction>,
    pub symptoms: Vec<String>,
    pub weather_factors: WeatherFactors,
}

// ═══════════════════════════════════════════════════════════════════════════
// SOIL & CROPS
// ═══════════════════════════════════════════════════════════════════════════

/// Laboratory soil measurements. Nutrients are in kg/ha, organic matter in %.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilParameters {
    #[serde(rename = "pH")]
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub organic_matter: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<f64>,
}

/// Qualitative bucket for a 0–100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthClass {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthClass {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => HealthClass::Excellent,
            60..=79 => HealthClass::Good,
            40..=59 => HealthClass::Fair,
            _ => HealthClass::Poor,
        }
    }
}

impl std::fmt::Display for HealthClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthClass::Poor => write!(f, "Poor"),
            HealthClass::Fair => write!(f, "Fair"),
            HealthClass::Good => write!(f, "Good"),
            HealthClass::Excellent => write!(f, "Excellent"),
        }
    }
}

/// One factor contributing to a soil or crop score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactor {
    pub name: String,
    pub points_earned: f64,
    pub points_max: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilHealthReport {
    pub score: u8,
    pub classification: HealthClass,
    pub factors: Vec<ScoreFactor>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSuggestion {
    pub crop: String,
    pub score: u8,
    pub classification: HealthClass,
    pub reasons: Vec<String>,
}

/// Wrapper for successful API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            data,
        }
    }
}
