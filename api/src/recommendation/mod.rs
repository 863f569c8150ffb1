//! Rule-based recommendation engine.
//!
//! Three independent advisors share one [`RecommendationEngine`]:
//!
//! - disease detection, backed by a pluggable [`DiseasePredictor`] plus
//!   static treatment tables
//! - soil health scoring ([`soil`])
//! - crop suitability ranking ([`crops`])
//!
//! The engine is built once at startup and shared through `AppState`.

pub mod crops;
pub mod predictor;
pub mod soil;
pub mod tables;

use shared::models::{
    ActionKind, CropSuggestion, DiseaseDetection, DiseaseDetectionRequest, DiseaseStage, Priority,
    RecommendedAction, Severity, SoilHealthReport, SoilParameters,
};

pub use predictor::{DiseasePredictor, Prediction, RandomDiseasePredictor};

pub struct RecommendationEngine {
    predictor: Box<dyn DiseasePredictor>,
}

impl RecommendationEngine {
    pub fn new(predictor: Box<dyn DiseasePredictor>) -> Self {
        Self { predictor }
    }

    /// Engine with the placeholder predictor; a seed makes output reproducible
    pub fn with_random_predictor(seed: Option<u64>) -> Self {
        let predictor = match seed {
            Some(seed) => RandomDiseasePredictor::seeded(seed),
            None => RandomDiseasePredictor::new(),
        };
        Self::new(Box::new(predictor))
    }

    pub fn predictor_name(&self) -> &'static str {
        self.predictor.name()
    }

    pub fn detect_disease(&self, request: &DiseaseDetectionRequest) -> DiseaseDetection {
        let prediction = self
            .predictor
            .predict(request.crop_type.as_deref(), request.image_url.as_deref());
        let profile = tables::profile_for(&prediction.disease);

        tracing::info!(
            crop = request.crop_type.as_deref().unwrap_or("<none>"),
            disease = %prediction.disease,
            severity = %prediction.severity,
            confidence = prediction.confidence,
            "disease detected"
        );

        DiseaseDetection {
            stage: DiseaseStage::from(prediction.severity),
            treatment_plan: profile.treatment_plan(),
            recommended_actions: recommended_actions(&prediction.disease, prediction.severity),
            symptoms: profile.symptoms(),
            weather_factors: profile.weather_factors(),
            disease: prediction.disease,
            confidence: prediction.confidence,
            severity: prediction.severity,
            affected_area: prediction.affected_area,
        }
    }

    pub fn soil_health(&self, params: &SoilParameters) -> SoilHealthReport {
        soil::assess(params)
    }

    pub fn suggest_crops(&self, params: &SoilParameters, limit: usize) -> Vec<CropSuggestion> {
        crops::suggest(params, limit)
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::with_random_predictor(None)
    }
}

fn action(
    kind: ActionKind,
    description: String,
    priority: Priority,
    timeline: &str,
) -> RecommendedAction {
    RecommendedAction {
        kind,
        description,
        priority,
        timeline: timeline.to_string(),
    }
}

/// Action list escalates with severity; every result carries monitoring and
/// prevention steps
pub fn recommended_actions(disease: &str, severity: Severity) -> Vec<RecommendedAction> {
    let mut actions = Vec::with_capacity(4);

    match severity {
        Severity::Critical => {
            actions.push(action(
                ActionKind::Immediate,
                format!("Remove and destroy all plants heavily infected with {disease}"),
                Priority::Urgent,
                "Within 24 hours",
            ));
            actions.push(action(
                ActionKind::Treatment,
                "Apply the recommended chemical treatment across the whole field".into(),
                Priority::Urgent,
                "Within 48 hours",
            ));
        }
        Severity::High => {
            actions.push(action(
                ActionKind::Immediate,
                format!("Isolate and prune tissue affected by {disease}"),
                Priority::High,
                "Within 48 hours",
            ));
            actions.push(action(
                ActionKind::Treatment,
                "Apply the recommended chemical treatment to affected areas".into(),
                Priority::High,
                "Within 3 days",
            ));
        }
        Severity::Medium => {
            actions.push(action(
                ActionKind::Treatment,
                "Start organic treatment and re-inspect before escalating".into(),
                Priority::Medium,
                "Within 1 week",
            ));
        }
        Severity::Low => {}
    }

    let monitoring_timeline = match severity {
        Severity::Critical | Severity::High => "Every 2 days",
        Severity::Medium => "Every 3 days",
        Severity::Low => "Weekly",
    };
    actions.push(action(
        ActionKind::Monitoring,
        format!("Inspect neighbouring plants for signs of {disease}"),
        if severity == Severity::Low { Priority::Medium } else { Priority::High },
        monitoring_timeline,
    ));
    actions.push(action(
        ActionKind::Prevention,
        "Follow the preventive measures in the treatment plan for the next season".into(),
        Priority::Low,
        "Ongoing",
    ));

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPredictor(Severity, &'static str);

    impl DiseasePredictor for FixedPredictor {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn predict(&self, _crop: Option<&str>, _image: Option<&str>) -> Prediction {
            Prediction {
                disease: self.1.to_string(),
                confidence: 90,
                severity: self.0,
                affected_area: 40,
            }
        }
    }

    fn request(crop: Option<&str>) -> DiseaseDetectionRequest {
        DiseaseDetectionRequest {
            crop_type: crop.map(String::from),
            image_url: None,
            location: None,
        }
    }

    #[test]
    fn rice_detection_uses_rice_table() {
        let engine = RecommendationEngine::with_random_predictor(Some(11));
        let rice = tables::diseases_for(Some("rice"));
        for _ in 0..100 {
            let d = engine.detect_disease(&request(Some("Rice")));
            assert!(rice.contains(&d.disease.as_str()));
            assert!((70..=98).contains(&d.confidence));
            assert_eq!(d.stage, DiseaseStage::from(d.severity));
        }
    }

    #[test]
    fn unknown_crop_uses_default_table() {
        let engine = RecommendationEngine::with_random_predictor(Some(5));
        let d = engine.detect_disease(&request(Some("Dragonfruit")));
        assert!(tables::DEFAULT_DISEASES.contains(&d.disease.as_str()));
    }

    #[test]
    fn critical_detection_is_advanced_and_urgent() {
        let predictor = FixedPredictor(Severity::Critical, "Rice Blast");
        let engine = RecommendationEngine::new(Box::new(predictor));
        let d = engine.detect_disease(&request(Some("Rice")));
        assert_eq!(d.stage, DiseaseStage::Advanced);
        assert_eq!(d.recommended_actions[0].kind, ActionKind::Immediate);
        assert_eq!(d.recommended_actions[0].priority, Priority::Urgent);
        assert!(!d.treatment_plan.chemical.is_empty());
        assert!(!d.symptoms.is_empty());
        assert_eq!(engine.predictor_name(), "fixed");
    }

    #[test]
    fn unprofiled_disease_gets_default_plan() {
        let predictor = FixedPredictor(Severity::Low, "Mystery Wilt");
        let engine = RecommendationEngine::new(Box::new(predictor));
        let d = engine.detect_disease(&request(None));
        assert_eq!(d.disease, "Mystery Wilt");
        assert_eq!(d.stage, DiseaseStage::Early);
        assert_eq!(d.treatment_plan, tables::DEFAULT_PROFILE.treatment_plan());
    }

    #[test]
    fn low_severity_only_monitors_and_prevents() {
        let actions = recommended_actions("Leaf Spot", Severity::Low);
        let kinds: Vec<_> = actions.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ActionKind::Monitoring, ActionKind::Prevention]);
    }

    #[test]
    fn engine_delegates_soil_and_crops() {
        let engine = RecommendationEngine::with_random_predictor(Some(1));
        let params = SoilParameters {
            ph: 6.5,
            nitrogen: 300.0,
            phosphorus: 30.0,
            potassium: 250.0,
            organic_matter: 3.0,
            moisture: None,
        };
        assert_eq!(engine.soil_health(&params).score, 100);
        assert_eq!(engine.suggest_crops(&params, 3).len(), 3);
    }
}
