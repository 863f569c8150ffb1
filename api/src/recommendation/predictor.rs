//! Disease prediction seam.
//!
//! No image model ships with the service yet. [`RandomDiseasePredictor`]
//! stands in for one: it ignores the image and draws a disease from the
//! crop's table. Its confidence and severity carry no real accuracy meaning.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::models::Severity;

use super::tables;

/// Raw classifier output before treatment lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub disease: String,
    /// 0–100
    pub confidence: u8,
    pub severity: Severity,
    /// Percentage of the plant affected, 0–100
    pub affected_area: u8,
}

/// Anything that can name a disease for a crop and optional image
pub trait DiseasePredictor: Send + Sync {
    fn name(&self) -> &'static str;

    fn predict(&self, crop: Option<&str>, image_url: Option<&str>) -> Prediction;
}

pub struct RandomDiseasePredictor {
    rng: Mutex<StdRng>,
}

impl RandomDiseasePredictor {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence of predictions
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomDiseasePredictor {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity bucket for a draw in `[0, 1)`
pub fn severity_from_draw(draw: f64) -> Severity {
    match draw {
        d if d < 0.30 => Severity::Low,
        d if d < 0.60 => Severity::Medium,
        d if d < 0.85 => Severity::High,
        _ => Severity::Critical,
    }
}

impl DiseasePredictor for RandomDiseasePredictor {
    fn name(&self) -> &'static str {
        "random"
    }

    fn predict(&self, crop: Option<&str>, image_url: Option<&str>) -> Prediction {
        let table = tables::diseases_for(crop);
        // RNG state stays valid even if a previous holder panicked
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let disease = table[rng.gen_range(0..table.len())];
        let draw: f64 = rng.gen();

        tracing::debug!(
            crop = crop.unwrap_or("<none>"),
            has_image = image_url.is_some(),
            disease,
            draw,
            "random disease prediction"
        );

        Prediction {
            disease: disease.to_string(),
            confidence: (70.0 + draw * 29.0).floor().min(98.0) as u8,
            severity: severity_from_draw(draw),
            affected_area: (5.0 + draw * 70.0).round() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_buckets() {
        assert_eq!(severity_from_draw(0.0), Severity::Low);
        assert_eq!(severity_from_draw(0.29), Severity::Low);
        assert_eq!(severity_from_draw(0.30), Severity::Medium);
        assert_eq!(severity_from_draw(0.6), Severity::High);
        assert_eq!(severity_from_draw(0.85), Severity::Critical);
        assert_eq!(severity_from_draw(0.999), Severity::Critical);
    }

    #[test]
    fn rice_predictions_stay_in_rice_table() {
        let predictor = RandomDiseasePredictor::seeded(7);
        let rice = tables::diseases_for(Some("Rice"));
        for _ in 0..500 {
            let p = predictor.predict(Some("Rice"), None);
            assert!(rice.contains(&p.disease.as_str()), "{}", p.disease);
        }
    }

    #[test]
    fn confidence_and_area_stay_in_range() {
        let predictor = RandomDiseasePredictor::seeded(42);
        for _ in 0..500 {
            let p = predictor.predict(Some("Tomato"), Some("https://cdn.example.com/leaf.jpg"));
            assert!((70..=98).contains(&p.confidence), "{}", p.confidence);
            assert!((5..=75).contains(&p.affected_area), "{}", p.affected_area);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = RandomDiseasePredictor::seeded(99);
        let b = RandomDiseasePredictor::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.predict(Some("Wheat"), None), b.predict(Some("Wheat"), None));
        }
    }

    #[test]
    fn missing_crop_draws_from_default_table() {
        let predictor = RandomDiseasePredictor::seeded(3);
        for _ in 0..100 {
            let p = predictor.predict(None, None);
            assert!(tables::DEFAULT_DISEASES.contains(&p.disease.as_str()));
        }
    }
}
