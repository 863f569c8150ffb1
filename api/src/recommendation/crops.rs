// api/src/recommendation/crops.rs
//
// Crop suitability ranking.
//
//  Component   Weight   Full marks                    Degradation
//  ─────────   ──────   ───────────────────────────   ──────────────────────────
//  pH            40 pt  inside the crop's range       −20 pt per pH unit outside
//  Nitrogen      20 pt  ≥ crop minimum                × value / minimum
//  Phosphorus    20 pt  ≥ crop minimum                × value / minimum
//  Potassium     20 pt  ≥ crop minimum                × value / minimum
//
// Ranked by score descending, ties broken by crop name.

use std::cmp::Ordering;

use shared::models::{CropSuggestion, HealthClass, SoilParameters};

use super::soil::normalize;

pub const WEIGHT_PH: f64 = 40.0;
pub const WEIGHT_NUTRIENT: f64 = 20.0;
const PH_PENALTY_PER_UNIT: f64 = 20.0;

pub const DEFAULT_LIMIT: usize = 5;
pub const MAX_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct CropProfile {
    pub name: &'static str,
    pub ph_min: f64,
    pub ph_max: f64,
    /// kg/ha
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub season: &'static str,
}

pub static CROP_PROFILES: &[CropProfile] = &[
    CropProfile {
        name: "Rice",
        ph_min: 5.5,
        ph_max: 7.0,
        nitrogen: 240.0,
        phosphorus: 20.0,
        potassium: 150.0,
        season: "Kharif",
    },
    CropProfile {
        name: "Wheat",
        ph_min: 6.0,
        ph_max: 7.5,
        nitrogen: 250.0,
        phosphorus: 25.0,
        potassium: 180.0,
        season: "Rabi",
    },
    CropProfile {
        name: "Maize",
        ph_min: 5.8,
        ph_max: 7.0,
        nitrogen: 260.0,
        phosphorus: 22.0,
        potassium: 170.0,
        season: "Kharif",
    },
    CropProfile {
        name: "Cotton",
        ph_min: 6.0,
        ph_max: 8.0,
        nitrogen: 200.0,
        phosphorus: 18.0,
        potassium: 200.0,
        season: "Kharif",
    },
    CropProfile {
        name: "Sugarcane",
        ph_min: 6.5,
        ph_max: 7.5,
        nitrogen: 300.0,
        phosphorus: 30.0,
        potassium: 250.0,
        season: "Annual",
    },
    CropProfile {
        name: "Potato",
        ph_min: 5.0,
        ph_max: 6.5,
        nitrogen: 220.0,
        phosphorus: 30.0,
        potassium: 260.0,
        season: "Rabi",
    },
    CropProfile {
        name: "Tomato",
        ph_min: 6.0,
        ph_max: 7.0,
        nitrogen: 200.0,
        phosphorus: 25.0,
        potassium: 220.0,
        season: "Rabi",
    },
    CropProfile {
        name: "Soybean",
        ph_min: 6.0,
        ph_max: 7.0,
        nitrogen: 120.0,
        phosphorus: 20.0,
        potassium: 150.0,
        season: "Kharif",
    },
    CropProfile {
        name: "Chickpea",
        ph_min: 6.0,
        ph_max: 8.0,
        nitrogen: 100.0,
        phosphorus: 18.0,
        potassium: 120.0,
        season: "Rabi",
    },
    CropProfile {
        name: "Groundnut",
        ph_min: 6.0,
        ph_max: 7.5,
        nitrogen: 110.0,
        phosphorus: 20.0,
        potassium: 140.0,
        season: "Kharif",
    },
];

fn ph_points(ph: f64, profile: &CropProfile) -> f64 {
    let distance = if ph < profile.ph_min {
        profile.ph_min - ph
    } else if ph > profile.ph_max {
        ph - profile.ph_max
    } else {
        0.0
    };
    (WEIGHT_PH - distance * PH_PENALTY_PER_UNIT).max(0.0)
}

fn nutrient_points(value: f64, required: f64) -> f64 {
    if required <= 0.0 {
        return WEIGHT_NUTRIENT;
    }
    WEIGHT_NUTRIENT * (value / required).min(1.0)
}

/// Score a single crop against the soil, 0–100
pub fn score_crop(params: &SoilParameters, profile: &CropProfile) -> CropSuggestion {
    let p = normalize(params);
    let mut reasons = Vec::new();

    let ph = ph_points(p.ph, profile);
    if ph >= WEIGHT_PH {
        reasons.push(format!(
            "pH {:.1} is within the ideal {:.1}-{:.1} range",
            p.ph, profile.ph_min, profile.ph_max
        ));
    } else {
        reasons.push(format!(
            "pH {:.1} is outside the ideal {:.1}-{:.1} range",
            p.ph, profile.ph_min, profile.ph_max
        ));
    }

    let mut total = ph;
    for (label, value, required) in [
        ("Nitrogen", p.nitrogen, profile.nitrogen),
        ("Phosphorus", p.phosphorus, profile.phosphorus),
        ("Potassium", p.potassium, profile.potassium),
    ] {
        let points = nutrient_points(value, required);
        total += points;
        if points < WEIGHT_NUTRIENT {
            reasons.push(format!(
                "{} {:.0} kg/ha is below the {:.0} kg/ha this crop needs",
                label, value, required
            ));
        }
    }

    if reasons.len() == 1 && ph >= WEIGHT_PH {
        reasons.push("Nutrient levels meet crop requirements".into());
    }
    reasons.push(format!("{} season crop", profile.season));

    let score = total.clamp(0.0, 100.0).round() as u8;
    CropSuggestion {
        crop: profile.name.to_string(),
        score,
        classification: HealthClass::from_score(score),
        reasons,
    }
}

/// Rank every known crop and keep the best `limit` (clamped to 1..=MAX_LIMIT)
pub fn suggest(params: &SoilParameters, limit: usize) -> Vec<CropSuggestion> {
    let limit = limit.clamp(1, MAX_LIMIT);
    let mut ranked: Vec<CropSuggestion> = CROP_PROFILES
        .iter()
        .map(|profile| score_crop(params, profile))
        .collect();

    ranked.sort_by(|a, b| match b.score.cmp(&a.score) {
        Ordering::Equal => a.crop.cmp(&b.crop),
        other => other,
    });
    ranked.truncate(limit);
    ranked
}
