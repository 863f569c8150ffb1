// api/src/recommendation/soil.rs
//
// Soil Health Scoring
//
// ── Score breakdown (max 100 points) ────────────────────────────────────────
//
//  Factor            Weight   Full marks            Partial
//  ────────────────  ──────   ───────────────────   ───────────────────────
//  pH                  25 pt  6.0 – 7.5             15 pt in 5.5 – 8.0, else 5
//  Nitrogen            20 pt  ≥ 280 kg/ha           10 pt ≥ 140, else 4
//  Phosphorus          20 pt  ≥ 25 kg/ha            10 pt ≥ 10, else 4
//  Potassium           20 pt  ≥ 240 kg/ha           10 pt ≥ 110, else 4
//  Organic matter      15 pt  ≥ 2.5 %                8 pt ≥ 1.0, else 3
//
// ── Classification ──────────────────────────────────────────────────────────
//
//  80–100 Excellent · 60–79 Good · 40–59 Fair · 0–39 Poor
//
// Inputs are clamped, never rejected: pH to 0–14, everything else to ≥ 0,
// non-finite values to 0.

use shared::models::{HealthClass, ScoreFactor, SoilHealthReport, SoilParameters};

// ── Weight constants ──────────────────────────────────────────────────────────

pub const WEIGHT_PH: f64 = 25.0;
pub const WEIGHT_NITROGEN: f64 = 20.0;
pub const WEIGHT_PHOSPHORUS: f64 = 20.0;
pub const WEIGHT_POTASSIUM: f64 = 20.0;
pub const WEIGHT_ORGANIC_MATTER: f64 = 15.0;

const PH_IDEAL: (f64, f64) = (6.0, 7.5);
const PH_TOLERABLE: (f64, f64) = (5.5, 8.0);

/// (full-marks minimum, partial minimum) in kg/ha
const NITROGEN_THRESHOLDS: (f64, f64) = (280.0, 140.0);
const PHOSPHORUS_THRESHOLDS: (f64, f64) = (25.0, 10.0);
const POTASSIUM_THRESHOLDS: (f64, f64) = (240.0, 110.0);
const ORGANIC_MATTER_THRESHOLDS: (f64, f64) = (2.5, 1.0);

/// Soil moisture outside this band (%) gets an irrigation note
const MOISTURE_BAND: (f64, f64) = (15.0, 40.0);

/// Replace non-finite values with 0 and clamp into `[min, max]`
pub fn clamp_input(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        0.0
    }
}

/// Clamp every measurement into its physical range
pub fn normalize(params: &SoilParameters) -> SoilParameters {
    SoilParameters {
        ph: clamp_input(params.ph, 0.0, 14.0),
        nitrogen: clamp_input(params.nitrogen, 0.0, f64::MAX),
        phosphorus: clamp_input(params.phosphorus, 0.0, f64::MAX),
        potassium: clamp_input(params.potassium, 0.0, f64::MAX),
        organic_matter: clamp_input(params.organic_matter, 0.0, 100.0),
        moisture: params.moisture.map(|m| clamp_input(m, 0.0, 100.0)),
    }
}

fn tiered(
    value: f64,
    (full, partial): (f64, f64),
    weight: f64,
    partial_points: f64,
    floor: f64,
) -> f64 {
    if value >= full {
        weight
    } else if value >= partial {
        partial_points
    } else {
        floor
    }
}

/// Assess soil health from laboratory measurements
pub fn assess(params: &SoilParameters) -> SoilHealthReport {
    let p = normalize(params);
    let mut factors: Vec<ScoreFactor> = Vec::with_capacity(5);
    let mut recommendations: Vec<String> = Vec::new();

    // ── pH ───────────────────────────────────────────────────────────────────
    let ph_points = if (PH_IDEAL.0..=PH_IDEAL.1).contains(&p.ph) {
        WEIGHT_PH
    } else if (PH_TOLERABLE.0..=PH_TOLERABLE.1).contains(&p.ph) {
        15.0
    } else {
        5.0
    };
    factors.push(ScoreFactor {
        name: "pH".into(),
        points_earned: ph_points,
        points_max: WEIGHT_PH,
        explanation: format!(
            "pH {:.1}; ideal range is {:.1}-{:.1}.",
            p.ph, PH_IDEAL.0, PH_IDEAL.1
        ),
    });
    if p.ph < PH_IDEAL.0 {
        recommendations.push("Soil is acidic: apply agricultural lime to raise pH.".into());
    } else if p.ph > PH_IDEAL.1 {
        recommendations
            .push("Soil is alkaline: apply gypsum or elemental sulphur to lower pH.".into());
    }

    // ── Nutrients ────────────────────────────────────────────────────────────
    let nutrients = [
        (
            "Nitrogen",
            p.nitrogen,
            NITROGEN_THRESHOLDS,
            WEIGHT_NITROGEN,
            "Apply nitrogen: urea, ammonium sulphate or well-rotted farmyard manure.",
        ),
        (
            "Phosphorus",
            p.phosphorus,
            PHOSPHORUS_THRESHOLDS,
            WEIGHT_PHOSPHORUS,
            "Apply phosphorus: single super phosphate, DAP or bone meal.",
        ),
        (
            "Potassium",
            p.potassium,
            POTASSIUM_THRESHOLDS,
            WEIGHT_POTASSIUM,
            "Apply potassium: muriate of potash or wood ash.",
        ),
    ];
    for (name, value, thresholds, weight, advice) in nutrients {
        let points = tiered(value, thresholds, weight, 10.0, 4.0);
        factors.push(ScoreFactor {
            name: name.into(),
            points_earned: points,
            points_max: weight,
            explanation: format!(
                "{} {:.0} kg/ha; full marks from {:.0} kg/ha.",
                name, value, thresholds.0
            ),
        });
        if points < weight {
            recommendations.push(advice.into());
        }
    }

    // ── Organic matter ───────────────────────────────────────────────────────
    let om_points = tiered(
        p.organic_matter,
        ORGANIC_MATTER_THRESHOLDS,
        WEIGHT_ORGANIC_MATTER,
        8.0,
        3.0,
    );
    factors.push(ScoreFactor {
        name: "Organic Matter".into(),
        points_earned: om_points,
        points_max: WEIGHT_ORGANIC_MATTER,
        explanation: format!(
            "Organic matter {:.1}%; full marks from {:.1}%.",
            p.organic_matter, ORGANIC_MATTER_THRESHOLDS.0
        ),
    });
    if om_points < WEIGHT_ORGANIC_MATTER {
        recommendations.push("Incorporate compost, green manure or crop residues.".into());
    }

    // Moisture is advisory only and does not affect the score
    if let Some(moisture) = p.moisture {
        if moisture < MOISTURE_BAND.0 {
            recommendations
                .push("Soil is dry: schedule irrigation and mulch to retain moisture.".into());
        } else if moisture > MOISTURE_BAND.1 {
            recommendations.push("Soil is waterlogged: improve field drainage.".into());
        }
    }

    let total: f64 = factors.iter().map(|f| f.points_earned).sum();
    let score = total.clamp(0.0, 100.0).round() as u8;

    if recommendations.is_empty() {
        recommendations.push("Soil is in good condition; maintain current practices.".into());
    }

    SoilHealthReport {
        score,
        classification: HealthClass::from_score(score),
        factors,
        recommendations,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal() -> SoilParameters {
        SoilParameters {
            ph: 6.5,
            nitrogen: 300.0,
            phosphorus: 30.0,
            potassium: 250.0,
            organic_matter: 3.0,
            moisture: None,
        }
    }

    #[test]
    fn ideal_soil_scores_100_excellent() {
        let report = assess(&ideal());
        assert_eq!(report.score, 100);
        assert_eq!(report.classification, HealthClass::Excellent);
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn weights_sum_to_100() {
        let total = WEIGHT_PH
            + WEIGHT_NITROGEN
            + WEIGHT_PHOSPHORUS
            + WEIGHT_POTASSIUM
            + WEIGHT_ORGANIC_MATTER;
        assert_eq!(total, 100.0);
    }

    #[test]
    fn factors_count_is_five() {
        assert_eq!(assess(&ideal()).factors.len(), 5);
    }

    #[test]
    fn acidic_soil_loses_ph_points() {
        let report = assess(&SoilParameters { ph: 5.7, ..ideal() });
        let ph = report.factors.iter().find(|f| f.name == "pH").unwrap();
        assert_eq!(ph.points_earned, 15.0);
        assert_eq!(report.score, 90);
        assert!(report.recommendations.iter().any(|r| r.contains("lime")));
    }

    #[test]
    fn depleted_soil_is_poor() {
        let report = assess(&SoilParameters {
            ph: 4.0,
            nitrogen: 50.0,
            phosphorus: 5.0,
            potassium: 50.0,
            organic_matter: 0.5,
            moisture: Some(5.0),
        });
        // 5 + 4 + 4 + 4 + 3
        assert_eq!(report.score, 20);
        assert_eq!(report.classification, HealthClass::Poor);
        assert!(report.recommendations.iter().any(|r| r.contains("irrigation")));
    }

    #[test]
    fn partial_nutrients_make_fair_or_good() {
        let report = assess(&SoilParameters {
            nitrogen: 150.0,
            phosphorus: 12.0,
            potassium: 120.0,
            ..ideal()
        });
        // 25 + 10 + 10 + 10 + 15
        assert_eq!(report.score, 70);
        assert_eq!(report.classification, HealthClass::Good);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let report = assess(&SoilParameters {
            ph: 20.0,
            nitrogen: -10.0,
            phosphorus: f64::NAN,
            potassium: f64::INFINITY,
            organic_matter: 500.0,
            moisture: Some(-3.0),
        });
        let clamped = normalize(&SoilParameters {
            ph: 20.0,
            nitrogen: -10.0,
            phosphorus: f64::NAN,
            potassium: f64::INFINITY,
            organic_matter: 500.0,
            moisture: Some(-3.0),
        });
        assert_eq!(clamped.ph, 14.0);
        assert_eq!(clamped.nitrogen, 0.0);
        assert_eq!(clamped.phosphorus, 0.0);
        assert_eq!(clamped.potassium, 0.0);
        assert_eq!(clamped.organic_matter, 100.0);
        assert_eq!(clamped.moisture, Some(0.0));
        assert!(report.score <= 100);
    }
}
