// api/src/recommendation/tables.rs
// Static lookup tables for disease detection: per-crop disease lists and
// per-disease treatment, symptom and weather profiles.

use shared::models::{TreatmentPlan, WeatherFactors};

// ── Crop → disease lists ─────────────────────────────────────────────────────

pub struct CropDiseases {
    pub crop: &'static str,
    pub aliases: &'static [&'static str],
    pub diseases: &'static [&'static str],
}

pub static CROP_DISEASES: &[CropDiseases] = &[
    CropDiseases {
        crop: "Rice",
        aliases: &["paddy"],
        diseases: &["Rice Blast", "Bacterial Leaf Blight", "Brown Spot", "Sheath Blight"],
    },
    CropDiseases {
        crop: "Wheat",
        aliases: &[],
        diseases: &["Leaf Rust", "Powdery Mildew", "Loose Smut", "Karnal Bunt"],
    },
    CropDiseases {
        crop: "Tomato",
        aliases: &[],
        diseases: &["Early Blight", "Late Blight", "Leaf Curl Virus", "Septoria Leaf Spot"],
    },
    CropDiseases {
        crop: "Potato",
        aliases: &[],
        diseases: &["Late Blight", "Early Blight", "Black Scurf", "Common Scab"],
    },
    CropDiseases {
        crop: "Maize",
        aliases: &["corn"],
        diseases: &["Common Rust", "Northern Leaf Blight", "Gray Leaf Spot", "Stalk Rot"],
    },
    CropDiseases {
        crop: "Cotton",
        aliases: &[],
        diseases: &["Cotton Leaf Curl", "Bacterial Blight", "Root Rot", "Alternaria Leaf Spot"],
    },
];

/// Used when the crop is missing or not in [`CROP_DISEASES`]
pub const DEFAULT_DISEASES: &[&str] = &["Leaf Spot", "Powdery Mildew", "Root Rot", "Downy Mildew"];

/// Disease list for a crop name; case-insensitive, aliases accepted
pub fn diseases_for(crop: Option<&str>) -> &'static [&'static str] {
    let Some(crop) = crop.map(str::trim).filter(|c| !c.is_empty()) else {
        return DEFAULT_DISEASES;
    };
    CROP_DISEASES
        .iter()
        .find(|entry| {
            entry.crop.eq_ignore_ascii_case(crop)
                || entry.aliases.iter().any(|a| a.eq_ignore_ascii_case(crop))
        })
        .map(|entry| entry.diseases)
        .unwrap_or(DEFAULT_DISEASES)
}

// ── Disease profiles ─────────────────────────────────────────────────────────

pub struct DiseaseProfile {
    pub disease: &'static str,
    pub organic: &'static [&'static str],
    pub chemical: &'static [&'static str],
    pub immediate: &'static [&'static str],
    pub preventive: &'static [&'static str],
    pub symptoms: &'static [&'static str],
    pub temperature: &'static str,
    pub humidity: &'static str,
    pub rainfall: &'static str,
    pub risk_level: &'static str,
}

impl DiseaseProfile {
    pub fn treatment_plan(&self) -> TreatmentPlan {
        TreatmentPlan {
            organic: owned(self.organic),
            chemical: owned(self.chemical),
            immediate: owned(self.immediate),
            preventive: owned(self.preventive),
        }
    }

    pub fn symptoms(&self) -> Vec<String> {
        owned(self.symptoms)
    }

    pub fn weather_factors(&self) -> WeatherFactors {
        WeatherFactors {
            temperature: self.temperature.to_string(),
            humidity: self.humidity.to_string(),
            rainfall: self.rainfall.to_string(),
            risk_level: self.risk_level.to_string(),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub static DEFAULT_PROFILE: DiseaseProfile = DiseaseProfile {
    disease: "Unknown",
    organic: &[
        "Spray neem oil (5 ml per litre of water) every 7 days",
        "Apply Trichoderma-enriched compost around the root zone",
    ],
    chemical: &["Apply a broad-spectrum fungicide such as Mancozeb 75% WP at 2 g per litre"],
    immediate: &[
        "Remove and destroy visibly infected leaves",
        "Isolate affected plants where possible",
    ],
    preventive: &[
        "Rotate crops each season",
        "Use certified disease-free seed",
        "Avoid overhead irrigation late in the day",
    ],
    symptoms: &[
        "Discoloured or spotted leaves",
        "Wilting or stunted growth",
        "Premature leaf drop",
    ],
    temperature: "20-30°C",
    humidity: "Above 70%",
    rainfall: "Frequent light showers",
    risk_level: "Moderate",
};

pub static DISEASE_PROFILES: &[DiseaseProfile] = &[
    DiseaseProfile {
        disease: "Rice Blast",
        organic: &[
            "Spray Pseudomonas fluorescens at 10 g per litre",
            "Apply silica-rich rice husk ash to strengthen leaves",
        ],
        chemical: &[
            "Tricyclazole 75% WP at 0.6 g per litre",
            "Isoprothiolane 40% EC at 1.5 ml per litre",
        ],
        immediate: &[
            "Drain standing water for 3-4 days",
            "Stop nitrogen top-dressing until lesions stop spreading",
        ],
        preventive: &[
            "Grow blast-resistant varieties",
            "Split nitrogen into three doses",
            "Treat seed with Carbendazim before sowing",
        ],
        symptoms: &[
            "Spindle-shaped lesions with grey centres on leaves",
            "Brown to black neck rot at panicle base",
            "Empty or partially filled grains",
        ],
        temperature: "24-28°C",
        humidity: "Above 90%",
        rainfall: "Prolonged leaf wetness and drizzle",
        risk_level: "High",
    },
    DiseaseProfile {
        disease: "Bacterial Leaf Blight",
        organic: &["Spray fresh cow dung extract (20%) on foliage"],
        chemical: &["Streptocycline 0.01% with copper oxychloride 0.25%"],
        immediate: &[
            "Avoid flooding fields from infected neighbours",
            "Withhold nitrogen fertilizer",
        ],
        preventive: &[
            "Use resistant varieties",
            "Keep bunds and channels weed-free",
        ],
        symptoms: &[
            "Yellow to straw-coloured wavy lesions from leaf tips",
            "Milky bacterial ooze on young lesions",
        ],
        temperature: "25-34°C",
        humidity: "Above 70%",
        rainfall: "Heavy rain with strong wind",
        risk_level: "High",
    },
    DiseaseProfile {
        disease: "Brown Spot",
        organic: &["Apply potash-rich organic manure", "Spray neem seed kernel extract (5%)"],
        chemical: &["Mancozeb 75% WP at 2.5 g per litre", "Edifenphos 50% EC at 1 ml per litre"],
        immediate: &["Correct potassium and silicon deficiency"],
        preventive: &["Treat seed with hot water at 53°C for 10 minutes", "Balance soil nutrition"],
        symptoms: &[
            "Oval brown spots with grey centres on leaves",
            "Discoloured, shrivelled grains",
        ],
        temperature: "25-30°C",
        humidity: "Above 80%",
        rainfall: "Intermittent rain",
        risk_level: "Moderate",
    },
    DiseaseProfile {
        disease: "Sheath Blight",
        organic: &["Apply Trichoderma viride at 2.5 kg per hectare with farmyard manure"],
        chemical: &["Hexaconazole 5% EC at 2 ml per litre", "Validamycin 3% L at 2.5 ml per litre"],
        immediate: &["Reduce plant density by removing infected tillers"],
        preventive: &["Maintain wider spacing", "Avoid excess nitrogen"],
        symptoms: &[
            "Greenish-grey oval lesions on leaf sheaths near water line",
            "Lesions merge into bands with brown borders",
        ],
        temperature: "28-32°C",
        humidity: "Above 95%",
        rainfall: "Dense canopy with standing water",
        risk_level: "High",
    },
    DiseaseProfile {
        disease: "Leaf Rust",
        organic: &["Spray sulphur dust at 25 kg per hectare"],
        chemical: &["Propiconazole 25% EC at 1 ml per litre"],
        immediate: &["Spray at first appearance of pustules"],
        preventive: &["Sow rust-resistant varieties", "Avoid late sowing"],
        symptoms: &["Orange-brown pustules scattered on leaves", "Premature drying of leaves"],
        temperature: "15-22°C",
        humidity: "Dew or free moisture on leaves",
        rainfall: "Light showers and heavy dew",
        risk_level: "High",
    },
    DiseaseProfile {
        disease: "Powdery Mildew",
        organic: &["Spray diluted milk (1:9) weekly", "Apply potassium bicarbonate solution"],
        chemical: &["Wettable sulphur 80% WP at 2 g per litre", "Hexaconazole 5% EC at 1 ml per litre"],
        immediate: &["Remove heavily coated leaves"],
        preventive: &["Improve air circulation", "Avoid dense planting"],
        symptoms: &["White powdery patches on leaves and stems", "Yellowing and curling of leaves"],
        temperature: "20-25°C",
        humidity: "50-70%",
        rainfall: "Dry days with cool nights",
        risk_level: "Moderate",
    },
    DiseaseProfile {
        disease: "Late Blight",
        organic: &["Spray copper-based Bordeaux mixture (1%)"],
        chemical: &[
            "Metalaxyl 8% + Mancozeb 64% WP at 2.5 g per litre",
            "Cymoxanil 8% + Mancozeb 64% WP at 3 g per litre",
        ],
        immediate: &[
            "Destroy infected plants away from the field",
            "Stop irrigation until foliage dries",
        ],
        preventive: &[
            "Plant certified tubers or seedlings",
            "Spray protectant fungicide before monsoon onset",
            "Hill up soil around stems",
        ],
        symptoms: &[
            "Water-soaked dark lesions on leaves",
            "White fungal growth on leaf undersides",
            "Brown rot in tubers or fruit",
        ],
        temperature: "10-20°C",
        humidity: "Above 90%",
        rainfall: "Cool, wet, cloudy weather",
        risk_level: "Very High",
    },
    DiseaseProfile {
        disease: "Early Blight",
        organic: &["Spray neem oil (3%)", "Mulch to prevent soil splash"],
        chemical: &["Chlorothalonil 75% WP at 2 g per litre", "Mancozeb 75% WP at 2.5 g per litre"],
        immediate: &["Remove lower infected leaves"],
        preventive: &["Stake plants to keep foliage off soil", "Rotate with non-solanaceous crops"],
        symptoms: &[
            "Dark concentric-ringed spots on older leaves",
            "Yellowing around lesions",
        ],
        temperature: "24-29°C",
        humidity: "Above 75%",
        rainfall: "Alternating wet and dry periods",
        risk_level: "Moderate",
    },
    DiseaseProfile {
        disease: "Leaf Curl Virus",
        organic: &["Install yellow sticky traps for whiteflies", "Spray neem oil to deter vectors"],
        chemical: &["Imidacloprid 17.8% SL at 0.3 ml per litre to control whitefly vectors"],
        immediate: &["Uproot and burn infected plants"],
        preventive: &["Raise seedlings under insect-proof net", "Use tolerant hybrids"],
        symptoms: &["Upward curling and puckering of leaves", "Stunted plants with small fruits"],
        temperature: "25-32°C",
        humidity: "Low to moderate",
        rainfall: "Dry spells favour whitefly build-up",
        risk_level: "High",
    },
    DiseaseProfile {
        disease: "Common Rust",
        organic: &["Spray sulphur-based organic fungicide"],
        chemical: &["Mancozeb 75% WP at 2.5 g per litre", "Azoxystrobin 23% SC at 1 ml per litre"],
        immediate: &["Spray at first sign of pustules on lower leaves"],
        preventive: &["Plant resistant hybrids", "Sow early to escape peak infection"],
        symptoms: &["Cinnamon-brown pustules on both leaf surfaces"],
        temperature: "16-25°C",
        humidity: "Above 95%",
        rainfall: "Heavy dew and light rain",
        risk_level: "Moderate",
    },
];

/// Profile for a disease; falls back to [`DEFAULT_PROFILE`]
pub fn profile_for(disease: &str) -> &'static DiseaseProfile {
    DISEASE_PROFILES
        .iter()
        .find(|p| p.disease.eq_ignore_ascii_case(disease))
        .unwrap_or(&DEFAULT_PROFILE)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rice_has_four_diseases() {
        let rice = diseases_for(Some("Rice"));
        assert_eq!(rice.len(), 4);
        assert!(rice.contains(&"Rice Blast"));
    }

    #[test]
    fn crop_lookup_ignores_case_and_accepts_aliases() {
        assert_eq!(diseases_for(Some("  rICE ")), diseases_for(Some("Rice")));
        assert_eq!(diseases_for(Some("paddy")), diseases_for(Some("Rice")));
        assert_eq!(diseases_for(Some("corn")), diseases_for(Some("Maize")));
    }

    #[test]
    fn missing_or_unknown_crop_uses_default_table() {
        assert_eq!(diseases_for(None), DEFAULT_DISEASES);
        assert_eq!(diseases_for(Some("")), DEFAULT_DISEASES);
        assert_eq!(diseases_for(Some("Dragonfruit")), DEFAULT_DISEASES);
    }

    #[test]
    fn every_table_is_non_empty() {
        assert!(!DEFAULT_DISEASES.is_empty());
        for entry in CROP_DISEASES {
            assert!(!entry.diseases.is_empty(), "{}", entry.crop);
        }
    }

    #[test]
    fn unknown_disease_falls_back_to_default_profile() {
        assert_eq!(profile_for("Karnal Bunt").disease, "Unknown");
        assert_eq!(profile_for("rice blast").disease, "Rice Blast");
    }

    #[test]
    fn profiles_have_complete_plans() {
        for profile in DISEASE_PROFILES.iter().chain(std::iter::once(&DEFAULT_PROFILE)) {
            let plan = profile.treatment_plan();
            assert!(!plan.organic.is_empty(), "{}", profile.disease);
            assert!(!plan.chemical.is_empty(), "{}", profile.disease);
            assert!(!plan.immediate.is_empty(), "{}", profile.disease);
            assert!(!plan.preventive.is_empty(), "{}", profile.disease);
            assert!(!profile.symptoms.is_empty(), "{}", profile.disease);
        }
    }
}
