use once_cell::sync::Lazy;
use prometheus::{
    opts, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Registry,
    TextEncoder,
};

macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}
macro_rules! histogram_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            HistogramVec::new(HistogramOpts::new($name, $help).buckets(LATENCY_BUCKETS.to_vec()), $labels)
                .unwrap()
        })
    };
}
macro_rules! counter {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntCounter::new($name, $help).unwrap())
    };
}
macro_rules! gauge {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntGauge::new($name, $help).unwrap())
    };
}

const LATENCY_BUCKETS: [f64; 12] = [
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> =
    histogram_vec!("http_request_duration_seconds", "HTTP request latency", &["method", "path"]);

// ── Validation ──────────────────────────────────────────────────────────────
pub static VALIDATION_FAILURES: Lazy<IntCounterVec> = counter_vec!(
    "validation_failures_total",
    "Requests rejected by schema validation",
    &["schema", "location"]
);
pub static SCHEMAS_REGISTERED: Lazy<IntGauge> =
    gauge!("schemas_registered", "Validation schemas loaded at startup");

// ── Recommendations ─────────────────────────────────────────────────────────
pub static DISEASE_DETECTIONS: Lazy<IntCounterVec> = counter_vec!(
    "disease_detections_total",
    "Disease detections by crop and severity",
    &["crop", "severity"]
);
pub static SOIL_ANALYSES: Lazy<IntCounterVec> = counter_vec!(
    "soil_analyses_total",
    "Soil health analyses by classification",
    &["classification"]
);
pub static CROP_SUGGESTIONS: Lazy<IntCounter> =
    counter!("crop_suggestions_total", "Crop suggestion lists produced");

// ── Process ─────────────────────────────────────────────────────────────────
pub static PROCESS_START_TIME: Lazy<IntGauge> = gauge!("process_start_time_seconds", "Process start time");

pub fn register_all(r: &Registry) -> prometheus::Result<()> {
    r.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    r.register(Box::new(VALIDATION_FAILURES.clone()))?;
    r.register(Box::new(SCHEMAS_REGISTERED.clone()))?;
    r.register(Box::new(DISEASE_DETECTIONS.clone()))?;
    r.register(Box::new(SOIL_ANALYSES.clone()))?;
    r.register(Box::new(CROP_SUGGESTIONS.clone()))?;
    r.register(Box::new(PROCESS_START_TIME.clone()))?;
    Ok(())
}

pub fn gather_metrics(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let families = r.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

pub fn observe_http(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn record_validation_failure(schema: &str, location: &str) {
    VALIDATION_FAILURES
        .with_label_values(&[schema, location])
        .inc();
}

pub fn record_disease_detection(crop: &str, severity: &str) {
    let crop = if crop.trim().is_empty() { "unknown" } else { crop };
    DISEASE_DETECTIONS
        .with_label_values(&[&crop.to_lowercase(), severity])
        .inc();
}

pub fn record_soil_analysis(classification: &str) {
    SOIL_ANALYSES.with_label_values(&[classification]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_registry() -> Registry {
        let r = Registry::new_custom(Some("t".into()), None).unwrap();
        register_all(&r).unwrap();
        r
    }

    #[test]
    fn test_http_request_counter() {
        let r = fresh_registry();
        observe_http("GET", "/health", 200, 0.002);
        let out = gather_metrics(&r);
        assert!(out.contains("t_http_requests_total"));
        assert!(out.contains("t_http_request_duration_seconds"));
    }

    #[test]
    fn test_validation_failure_labels() {
        let r = fresh_registry();
        record_validation_failure("product", "body");
        let out = gather_metrics(&r);
        assert!(out.contains("t_validation_failures_total"));
        assert!(out.contains("schema=\"product\""));
        assert!(out.contains("location=\"body\""));
    }

    #[test]
    fn test_disease_detection_lowercases_crop() {
        let r = fresh_registry();
        record_disease_detection("Rice", "high");
        record_disease_detection("", "low");
        let out = gather_metrics(&r);
        assert!(out.contains("crop=\"rice\""));
        assert!(out.contains("crop=\"unknown\""));
    }

    #[test]
    fn test_soil_analysis_counter() {
        let r = fresh_registry();
        record_soil_analysis("Excellent");
        let out = gather_metrics(&r);
        assert!(out.contains("t_soil_analyses_total"));
        assert!(out.contains("classification=\"Excellent\""));
    }

    #[test]
    fn test_gather_returns_valid_prometheus_format() {
        let r = fresh_registry();
        CROP_SUGGESTIONS.inc();
        let out = gather_metrics(&r);
        assert!(out.contains("# HELP"));
        assert!(out.contains("# TYPE"));
        assert!(out.contains("crop_suggestions_total"));
    }
}
