use anyhow::Result;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;
use crate::metrics;

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    pub fn init(format: LogFormat) -> Result<Self> {
        let registry = Self::registry()?;

        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "api=debug,tower_http=debug".into());

        let (text_layer, json_layer) = match format {
            LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
            LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(text_layer)
            .with(json_layer)
            .try_init()?;

        tracing::info!(%format, "Observability stack initialized (Prometheus + tracing)");
        Ok(Self { registry })
    }

    /// Prefixed registry with every service metric registered
    pub fn registry() -> Result<Registry> {
        let registry = Registry::new_custom(Some("agrismart".into()), None)?;
        metrics::register_all(&registry)?;
        metrics::PROCESS_START_TIME.set(chrono::Utc::now().timestamp());
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = Observability::registry().unwrap();
        let families = registry.gather();
        // unlabelled metrics always report
        assert!(families.len() >= 3, "expected ≥3 metric families, got {}", families.len());
    }

    #[test]
    fn test_metric_names_prefixed() {
        let registry = Observability::registry().unwrap();
        metrics::record_soil_analysis("Good");
        for fam in &registry.gather() {
            assert!(
                fam.get_name().starts_with("agrismart_"),
                "metric {} missing prefix",
                fam.get_name()
            );
        }
    }
}
