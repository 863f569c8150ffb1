use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl LogFormat {
    /// Read before tracing is up, so bad values fall back silently
    pub fn from_env() -> Self {
        env::var("LOG_FORMAT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

/// Server settings sourced from the environment (after `.env` is loaded)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
    pub predictor_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            log_format: LogFormat::Text,
            predictor_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = parse_or("HOST", lookup("HOST"), DEFAULT_HOST);
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT);
        let log_format = parse_or("LOG_FORMAT", lookup("LOG_FORMAT"), LogFormat::Text);

        let predictor_seed =
            lookup("PREDICTOR_SEED").and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    tracing::warn!("Invalid value for PREDICTOR_SEED (`{raw}`), using entropy");
                    None
                }
            });

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let config = Self {
            addr: SocketAddr::new(host, port),
            cors_origins,
            log_format,
            predictor_seed,
        };

        tracing::info!(
            addr = %config.addr,
            cors_origins = ?config.cors_origins,
            log_format = ?config.log_format,
            seeded = config.predictor_seed.is_some(),
            "Configuration loaded"
        );
        config
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match raw {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid value for {key} (`{raw}`), using default {default}");
                default
            }
        },
        None => default,
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), AppConfig::default());
        assert_eq!(AppConfig::default().addr.to_string(), "0.0.0.0:3001");
    }

    #[test]
    fn reads_all_keys() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("LOG_FORMAT", "JSON"),
            ("PREDICTOR_SEED", "42"),
        ]);
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.predictor_seed, Some(42));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("HOST", "not-an-ip"),
            ("PORT", "99999"),
            ("LOG_FORMAT", "xml"),
            ("PREDICTOR_SEED", "-1"),
            ("CORS_ORIGINS", " , "),
        ]);
        assert_eq!(config, AppConfig::default());
    }
}
