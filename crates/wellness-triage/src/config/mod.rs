use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

use crate::workflows::triage::GateConfig;

/// Deployment stage, parsed leniently from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Test => "test",
            AppEnvironment::Production => "production",
        }
    }
}

/// Process configuration: HTTP binding, log filter and confirmation-gate thresholds.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub triage: GateConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("APP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            None => 3000,
        };

        let defaults = GateConfig::default();
        let triage = GateConfig {
            low_confidence_threshold: parsed(
                &lookup,
                "TRIAGE_LOW_CONFIDENCE",
                defaults.low_confidence_threshold,
            )?,
            multiple_condition_threshold: parsed(
                &lookup,
                "TRIAGE_MULTIPLE_CONDITIONS",
                defaults.multiple_condition_threshold,
            )?,
            overlapping_cluster_threshold: parsed(
                &lookup,
                "TRIAGE_OVERLAPPING_CLUSTERS",
                defaults.overlapping_cluster_threshold,
            )?,
        };
        if triage.low_confidence_threshold > 100 {
            return Err(ConfigError::InvalidThreshold {
                variable: "TRIAGE_LOW_CONFIDENCE",
            });
        }

        Ok(Self {
            environment: AppEnvironment::parse(&text("APP_ENV", "development")),
            server: ServerConfig {
                host: text("APP_HOST", "127.0.0.1"),
                port,
            },
            telemetry: TelemetryConfig {
                log_level: text("APP_LOG_LEVEL", "info"),
            },
            triage,
        })
    }
}

fn parsed<F, T>(lookup: &F, variable: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(variable).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidThreshold { variable })
    })
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `localhost` maps to the IPv4 loopback; anything else must be a literal address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{variable} must be a non-negative integer within range")]
    InvalidThreshold { variable: &'static str },
}
