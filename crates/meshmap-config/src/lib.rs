//! Shared configuration for meshmap.
//!
//! TOML profiles (one per map backend) merged over defaults and `MESHMAP_`
//! environment variables, and translation to `meshmap_core::ServiceConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use meshmap_core::{Endpoints, LivenessThresholds, ServiceConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named map backend.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://map.example.org/api").
    pub base_url: String,

    /// Main API base serving `/devices`, when it differs from `base_url`.
    pub main_url: Option<String>,

    /// Override for the GPS track endpoint.
    pub gps_endpoint: Option<String>,

    /// Override for the device metrics endpoint.
    pub device_metrics_endpoint: Option<String>,

    /// Override for the environment metrics endpoint.
    pub environment_metrics_endpoint: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept self-signed certificates.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Seconds since the last report for a node to count as online/active.
    pub active_threshold_secs: Option<u64>,

    /// Seconds since the last report for a node to count as recently active.
    pub recently_active_threshold_secs: Option<u64>,
}

impl Profile {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "meshmap", "meshmap").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("meshmap");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MESHMAP_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile translation ─────────────────────────────────────────────

fn validate_url(field: &str, raw: &str) -> Result<String, ConfigError> {
    url::Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    Ok(raw.trim_end_matches('/').to_owned())
}

/// Build the endpoint layout for a profile, applying per-endpoint overrides.
pub fn profile_endpoints(profile: &Profile) -> Result<Endpoints, ConfigError> {
    let base = validate_url("base_url", &profile.base_url)?;
    let mut endpoints = Endpoints::from_base(&base);

    if let Some(ref main) = profile.main_url {
        endpoints = endpoints.with_main(&validate_url("main_url", main)?);
    }
    if let Some(ref gps) = profile.gps_endpoint {
        endpoints.gps = validate_url("gps_endpoint", gps)?;
    }
    if let Some(ref metrics) = profile.device_metrics_endpoint {
        endpoints.device_metrics = validate_url("device_metrics_endpoint", metrics)?;
    }
    if let Some(ref metrics) = profile.environment_metrics_endpoint {
        endpoints.environment_metrics = validate_url("environment_metrics_endpoint", metrics)?;
    }

    Ok(endpoints)
}

/// Build a `ServiceConfig` from a profile alone, without CLI flag overrides.
pub fn profile_to_service_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ServiceConfig, ConfigError> {
    let endpoints = profile_endpoints(profile)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let baseline = LivenessThresholds::default();
    let thresholds = LivenessThresholds {
        active_secs: profile.active_threshold_secs.unwrap_or(baseline.active_secs),
        recently_active_secs: profile
            .recently_active_threshold_secs
            .unwrap_or(baseline.recently_active_secs),
    };
    if thresholds.recently_active_secs < thresholds.active_secs {
        return Err(ConfigError::Validation {
            field: "recently_active_threshold_secs".into(),
            reason: format!(
                "must be at least active_threshold_secs ({})",
                thresholds.active_secs
            ),
        });
    }

    Ok(ServiceConfig {
        endpoints,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        thresholds,
    })
}
