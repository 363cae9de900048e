// src/core/config_manager.rs
//! Unified configuration: environment selection, optional YAML file, env overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_INTAKE_URL: &str = "http://localhost:5000";
pub const DEFAULT_RECRUITER_URL: &str = "http://localhost:5000/recruiter";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    /// YAML file the service section came from, if any
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the applicant intake service (`/apply` lives here)
    pub intake_url: String,
    /// Base URL of the recruiter endpoints
    pub recruiter_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            intake_url: DEFAULT_INTAKE_URL.to_string(),
            recruiter_url: DEFAULT_RECRUITER_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: ServiceConfig,
    #[serde(default)]
    production: Option<ServiceConfig>,
}

impl ConfigManager {
    /// Load configuration. An explicit `config_path` must exist; otherwise
    /// `config.yaml` in the working directory is used when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let source = match config_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                default_path.exists().then_some(default_path)
            }
        };

        let service = match &source {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Self::service_from_yaml(&content, &environment)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
            None => {
                debug!("No config file, using defaults");
                ServiceConfig::default()
            }
        };

        let service = Self::apply_overrides(service, |key| std::env::var(key).ok())?;
        info!(
            intake_url = %service.intake_url,
            recruiter_url = %service.recruiter_url,
            timeout_seconds = service.timeout_seconds,
            "Service configuration ready"
        );

        Ok(Self {
            environment,
            service,
            source,
        })
    }

    fn get_environment() -> String {
        std::env::var("CHECKSYS_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Pick the section for `environment`; anything but "production" reads `local`
    pub fn service_from_yaml(content: &str, environment: &str) -> Result<ServiceConfig> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Invalid configuration YAML")?;

        match environment {
            "production" => config_file
                .production
                .ok_or_else(|| anyhow::anyhow!("Configuration has no production section")),
            _ => Ok(config_file.local),
        }
    }

    /// Apply `CHECKSYS_*` overrides and normalize base URLs
    pub fn apply_overrides<F>(mut service: ServiceConfig, lookup: F) -> Result<ServiceConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CHECKSYS_INTAKE_URL") {
            service.intake_url = url;
        }
        if let Some(url) = lookup("CHECKSYS_RECRUITER_URL") {
            service.recruiter_url = url;
        }
        if let Some(raw) = lookup("CHECKSYS_TIMEOUT_SECS") {
            service.timeout_seconds = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("CHECKSYS_TIMEOUT_SECS must be a whole number of seconds"))?;
        }

        service.intake_url = normalize_base_url(&service.intake_url)?;
        service.recruiter_url = normalize_base_url(&service.recruiter_url)?;
        Ok(service)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        anyhow::bail!("Service URL must start with http:// or https://: {}", raw);
    }
    Ok(trimmed.to_string())
}
