//! Runtime settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then environment variables. Only a known set of env vars is read so
//! stray process variables never leak into settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use solar_agent_core::SizingConstants;

use crate::constants::server::{
    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, DEFAULT_DATA_DIR, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::prompts::ResponseTemplates;
use crate::ConfigError;

/// Environment variables mapped onto top-level settings
const ENV_KEYS: &[&str] = &[
    "HOST",
    "PORT",
    "WEBHOOK_TOKEN",
    "DATA_DIR",
    "LOG_FORMAT",
    "REQUEST_TIMEOUT_SECS",
];

/// Prefix for nested estimation overrides, e.g. `ESTIMATION__SUN_HOURS=6`
const ESTIMATION_ENV_PREFIX: &str = "ESTIMATION__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    #[serde(alias = "JSON")]
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Bearer token for the webhook; empty or absent disables the check
    #[serde(default)]
    pub webhook_token: Option<String>,
    /// Directory holding installers.json, faqs.json and cost_tiers.json
    pub data_dir: PathBuf,
    #[serde(default)]
    pub log_format: LogFormat,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub estimation: SizingConstants,
    #[serde(default)]
    pub templates: ResponseTemplates,
}

impl Settings {
    /// Load from `SOLAR_CONFIG` (or `config/solar.toml` when present) and the
    /// process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let file = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::FileNotFound(path)),
            Some(path) => Some(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                path.exists().then_some(path)
            }
        };

        if let Some(ref path) = file {
            tracing::info!(path = %path.display(), "Loading settings file");
        }

        Self::from_sources(file.as_deref(), env_overrides(std::env::vars()))
    }

    /// Build from an optional file and an explicit env map
    pub fn from_sources(
        file: Option<&Path>,
        env: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("log_format", "pretty")?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .source(Some(env)),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "host",
                reason: "must not be empty".to_string(),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                field: "port",
                reason: "must be non-zero".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_secs",
                reason: "must be non-zero".to_string(),
            });
        }
        self.estimation.validate()?;
        Ok(())
    }

    /// Configured token, if the check is enabled
    pub fn webhook_token(&self) -> Option<&str> {
        self.webhook_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            webhook_token: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_format: LogFormat::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            estimation: SizingConstants::default(),
            templates: ResponseTemplates::default(),
        }
    }
}

/// Keep only the env vars settings understand
pub fn env_overrides(
    vars: impl IntoIterator<Item = (String, String)>,
) -> HashMap<String, String> {
    vars.into_iter()
        .filter(|(key, _)| {
            ENV_KEYS.contains(&key.as_str()) || key.starts_with(ESTIMATION_ENV_PREFIX)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_sources(None, HashMap::new()).unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.log_format, LogFormat::Pretty);
        assert_eq!(settings.webhook_token(), None);
        assert_eq!(settings.estimation, SizingConstants::default());
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_env_overrides() {
        let settings = Settings::from_sources(
            None,
            env(&[
                ("PORT", "9090"),
                ("WEBHOOK_TOKEN", "s3cret"),
                ("LOG_FORMAT", "json"),
                ("ESTIMATION__SUN_HOURS", "6.0"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.port, 9090);
        assert_eq!(settings.webhook_token(), Some("s3cret"));
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.estimation.sun_hours, 6.0);
        assert_eq!(settings.estimation.performance_ratio, 0.8);
    }

    #[test]
    fn test_blank_token_disables_auth() {
        let settings = Settings::from_sources(None, env(&[("WEBHOOK_TOKEN", "  ")])).unwrap();
        assert_eq!(settings.webhook_token(), None);
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solar.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "port = 7000\ndata_dir = \"/srv/solar\"\n\n[estimation]\narea_m2_per_kw = 8.0\n\n[templates]\ncapability_summary = \"Ask me about solar.\""
        )
        .unwrap();

        let settings = Settings::from_sources(Some(&path), env(&[("PORT", "7100")])).unwrap();
        assert_eq!(settings.port, 7100);
        assert_eq!(settings.data_dir, PathBuf::from("/srv/solar"));
        assert_eq!(settings.estimation.area_m2_per_kw, 8.0);
        assert_eq!(settings.estimation.min_size_kw, 0.5);
        assert_eq!(settings.templates.capability_summary, "Ask me about solar.");
        assert_eq!(
            settings.templates.cost_missing,
            ResponseTemplates::default().cost_missing
        );
    }

    #[test]
    fn test_invalid_tunable_rejected() {
        let result = Settings::from_sources(None, env(&[("ESTIMATION__TARIFF_PKR_PER_KWH", "0")]));
        assert!(matches!(result, Err(ConfigError::Core(_))));
    }

    #[test]
    fn test_env_filter() {
        let filtered = env_overrides(vec![
            ("PATH".to_string(), "/usr/bin".to_string()),
            ("PORT".to_string(), "1".to_string()),
            ("ESTIMATION__SUN_HOURS".to_string(), "5".to_string()),
        ]);
        assert_eq!(filtered.len(), 2);
        assert!(!filtered.contains_key("PATH"));
    }
}
