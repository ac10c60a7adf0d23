// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::listing::DEFAULT_REFRESH_INTERVAL;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CONFIG_FILE: &str = "jobwatch.yaml";
pub const DEFAULT_LOG_FILE: &str = "/tmp/jobwatch.log";

#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub base_url: String,
    pub refresh_interval: Duration,
    /// `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
    /// HTML file the `watch` command renders into
    pub listing_output: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: None,
            listing_output: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigSection {
    base_url: Option<String>,
    refresh_interval_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    listing_output: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ConfigSection,
    #[serde(default)]
    production: ConfigSection,
}

impl PortalConfig {
    /// Load defaults, then the YAML file, then `JOBWATCH_*` variables
    pub fn load() -> Result<Self> {
        let environment = Self::environment();

        let explicit = std::env::var("JOBWATCH_CONFIG").ok().map(PathBuf::from);
        let (path, required) = match explicit {
            Some(path) => (path, true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        Self::load_with(&environment, &path, required, |key| std::env::var(key).ok())
    }

    /// Name of the config file section in use, `local` unless overridden
    pub fn environment() -> String {
        std::env::var("JOBWATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_with(
        environment: &str,
        config_path: &Path,
        required: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let file: ConfigFile = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;

            let section = match environment {
                "production" => file.production,
                _ => file.local,
            };
            config.apply_section(section);
        } else if required {
            anyhow::bail!("Config file not found: {}", config_path.display());
        }

        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_section(&mut self, section: ConfigSection) {
        if let Some(base_url) = section.base_url {
            self.base_url = base_url;
        }
        if let Some(secs) = section.refresh_interval_secs {
            self.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = section.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if section.listing_output.is_some() {
            self.listing_output = section.listing_output;
        }
        if let Some(log_file) = section.log_file {
            self.log_file = log_file;
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = env("JOBWATCH_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(secs) = env("JOBWATCH_REFRESH_SECS") {
            let secs = secs
                .parse::<u64>()
                .context("JOBWATCH_REFRESH_SECS must be a number of seconds")?;
            self.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = env("JOBWATCH_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .context("JOBWATCH_TIMEOUT_SECS must be a number of seconds")?;
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(log_file) = env("JOBWATCH_LOG_FILE") {
            self.log_file = PathBuf::from(log_file);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        if self.refresh_interval.is_zero() {
            anyhow::bail!("refresh interval must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("jobwatch.yaml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            PortalConfig::load_with("local", &dir.path().join("none.yaml"), false, no_env)
                .unwrap();

        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.refresh_interval, Duration::from_millis(300_000));
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_missing_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            PortalConfig::load_with("local", &dir.path().join("none.yaml"), true, no_env);
        assert!(result.is_err());
    }

    #[test]
    fn test_section_selected_by_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
local:
  base_url: "http://localhost:5000"
production:
  base_url: "https://jobs.example.org"
  refresh_interval_secs: 600
  request_timeout_secs: 20
  listing_output: "/var/www/jobs.html"
"#,
        );

        let local = PortalConfig::load_with("local", &path, true, no_env).unwrap();
        assert_eq!(local.base_url, "http://localhost:5000");
        assert_eq!(local.refresh_interval, DEFAULT_REFRESH_INTERVAL);

        let production = PortalConfig::load_with("production", &path, true, no_env).unwrap();
        assert_eq!(production.base_url, "https://jobs.example.org");
        assert_eq!(production.refresh_interval, Duration::from_secs(600));
        assert_eq!(production.request_timeout, Some(Duration::from_secs(20)));
        assert_eq!(
            production.listing_output,
            Some(PathBuf::from("/var/www/jobs.html"))
        );
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "local:\n  base_url: \"http://from-file\"\n");
        let vars: HashMap<&str, &str> = HashMap::from([
            ("JOBWATCH_BASE_URL", "http://from-env"),
            ("JOBWATCH_REFRESH_SECS", "30"),
            ("JOBWATCH_LOG_FILE", "/tmp/other.log"),
        ]);

        let config = PortalConfig::load_with("local", &path, true, |key| {
            vars.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.base_url, "http://from-env");
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.log_file, PathBuf::from("/tmp/other.log"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "local:\n  refresh_interval_secs: 0\n");
        assert!(PortalConfig::load_with("local", &path, true, no_env).is_err());

        let bad_number = |key: &str| (key == "JOBWATCH_TIMEOUT_SECS").then(|| "soon".to_string());
        let missing = dir.path().join("none.yaml");
        assert!(PortalConfig::load_with("local", &missing, false, bad_number).is_err());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "local:\n  base_ulr: \"typo\"\n");
        assert!(PortalConfig::load_with("local", &path, true, no_env).is_err());
    }
}
