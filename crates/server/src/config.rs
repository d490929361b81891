use anyhow::{bail, Context, Result};
use arrgauge_core::{ApiKey, ApiVersion, AppDescriptor, AppFamily};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExporterConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub apps: Vec<AppConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// One monitored application as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub family: AppFamily,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: Option<ApiKey>,

    #[serde(default)]
    pub api_key_file: Option<PathBuf>,

    #[serde(default)]
    pub api_version: Option<ApiVersion>,

    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    #[serde(default)]
    pub extra_metrics: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub api_root_path: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9707
}

fn default_tls_verify() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ExporterConfig {
    /// Load the config file if it exists, otherwise start from defaults.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::info!(path = %config_path.display(), "configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read configuration file {}", config_path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse configuration file {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate every configured app and build its descriptor.
    pub fn resolve_apps(&self) -> Result<Vec<Arc<AppDescriptor>>> {
        if self.apps.is_empty() {
            bail!("No applications configured: add an [[apps]] entry or pass --family and --url");
        }

        self.apps
            .iter()
            .enumerate()
            .map(|(index, app)| {
                app.resolve()
                    .map(Arc::new)
                    .with_context(|| format!("Invalid configuration for apps[{index}] ({})", app.family))
            })
            .collect()
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl AppConfig {
    pub fn new(family: AppFamily, url: impl Into<String>) -> Self {
        Self {
            family,
            url: url.into(),
            api_key: None,
            api_key_file: None,
            api_version: None,
            tls_verify: default_tls_verify(),
            extra_metrics: false,
            timeout_secs: default_timeout_secs(),
            api_root_path: None,
        }
    }

    /// Build the descriptor. The URL is only checked for emptiness; a
    /// malformed URL surfaces on the first scrape.
    pub fn resolve(&self) -> Result<AppDescriptor> {
        let url = self.url.trim();
        if url.is_empty() {
            bail!("url must not be empty");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }

        let api_key = self.resolve_api_key()?;
        let mut app = AppDescriptor::new(self.family, url, api_key)
            .with_tls_verify(self.tls_verify)
            .with_extra_metrics(self.extra_metrics)
            .with_timeout(Duration::from_secs(self.timeout_secs));

        if let Some(version) = self.api_version {
            app = app.with_api_version(version);
        }
        if let Some(root) = &self.api_root_path {
            app = app.with_api_root_path(root.as_str());
        }

        Ok(app)
    }

    fn resolve_api_key(&self) -> Result<ApiKey> {
        let key = match (&self.api_key, &self.api_key_file) {
            (Some(key), None) => key.clone(),
            (None, Some(path)) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read API key file {}", path.display()))?;
                ApiKey::new(content.trim())
            }
            (Some(_), Some(_)) => bail!("api_key and api_key_file are mutually exclusive"),
            (None, None) => bail!("one of api_key or api_key_file is required"),
        };

        if key.is_empty() {
            bail!("API key must not be empty");
        }
        Ok(key)
    }
}
