use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Default per-request timeout for the monitored application.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Product variant of the monitored application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppFamily {
    Sonarr,
    Radarr,
    Lidarr,
    Readarr,
    Prowlarr,
    Whisparr,
    Bazarr,
    Sabnzbd,
}

impl AppFamily {
    pub const ALL: [AppFamily; 8] = [
        AppFamily::Sonarr,
        AppFamily::Radarr,
        AppFamily::Lidarr,
        AppFamily::Readarr,
        AppFamily::Prowlarr,
        AppFamily::Whisparr,
        AppFamily::Bazarr,
        AppFamily::Sabnzbd,
    ];

    /// Lowercase name, also used as the metric namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sonarr => "sonarr",
            Self::Radarr => "radarr",
            Self::Lidarr => "lidarr",
            Self::Readarr => "readarr",
            Self::Prowlarr => "prowlarr",
            Self::Whisparr => "whisparr",
            Self::Bazarr => "bazarr",
            Self::Sabnzbd => "sabnzbd",
        }
    }

    /// API version the family speaks unless configured otherwise.
    pub fn default_api_version(&self) -> ApiVersion {
        match self {
            Self::Sonarr | Self::Radarr | Self::Whisparr => ApiVersion::V3,
            _ => ApiVersion::V1,
        }
    }

    /// Whether request paths carry a `/v1` or `/v3` segment.
    pub fn is_versioned(&self) -> bool {
        !matches!(self, Self::Bazarr | Self::Sabnzbd)
    }

    pub fn default_api_root_path(&self) -> &'static str {
        match self {
            Self::Sabnzbd => "/sabnzbd",
            _ => "",
        }
    }
}

impl std::fmt::Display for AppFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        AppFamily::ALL
            .into_iter()
            .find(|family| family.as_str() == lower)
            .ok_or_else(|| format!("unknown application family: {s}"))
    }
}

/// REST API version segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    V3,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V3 => "v3",
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" => Ok(Self::V1),
            "v3" => Ok(Self::V3),
            other => Err(format!("unsupported API version: {other}")),
        }
    }
}

/// API key for the monitored application. Never printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolved description of one monitored application instance.
///
/// Built once at startup and shared read-only by every collector targeting
/// the instance. `base_url` is deliberately left unparsed: a malformed URL is
/// reported by the request client at scrape time.
#[derive(Debug, Clone)]
pub struct AppDescriptor {
    pub family: AppFamily,
    pub api_version: ApiVersion,
    pub base_url: String,
    pub api_key: ApiKey,
    pub tls_verify: bool,
    pub extra_metrics: bool,
    pub timeout: Duration,
    pub api_root_path: String,
}

impl AppDescriptor {
    /// Create a descriptor with the family's defaults.
    pub fn new(family: AppFamily, base_url: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            family,
            api_version: family.default_api_version(),
            base_url: base_url.into(),
            api_key,
            tls_verify: true,
            extra_metrics: false,
            timeout: DEFAULT_TIMEOUT,
            api_root_path: family.default_api_root_path().to_string(),
        }
    }

    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_extra_metrics(mut self, enabled: bool) -> Self {
        self.extra_metrics = enabled;
        self
    }

    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_root_path(mut self, root: impl Into<String>) -> Self {
        self.api_root_path = root.into();
        self
    }

    /// Metric namespace for every descriptor built from this app.
    pub fn namespace(&self) -> &'static str {
        self.family.as_str()
    }

    /// Path prefix placed between the base URL and the resource path.
    pub fn api_prefix(&self) -> String {
        api_prefix(self.family, self.api_version, &self.api_root_path)
    }
}

/// Build the URL path prefix for a family and API version.
///
/// Versioned families get `{root}/api/{version}`; Bazarr and SABnzbd get
/// `{root}/api` and ignore the version.
pub fn api_prefix(family: AppFamily, version: ApiVersion, root: &str) -> String {
    let root = root.trim_end_matches('/');
    let root = if root.is_empty() || root.starts_with('/') {
        root.to_string()
    } else {
        format!("/{root}")
    };

    if family.is_versioned() {
        format!("{root}/api/{version}")
    } else {
        format!("{root}/api")
    }
}
