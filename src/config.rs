use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which collaborators back the schema and REST endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// HTTP clients talking to the configured upstreams.
    #[default]
    Live,
    /// In-memory fixtures.
    Demo,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Live => "live",
            Backend::Demo => "demo",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "live" => Ok(Backend::Live),
            "demo" => Ok(Backend::Demo),
            other => Err(anyhow!("unknown backend '{}', expected live or demo", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl UpstreamConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.url).with_context(|| format!("invalid url '{}'", self.url))?;
        if url.cannot_be_a_base() {
            return Err(anyhow!("'{}' cannot be used as a base url", self.url));
        }
        Ok(url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamsConfig {
    pub rest: UpstreamConfig,
    pub keeper: UpstreamConfig,
    pub slacker: UpstreamConfig,
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            rest: UpstreamConfig::new("http://localhost:8999/restapi/v2"),
            keeper: UpstreamConfig::new("http://localhost:8973/report/v2"),
            slacker: UpstreamConfig::new("http://localhost:80/slacker/v2"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: Backend,
    pub upstreams: UpstreamsConfig,
    pub log_level: Option<String>,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub cors_origin: Option<String>,
    pub backend: Option<Backend>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context("failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Loads `path` when given, otherwise starts from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(origin) = overrides.cors_origin {
            self.server.cors_origin = Some(origin);
        }
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = Some(level);
        }
        self
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Upstream URLs only matter for the live backend.
    pub fn validate(&self) -> Result<()> {
        if self.backend == Backend::Demo {
            return Ok(());
        }
        for (name, upstream) in [
            ("rest", &self.upstreams.rest),
            ("keeper", &self.upstreams.keeper),
            ("slacker", &self.upstreams.slacker),
        ] {
            upstream
                .base_url()
                .with_context(|| format!("upstream '{}' is misconfigured", name))?;
            if upstream.timeout_secs == 0 {
                return Err(anyhow!("upstream '{}' timeout must be positive", name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn parses_full_document() {
        let yaml = r#"
server:
  port: 8080
  cors_origin: "http://localhost:3000"
backend: demo
log_level: debug
upstreams:
  rest:
    url: "https://rest.internal/restapi/v2"
    timeout_secs: 5
  keeper:
    url: "https://keeper.internal/report/v2"
  slacker:
    url: "https://slacker.internal/slacker/v2"
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origin.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.backend, Backend::Demo);
        assert_eq!(config.upstreams.rest.timeout(), Duration::from_secs(5));
        assert_eq!(config.upstreams.keeper.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_invalid_upstream_url_in_live_mode() {
        let yaml = r#"
upstreams:
  rest:
    url: "not a url"
  keeper:
    url: "http://keeper"
  slacker:
    url: "http://slacker"
"#;
        let err = AppConfig::from_yaml(yaml).unwrap_err();
        assert!(format!("{:#}", err).contains("rest"));

        let demo = format!("backend: demo\n{}", yaml);
        assert!(AppConfig::from_yaml(&demo).is_ok());
    }

    #[test]
    fn overrides_take_precedence() {
        let config = AppConfig::default().apply_overrides(ConfigOverrides {
            port: Some(9000),
            cors_origin: Some("https://app.example".to_string()),
            backend: Some(Backend::Demo),
            log_level: None,
        });

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origin.as_deref(), Some("https://app.example"));
        assert_eq!(config.backend, Backend::Demo);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend: demo\nserver:\n  port: 4100").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.backend, Backend::Demo);
        assert_eq!(config.server.port, 4100);

        assert!(AppConfig::load("/nonexistent/costdeck.yaml").is_err());
    }

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("DEMO".parse::<Backend>().unwrap(), Backend::Demo);
        assert_eq!("live".parse::<Backend>().unwrap(), Backend::Live);
        assert!("mock".parse::<Backend>().is_err());
    }
}
