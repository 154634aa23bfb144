use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Environment variable naming the mount segment inserted before `/api/v1`.
pub const ROOT_SEGMENT_ENV: &str = "ENV";

/// Set by the function host in every execution environment it starts.
pub const LAMBDA_RUNTIME_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub server: ServerConfig,
    pub logging: LoggingSection,
    /// Raw root segment; see [`AppConfig::root_path`].
    pub env: String,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("SERVERLESS_API_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut builder = config::Config::builder();

        if Path::new(&config_path).exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(&config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SERVERLESS_API")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        // The function host convention is a bare `ENV`, which wins over file settings
        if let Ok(segment) = env::var(ROOT_SEGMENT_ENV) {
            config.env = segment;
        }

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Normalised root segment, or `None` when the application is mounted at `/`.
    pub fn root_path(&self) -> crate::Result<Option<String>> {
        let segment = self.env.trim().trim_matches('/');
        if segment.is_empty() {
            return Ok(None);
        }

        if let Some(bad) = segment
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '/' | ':' | '*' | '{' | '}'))
        {
            return Err(crate::Error::invalid_config(format!(
                "{} must be a single path segment, found {:?} in {:?}",
                ROOT_SEGMENT_ENV, bad, self.env
            )));
        }

        Ok(Some(segment.to_string()))
    }
}

/// Static metadata published in the API documentation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub title: String,
    pub version: String,
    pub docs_url: String,
    pub redoc_url: String,
    pub openapi_url: String,
}

impl AppSection {
    pub fn docs_url(&self) -> crate::Result<Option<&str>> {
        doc_path("app.docs_url", &self.docs_url)
    }

    pub fn redoc_url(&self) -> crate::Result<Option<&str>> {
        doc_path("app.redoc_url", &self.redoc_url)
    }

    pub fn openapi_url(&self) -> crate::Result<Option<&str>> {
        doc_path("app.openapi_url", &self.openapi_url)
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            title: "Serverless API on AWS Lambda".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            docs_url: "/docs".to_string(),
            redoc_url: "/redoc".to_string(),
            openapi_url: "/openapi.json".to_string(),
        }
    }
}

/// Empty disables the page; anything else must be an absolute path. Trailing slashes
/// are dropped.
fn doc_path<'a>(key: &str, value: &'a str) -> crate::Result<Option<&'a str>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let value = value.trim_end_matches('/');
    if value.is_empty() {
        return Ok(None);
    }
    if !value.starts_with('/') {
        return Err(crate::Error::invalid_config(format!(
            "{} must start with '/', got {:?}",
            key, value
        )));
    }
    Ok(Some(value))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mode: RunMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            mode: RunMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Lambda when running inside the function host, HTTP otherwise.
    #[default]
    Auto,
    Http,
    Lambda,
}

impl RunMode {
    /// Resolve `Auto` against the current process environment.
    pub fn resolve(self) -> RunMode {
        self.resolve_with(env::var_os(LAMBDA_RUNTIME_ENV).is_some())
    }

    pub fn resolve_with(self, in_function_host: bool) -> RunMode {
        match self {
            RunMode::Auto if in_function_host => RunMode::Lambda,
            RunMode::Auto => RunMode::Http,
            explicit => explicit,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
