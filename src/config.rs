use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointsConfig {
    #[serde(default = "default_index_url")]
    pub index_url: String,
    /// Expanded with `{number}` (zero-padded to four digits) and `{ext}`.
    #[serde(default = "default_content_url_template")]
    pub content_url_template: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            content_url_template: default_content_url_template(),
        }
    }
}

fn default_index_url() -> String {
    "https://peps.python.org/api/peps.json".to_string()
}
fn default_content_url_template() -> String {
    "https://raw.githubusercontent.com/python/peps/main/peps/pep-{number}.{ext}".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("pep-index/", env!("CARGO_PKG_VERSION")).to_string()
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    // Validate endpoints
    let template = &config.endpoints.content_url_template;
    if !template.contains("{number}") || !template.contains("{ext}") {
        anyhow::bail!(
            "endpoints.content_url_template must contain both {{number}} and {{ext}}, got '{}'",
            template
        );
    }
    if config.endpoints.index_url.trim().is_empty() {
        anyhow::bail!("endpoints.index_url must not be empty");
    }

    // Validate http
    if config.http.timeout_secs == 0 {
        anyhow::bail!("http.timeout_secs must be > 0");
    }

    Ok(config)
}
