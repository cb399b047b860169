use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for geolens
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Network limits applied to every scan
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Wall-clock deadline for the page fetch (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Deadline for each of the robots.txt / sitemap.xml probes (milliseconds)
    #[serde(rename = "probe-timeout-ms", default = "default_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Largest accepted response body in bytes
    #[serde(rename = "max-bytes", default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Maximum number of redirect hops followed
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            probe_timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the scanner bot
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the scanner bot
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the bot
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
        }
    }
}

/// HTTP server configuration for `geolens serve`
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    12_000
}

fn default_max_bytes() -> usize {
    1_800_000
}

fn default_max_redirects() -> usize {
    10
}

fn default_crawler_name() -> String {
    "SeenByGeoBot".to_string()
}

fn default_crawler_version() -> String {
    "0.2".to_string()
}

fn default_contact_url() -> String {
    "https://seenbygeo.com".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}
