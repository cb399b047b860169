use crate::config::types::{Config, FetchConfig, ServerConfig, UserAgentConfig};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

const MAX_TIMEOUT_MS: u64 = 120_000;
const MIN_BODY_BYTES: usize = 1024;
const MAX_BODY_BYTES: usize = 50_000_000;
const MAX_REDIRECTS: usize = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates network limits
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("timeout-ms", config.timeout_ms),
        ("probe-timeout-ms", config.probe_timeout_ms),
    ] {
        if value < 1 || value > MAX_TIMEOUT_MS {
            return Err(ConfigError::Validation(format!(
                "{} must be between 1 and {}, got {}",
                name, MAX_TIMEOUT_MS, value
            )));
        }
    }

    if config.max_bytes < MIN_BODY_BYTES || config.max_bytes > MAX_BODY_BYTES {
        return Err(ConfigError::Validation(format!(
            "max-bytes must be between {} and {}, got {}",
            MIN_BODY_BYTES, MAX_BODY_BYTES, config.max_bytes
        )));
    }

    if config.max_redirects > MAX_REDIRECTS {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= {}, got {}",
            MAX_REDIRECTS, config.max_redirects
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    let contact = Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    if contact.scheme() != "http" && contact.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "contact-url must use http or https, got '{}'",
            config.contact_url
        )));
    }

    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("Invalid bind address '{}': {}", config.bind, e))
    })?;
    Ok(())
}
