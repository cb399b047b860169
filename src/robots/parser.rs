//! Robots.txt analysis
//!
//! This module reads the parts of a robots.txt file that matter for AI
//! visibility: `Sitemap:` references and whether known AI crawlers may fetch
//! a given URL. Rule matching uses the robotstxt crate.

use regex::Regex;
use robotstxt::DefaultMatcher;
use std::sync::LazyLock;

/// User agents of generative-AI crawlers and assistants checked against robots.txt
pub const AI_CRAWLERS: &[&str] = &[
    "GPTBot",
    "ChatGPT-User",
    "OAI-SearchBot",
    "ClaudeBot",
    "anthropic-ai",
    "PerplexityBot",
    "Google-Extended",
    "CCBot",
];

static SITEMAP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*sitemap\s*:(.*)$").expect("sitemap line regex is valid")
});

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct RobotsTxt {
    /// Raw robots.txt content
    content: String,
}

impl RobotsTxt {
    /// Creates a new RobotsTxt from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Returns true if any line starts with `Sitemap:` (case-insensitive, leading whitespace allowed)
    pub fn references_sitemap(&self) -> bool {
        SITEMAP_LINE.is_match(&self.content)
    }

    /// Values of all `Sitemap:` lines, trimmed, empty values skipped
    pub fn sitemap_urls(&self) -> Vec<String> {
        SITEMAP_LINE
            .captures_iter(&self.content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|url| !url.is_empty())
            .collect()
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The URL (or path) to check
    /// * `user_agent` - The user agent product token
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// The entries of [`AI_CRAWLERS`] that may not fetch `url`
    pub fn blocked_ai_crawlers(&self, url: &str) -> Vec<String> {
        AI_CRAWLERS
            .iter()
            .filter(|agent| !self.is_allowed(url, agent))
            .map(|agent| agent.to_string())
            .collect()
    }
}
