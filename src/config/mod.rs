//! Configuration module for geolens
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section and key has a default, so an empty file
//! (or no file at all) yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use geolens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("geolens.toml")).unwrap();
//! println!("Page fetch timeout: {}ms", config.fetch.timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, ServerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
