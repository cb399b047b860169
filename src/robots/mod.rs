//! Robots.txt and sitemap discovery
//!
//! This module probes a page's origin for `/robots.txt` and `/sitemap.xml`
//! and reads crawl-configuration signals out of them. Probe failures are
//! never fatal to a scan.

mod parser;
mod probe;

pub use parser::{RobotsTxt, AI_CRAWLERS};
pub use probe::{probe_site, ProbeLimits};
