//! URL handling module for geolens
//!
//! This module validates scan targets, resolves page-relative references to
//! absolute URLs, and compares origins for same-site link scoping.

mod resolve;
mod target;

pub use resolve::{is_same_origin, origin_of, resolve_href};
pub use target::parse_scan_url;
