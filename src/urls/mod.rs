//! URL normalization and classification
//!
//! News crawls see the same story under dozens of URL spellings: tracking
//! parameters, mobile subdomains, doubled schemes, shortened links. This
//! module canonicalizes and classifies crawled URLs so the rest of a
//! pipeline can deduplicate and route them.
//!
//! Key components:
//! - `fixer`: string-level repairs for common URL mistakes
//! - `normalize`: strict canonicalization that keeps the URL fetchable
//! - `lossy`: aggressive canonicalization for duplicate detection
//! - `predicates`: homepage/shortener classification and host accessors
//! - `scan`: URL collection from free text
//! - `html_links`: meta-refresh and canonical link extraction

pub mod fixer;
pub mod html_links;
pub mod lossy;
pub mod normalize;
pub mod predicates;
pub mod scan;

pub use fixer::fix_common_url_mistakes;
pub use html_links::{link_canonical_url_from_html, meta_refresh_url_from_html};
pub use lossy::normalize_url_lossy;
pub use normalize::normalize_url;
pub use predicates::{
    get_url_distinctive_domain, get_url_host, get_url_path_fast, is_homepage_url, is_http_url,
    is_shortened_url,
};
pub use scan::http_urls_in_string;
