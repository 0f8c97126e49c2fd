//! webnorm: URL normalization and article extraction for news crawling
//!
//! The URL-handling layer of a news-crawling pipeline, featuring:
//! - Repair of common URL mistakes (doubled schemes, missing slashes)
//! - Strict normalization that strips tracking parameters and fragments
//! - Lossy normalization producing a canonical key for duplicate detection
//! - Homepage/shortened-link classification and site-identity extraction
//! - Redirect and canonical link discovery in crawled HTML
//! - Readable-article extraction via readability
//!
//! Deny-lists (tracking parameters, URL shorteners, blog platforms,
//! strippable host labels) live in [`UrlRules`], which ships usable
//! defaults and can be loaded from TOML.

pub mod config;
pub mod extract;
pub mod types;
pub mod urls;

pub use config::{HostParams, UrlRules};
pub use extract::{extract_article_from_html, extractor_name};
pub use types::*;
pub use urls::{
    fix_common_url_mistakes, get_url_distinctive_domain, get_url_host, get_url_path_fast,
    http_urls_in_string, is_homepage_url, is_http_url, is_shortened_url,
    link_canonical_url_from_html, meta_refresh_url_from_html, normalize_url, normalize_url_lossy,
};
