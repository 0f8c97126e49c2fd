//! Redirect and canonical link extraction from HTML
//!
//! Crawled pages signal their real location through `<meta
//! http-equiv="refresh">` redirects and `<link rel="canonical">` tags.
//! Both extractors tolerate malformed HTML and never error; absence of a
//! usable tag is `None`.

use regex_lite::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

static META_REFRESH_SELECTOR: OnceLock<Selector> = OnceLock::new();
static LINK_CANONICAL_SELECTOR: OnceLock<Selector> = OnceLock::new();
static RE_REFRESH_TARGET: OnceLock<Regex> = OnceLock::new();

/// Extract the target of the first `<meta http-equiv="refresh">` tag
///
/// The `content` attribute may carry an optional seconds clause before the
/// target (`"0; url=..."`) and the target may be wrapped in single or
/// double quotes. The result is resolved against `base_url`; a relative
/// target without a base yields `None`.
pub fn meta_refresh_url_from_html(html: &str, base_url: Option<&str>) -> Option<String> {
    let selector = META_REFRESH_SELECTOR
        .get_or_init(|| Selector::parse(r#"meta[http-equiv="refresh" i]"#).unwrap());
    let document = Html::parse_document(html);
    let elem = document.select(selector).next()?;
    let content = elem.value().attr("content")?;

    let re_target = RE_REFRESH_TARGET.get_or_init(|| Regex::new(r"(?i)\burl\s*=\s*(.+)").unwrap());
    let captures = re_target.captures(content)?;
    let target = unquote(captures.get(1)?.as_str());
    if target.is_empty() {
        return None;
    }
    resolve_against_base(target, base_url)
}

/// Extract the first `<link rel="canonical">` URL
///
/// The `href` is resolved against `base_url`, since some sites emit
/// relative canonical links; a relative `href` without a base yields
/// `None`.
pub fn link_canonical_url_from_html(html: &str, base_url: Option<&str>) -> Option<String> {
    let selector = LINK_CANONICAL_SELECTOR
        .get_or_init(|| Selector::parse(r#"link[rel="canonical" i]"#).unwrap());
    let document = Html::parse_document(html);
    let elem = document.select(selector).next()?;
    let href = elem.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    resolve_against_base(href, base_url)
}

// Strips one matching pair of surrounding quotes.
fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn resolve_against_base(value: &str, base_url: Option<&str>) -> Option<String> {
    let resolved = match base_url {
        Some(base) => Url::parse(base).ok()?.join(value).ok()?,
        None => Url::parse(value).ok()?,
    };
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}
