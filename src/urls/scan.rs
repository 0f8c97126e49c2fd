//! Free-text URL scanning

use crate::urls::predicates::is_http_url;
use regex_lite::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static RE_URL_TOKEN: OnceLock<Regex> = OnceLock::new();

/// Collect every `http://`/`https://` URL appearing in free text
///
/// A token runs from the scheme to the next whitespace character; tokens
/// that do not survive [`is_http_url`] are discarded. The returned set is
/// deduplicated and unordered. A bare `http://` with nothing after it is
/// not a URL, and non-HTTP schemes never match.
pub fn http_urls_in_string(text: &str) -> HashSet<String> {
    let re = RE_URL_TOKEN.get_or_init(|| Regex::new(r"(?i)https?://\S+").unwrap());
    re.find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| is_http_url(token))
        .map(str::to_string)
        .collect()
}
