//! Lossy URL normalization for duplicate detection
//!
//! Two URLs that lossy-normalize to the same string are treated as the same
//! story. The output is not guaranteed to be fetchable; use strict
//! normalization when the URL still has to resolve.

use crate::config::UrlRules;
use crate::types::NormalizeError;
use crate::urls::normalize::normalize_url;
use url::Url;

/// Aggressively normalize a URL for equality comparison
///
/// Applies strict normalization first, then:
/// - Lower-cases the entire serialized URL, path and query included
/// - Strips leading host labels that carry no identity (`www`, `m`,
///   `cdn`, bare numbers, and the rest of the configured label list),
///   leaving at least two labels; hosts on a blog platform or inside a
///   URL shortener domain are left intact
/// - Collapses consecutive slashes in the path
/// - Removes one trailing slash from the end of the result
pub fn normalize_url_lossy(url: &str, rules: &UrlRules) -> Result<String, NormalizeError> {
    let strict = normalize_url(url, rules)?;

    // Strict output is fully serialized ASCII, so lowering the whole string
    // is safe and covers path, query, and any userinfo at once.
    let mut parsed = Url::parse(&strict.to_lowercase())?;

    if let Some(host) = parsed.host_str().map(str::to_string) {
        // Shortener subdomains (543.r2.ly) encode the redirect target and
        // platform subdomains (foo.blogspot.com) identify the publisher,
        // so neither may lose labels.
        if !rules.is_platform_host(&host) && !rules.is_shortener_host(&host) {
            let stripped = strip_leading_host_labels(&host, rules);
            if stripped != host {
                parsed.set_host(Some(&stripped))?;
            }
        }
    }

    let collapsed = collapse_path_slashes(parsed.path());
    if collapsed != parsed.path() {
        parsed.set_path(&collapsed);
    }

    let mut out = parsed.to_string();
    if out.ends_with('/') {
        out.pop();
    }
    Ok(out)
}

fn strip_leading_host_labels(host: &str, rules: &UrlRules) -> String {
    let mut labels: Vec<&str> = host.split('.').collect();
    while labels.len() > 2 && rules.is_strippable_label(labels[0]) {
        labels.remove(0);
    }
    labels.join(".")
}

fn collapse_path_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}
