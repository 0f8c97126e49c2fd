//! Strict URL normalization
//!
//! Canonicalizes scheme, host, port, and fragment, and strips tracking
//! parameters, without changing which page the URL identifies.

use crate::config::UrlRules;
use crate::types::NormalizeError;
use crate::urls::fixer::fix_common_url_mistakes;
use url::Url;

/// True when the string begins with a literal `http://` or `https://`
/// prefix, in any case.
///
/// The parser silently repairs some malformed prefixes (`http:/foo`), so
/// scheme checks happen on the text before parsing.
pub(crate) fn has_http_scheme_prefix(s: &str) -> bool {
    let head: String = s.chars().take(8).collect();
    let head = head.to_ascii_lowercase();
    head.starts_with("http://") || head.starts_with("https://")
}

/// Normalize a URL without changing which page it points to
///
/// - Trims surrounding whitespace and applies [`fix_common_url_mistakes`]
/// - Lower-cases the scheme and host and drops a default port
/// - Drops the fragment
/// - Removes tracking and session query parameters per `rules`, keeping
///   the survivors in their original order and serialized form
///
/// Errors when the input is empty or, after fixing, is not a parseable
/// `http`/`https` URL with a host.
pub fn normalize_url(url: &str, rules: &UrlRules) -> Result<String, NormalizeError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::Empty);
    }

    let fixed = fix_common_url_mistakes(trimmed);
    if !has_http_scheme_prefix(&fixed) {
        return Err(NormalizeError::NotHttp(fixed));
    }

    let mut parsed = Url::parse(&fixed)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(NormalizeError::NotHttp(fixed));
    }
    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => return Err(NormalizeError::NotHttp(fixed)),
    };

    parsed.set_fragment(None);

    // Filter the raw query text rather than decoded pairs so that surviving
    // parameters keep their exact serialized form. A value-absent parameter
    // (`?244321`) stays distinct from a value-empty one (`?a=`).
    if let Some(query) = parsed.query().map(|q| q.to_string()) {
        let kept: Vec<&str> = query
            .split('&')
            .filter(|field| keeps_query_field(field, &host, rules))
            .collect();
        if kept.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.set_query(Some(&kept.join("&")));
        }
    }

    Ok(parsed.to_string())
}

fn keeps_query_field(field: &str, host: &str, rules: &UrlRules) -> bool {
    let (key, value) = match field.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (field, None),
    };
    if key.is_empty() {
        return false;
    }
    if rules.removes_key(host, key) {
        return false;
    }
    // Opaque hex session tokens, e.g. nk=440cd48fd95a4e1f1c23bcd15df36da7
    if key.eq_ignore_ascii_case("nk") {
        if let Some(value) = value {
            if !value.is_empty() && value.bytes().all(|b| b.is_ascii_hexdigit()) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== scheme prefix gate =====

    #[test]
    fn scheme_prefix_accepts_http_and_https_in_any_case() {
        assert!(has_http_scheme_prefix("http://example.com"));
        assert!(has_http_scheme_prefix("HTTPS://example.com"));
        assert!(has_http_scheme_prefix("HtTp://example.com"));
    }

    #[test]
    fn scheme_prefix_rejects_other_schemes_and_near_misses() {
        assert!(!has_http_scheme_prefix("gopher://gopher.floodgap.com"));
        assert!(!has_http_scheme_prefix("http:/example.com"));
        assert!(!has_http_scheme_prefix("httpx://example.com"));
        assert!(!has_http_scheme_prefix("example.com"));
        assert!(!has_http_scheme_prefix(""));
    }

    // ===== query field filtering =====

    #[test]
    fn value_absent_field_survives() {
        let rules = UrlRules::default();
        assert!(keeps_query_field("244321", "bash.org", &rules));
    }

    #[test]
    fn empty_key_field_is_dropped() {
        let rules = UrlRules::default();
        assert!(!keeps_query_field("=_r%3D6", "www.nytimes.com", &rules));
        assert!(!keeps_query_field("", "www.nytimes.com", &rules));
    }

    #[test]
    fn deny_listed_key_is_dropped() {
        let rules = UrlRules::default();
        assert!(!keeps_query_field("utm_source=facebook.com", "example.com", &rules));
        assert!(!keeps_query_field("ref=br_tf", "www.facebook.com", &rules));
    }

    #[test]
    fn hex_nk_token_is_dropped_but_other_nk_values_survive() {
        let rules = UrlRules::default();
        assert!(!keeps_query_field(
            "nk=440cd48fd95a4e1f1c23bcd15df36da7",
            "www.adelaidenow.com.au",
            &rules
        ));
        assert!(keeps_query_field("nk=not-a-token", "example.com", &rules));
        assert!(keeps_query_field("nk=", "example.com", &rules));
        assert!(keeps_query_field("nk", "example.com", &rules));
    }

    // ===== end-to-end normalization =====

    #[test]
    fn canonicalizes_case_port_and_fragment() {
        let rules = UrlRules::default();
        assert_eq!(
            normalize_url("HTTP://CYBER.LAW.HARVARD.EDU:80/node/9244#studio", &rules).unwrap(),
            "http://cyber.law.harvard.edu/node/9244"
        );
    }

    #[test]
    fn strips_tracking_query_entirely() {
        let rules = UrlRules::default();
        assert_eq!(
            normalize_url(
                "http://www.example.com/news/article.html\
                 ?utm_source=facebook.com&utm_medium=referral",
                &rules
            )
            .unwrap(),
            "http://www.example.com/news/article.html"
        );
    }

    #[test]
    fn preserves_parameter_order() {
        let rules = UrlRules::default();
        assert_eq!(
            normalize_url("http://example.com/page?b=2&a=1&c=3", &rules).unwrap(),
            "http://example.com/page?b=2&a=1&c=3"
        );
    }

    #[test]
    fn rejects_empty_and_non_http_input() {
        let rules = UrlRules::default();
        assert!(matches!(
            normalize_url("", &rules),
            Err(NormalizeError::Empty)
        ));
        assert!(matches!(
            normalize_url("   ", &rules),
            Err(NormalizeError::Empty)
        ));
        assert!(matches!(
            normalize_url("gopher://gopher.floodgap.com/gopher/proxy", &rules),
            Err(NormalizeError::NotHttp(_))
        ));
        assert!(normalize_url("not an url", &rules).is_err());
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let rules = UrlRules::default();
        let inputs = [
            "HTTP://CYBER.LAW.HARVARD.EDU:80/node/9244#studio",
            "http://bash.org/?244321",
            "http://www.nytimes.com/2011/12/30/business/united-airlines.html?_r=1&abt=0002&abg=1",
            "http://foo.bar?baz=bat",
        ];
        for input in inputs {
            let once = normalize_url(input, &rules).unwrap();
            assert_eq!(
                normalize_url(&once, &rules).unwrap(),
                once,
                "normalizing '{}' twice should equal normalizing it once",
                input
            );
        }
    }
}
