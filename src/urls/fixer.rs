//! Repairs for malformed URLs seen in crawled HTML and feeds
//!
//! Pure string rewrites; nothing here parses the URL or touches the network.

use regex_lite::Regex;
use std::sync::OnceLock;

static RE_DOUBLED_SCHEME: OnceLock<Regex> = OnceLock::new();
static RE_MISSING_SLASH: OnceLock<Regex> = OnceLock::new();
static RE_QUERY_WITHOUT_PATH: OnceLock<Regex> = OnceLock::new();

/// Fix mistakes commonly found in URLs pasted into web pages and feeds
///
/// - Replaces backslashes with forward slashes
/// - Collapses doubled scheme prefixes (`http://http://host`)
/// - Restores a missing second slash after the scheme (`http:/host`)
/// - Inserts the root path when a query follows the host directly
///   (`http://host?foo` becomes `http://host/?foo`)
///
/// Idempotent: fixing an already-fixed URL changes nothing.
pub fn fix_common_url_mistakes(url: &str) -> String {
    let mut fixed = url.replace('\\', "/");

    // Collapse repeated scheme prefixes, e.g. http://http://www.example.com/
    // (the inner colon may be missing). Loop until stable so any number of
    // stacked prefixes collapses in one call.
    let re_doubled =
        RE_DOUBLED_SCHEME.get_or_init(|| Regex::new(r"(?i)(https?://)https?:?//").unwrap());
    while re_doubled.is_match(&fixed) {
        fixed = re_doubled.replace_all(&fixed, "$1").to_string();
    }

    // Restore the second slash in e.g. http:/www.example.com/
    let re_missing =
        RE_MISSING_SLASH.get_or_init(|| Regex::new(r"(?i)^(https?):/([^/])").unwrap());
    fixed = re_missing.replace(&fixed, "$1://$2").to_string();

    // Insert the root path in e.g. http://www.example.com?foo=bar
    let re_query =
        RE_QUERY_WITHOUT_PATH.get_or_init(|| Regex::new(r"(?i)^(https?://[^/?]+)\?").unwrap());
    fixed = re_query.replace(&fixed, "$1/?").to_string();

    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_doubled_scheme() {
        assert_eq!(
            fix_common_url_mistakes("http://http://www.al-monitor.com/pulse"),
            "http://www.al-monitor.com/pulse"
        );
    }

    #[test]
    fn collapses_doubled_scheme_with_missing_inner_colon() {
        assert_eq!(
            fix_common_url_mistakes("http://http//www.example.com/"),
            "http://www.example.com/"
        );
    }

    #[test]
    fn collapses_stacked_scheme_prefixes_in_one_call() {
        assert_eq!(
            fix_common_url_mistakes("http://http://http://www.example.com/"),
            "http://www.example.com/"
        );
    }

    #[test]
    fn restores_missing_second_slash() {
        assert_eq!(
            fix_common_url_mistakes(
                "http:/www.theinquirer.net/inquirer/news/2322928/\
                 net-neutrality-rules-lie-in-tatters-as-fcc-overruled"
            ),
            "http://www.theinquirer.net/inquirer/news/2322928/\
             net-neutrality-rules-lie-in-tatters-as-fcc-overruled"
        );
    }

    #[test]
    fn inserts_root_path_before_query() {
        assert_eq!(
            fix_common_url_mistakes("http://foo.bar?baz=bat"),
            "http://foo.bar/?baz=bat"
        );
    }

    #[test]
    fn replaces_backslashes() {
        assert_eq!(
            fix_common_url_mistakes(r"http://www.example.com\path\page.html"),
            "http://www.example.com/path/page.html"
        );
    }

    #[test]
    fn leaves_well_formed_urls_alone() {
        let url = "https://www.nytimes.com/2016/01/01/world/europe/story.html?hp=1";
        assert_eq!(fix_common_url_mistakes(url), url);
    }

    #[test]
    fn does_not_insert_root_path_when_a_path_exists() {
        let url = "http://www.example.com/news/article.html?utm_source=facebook.com";
        assert_eq!(fix_common_url_mistakes(url), url);
    }

    #[test]
    fn fixing_twice_changes_nothing() {
        let broken = [
            "http://http://www.al-monitor.com/pulse",
            "http:/www.theinquirer.net/inquirer/news/2322928/\
             net-neutrality-rules-lie-in-tatters-as-fcc-overruled",
            "http://foo.bar?baz=bat",
            r"http://www.example.com\path",
        ];
        for url in broken {
            let once = fix_common_url_mistakes(url);
            assert_eq!(
                fix_common_url_mistakes(&once),
                once,
                "fixing '{}' twice should equal fixing it once",
                url
            );
        }
    }
}
