//! Readable-article extraction
//!
//! Drives the readability engine over raw crawled HTML and emits the title
//! plus the cleaned article body. Boilerplate removal itself (navigation,
//! scripts, footers) is the engine's job; this module owns the input/output
//! contract around it.

use regex_lite::Regex;
use std::io::Cursor;
use std::sync::OnceLock;
use url::Url;

const EXTRACTOR_ENGINE: &str = "readability";
const EXTRACTOR_ENGINE_VERSION: &str = "0.3.0";

static EXTRACTOR_NAME: OnceLock<String> = OnceLock::new();
static PLACEHOLDER_BASE: OnceLock<Url> = OnceLock::new();
static RE_BODY_WRAPPER: OnceLock<Regex> = OnceLock::new();

/// Identifier of the extraction engine, e.g. `readability-0.3.0`
///
/// Stable across calls within a process; stored along with extracted text
/// so stale extractions can be detected after an engine upgrade.
pub fn extractor_name() -> &'static str {
    EXTRACTOR_NAME
        .get_or_init(|| format!("{}-{}", EXTRACTOR_ENGINE, EXTRACTOR_ENGINE_VERSION))
        .as_str()
}

/// Extract the readable article from an HTML document
///
/// Returns `"{title}\n\n{body}"` where `{body}` is an HTML fragment rooted
/// at `<body id="readabilityBody">`. Empty input yields an empty string, as
/// does an engine failure, which is logged and swallowed; extraction sits
/// deep in a crawl pipeline where one bad document must not stop the batch.
pub fn extract_article_from_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    // The engine resolves relative links against a base URL, which is
    // irrelevant here; extraction happens long after fetching.
    let base = PLACEHOLDER_BASE.get_or_init(|| Url::parse("http://localhost/").unwrap());

    let mut cursor = Cursor::new(html.as_bytes());
    match readability::extractor::extract(&mut cursor, base) {
        Ok(product) => {
            let body = inner_body_html(&product.content);
            format!("{}\n\n<body id=\"readabilityBody\">{}</body>", product.title, body)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to extract readable content from {} bytes of HTML: {}",
                html.len(),
                e
            );
            String::new()
        }
    }
}

// The engine may hand back a full <body> element; the wrapper re-labels it,
// so only the inner HTML is kept.
fn inner_body_html(content: &str) -> &str {
    let re = RE_BODY_WRAPPER.get_or_init(|| Regex::new(r"(?is)<body[^>]*>(.*)</body>").unwrap());
    match re.captures(content).and_then(|captures| captures.get(1)) {
        Some(inner) => inner.as_str(),
        None => content,
    }
}
