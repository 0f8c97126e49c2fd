//! URL rule tables
//!
//! Deny/allow tables consumed by the normalizers and predicates: tracking
//! query keys (global, prefix, and per-host), URL shortener domains,
//! multi-tenant platform domains, and the host labels the lossy normalizer
//! may strip. Entries are stored lower-case; query keys and hosts are
//! matched case-insensitively against them. Built-in defaults cover the
//! common cases; a TOML file can override any table.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Query keys removed only for matching hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostParams {
    /// Substring matched against the URL's lower-cased host
    pub host: String,
    /// Query keys removed when the host matches
    pub params: Vec<String>,
}

/// Rule tables for URL normalization and predicates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRules {
    /// Query keys always removed
    #[serde(default = "default_tracking_params")]
    pub tracking_params: Vec<String>,
    /// Query key prefixes always removed (analytics families)
    #[serde(default = "default_tracking_param_prefixes")]
    pub tracking_param_prefixes: Vec<String>,
    /// Query keys removed per host
    #[serde(default = "default_host_tracking_params")]
    pub host_tracking_params: Vec<HostParams>,
    /// URL shortener domains; subdomains of an entry count as shorteners too
    #[serde(default = "default_shortener_hosts")]
    pub shortener_hosts: Vec<String>,
    /// Multi-tenant platform domains whose subdomains are distinct sites
    #[serde(default = "default_platform_hosts")]
    pub platform_hosts: Vec<String>,
    /// Host labels the lossy normalizer strips from the front of a host
    #[serde(default = "default_strippable_host_labels")]
    pub strippable_host_labels: Vec<String>,
}

fn string_vec(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

fn default_tracking_params() -> Vec<String> {
    string_vec(&[
        // Facebook referral tracking
        "fb_action_ids",
        "fb_action_types",
        "fb_source",
        "fb_ref",
        "action_object_map",
        "action_type_map",
        "action_ref_map",
        "fsrc_fb_noscript",
        // Yandex Metrika
        "yclid",
        "_openstat",
        // Session IDs and syndication/advertising cruft
        "phpsessid",
        "phpsessionid",
        "cid",
        "s_cid",
        "sid",
        "ncid",
        "ir",
        "ref",
        "oref",
        "eref",
        "ns_mchannel",
        "ns_campaign",
        "ito",
        "wprss",
        "custom_click",
        "source",
        "feedname",
        "feedtype",
        "skipmobile",
        "skip_mobile",
        "altcast_code",
        "_",
    ])
}

fn default_tracking_param_prefixes() -> Vec<String> {
    string_vec(&["utm_", "ga_"])
}

fn default_host_tracking_params() -> Vec<HostParams> {
    vec![
        HostParams {
            host: "nytimes.com".to_string(),
            params: string_vec(&[
                "emc", "partner", "_r", "hp", "inline", "smid", "wt.z_sma", "bicmp",
                "bicmlukp", "bicmst", "bicmet", "abt", "abg",
            ]),
        },
        HostParams {
            host: "facebook.com".to_string(),
            params: string_vec(&["ref", "fref", "hc_location"]),
        },
        HostParams {
            host: "livejournal.com".to_string(),
            params: string_vec(&["thread", "nojs"]),
        },
        HostParams {
            host: "google.".to_string(),
            params: string_vec(&["gws_rd", "ei"]),
        },
    ]
}

fn default_shortener_hosts() -> Vec<String> {
    string_vec(&[
        "bit.ly",
        "bitly.com",
        "goo.gl",
        "youtu.be",
        "t.co",
        "tinyurl.com",
        "ow.ly",
        "is.gd",
        "j.mp",
        "fb.me",
        "tr.im",
        "cli.gs",
        "r2.ly",
        "u.to",
        "qr.ae",
        "v.gd",
        "po.st",
    ])
}

fn default_platform_hosts() -> Vec<String> {
    string_vec(&[
        "wordpress.com",
        "blogspot",
        "livejournal.com",
        "privet.ru",
        "wikia.com",
        "feedburner.com",
        "24open.ru",
        "patch.com",
        "tumblr.com",
    ])
}

fn default_strippable_host_labels() -> Vec<String> {
    string_vec(&[
        "m", "ww", "www", "beta", "media", "data", "image", "cdn", "topic", "article",
        "news", "archive", "blog", "video", "search", "preview", "login", "shop",
        "sport", "sports", "act", "donate", "press", "web", "photo", "photos",
    ])
}

impl Default for UrlRules {
    fn default() -> Self {
        Self {
            tracking_params: default_tracking_params(),
            tracking_param_prefixes: default_tracking_param_prefixes(),
            host_tracking_params: default_host_tracking_params(),
            shortener_hosts: default_shortener_hosts(),
            platform_hosts: default_platform_hosts(),
            strippable_host_labels: default_strippable_host_labels(),
        }
    }
}

impl UrlRules {
    /// Load rule tables from a TOML file.
    ///
    /// Tables missing from the file keep their built-in defaults. The loaded
    /// tables are validated before being returned.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read rules file '{}': {}", path.display(), e))?;
        let rules: UrlRules = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules file '{}': {}", path.display(), e))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Validate all rule tables.
    ///
    /// Collects every problem before failing so a hand-edited rules file can
    /// be fixed in one pass.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        let tables: [(&str, &[String]); 5] = [
            ("tracking_params", &self.tracking_params),
            ("tracking_param_prefixes", &self.tracking_param_prefixes),
            ("shortener_hosts", &self.shortener_hosts),
            ("platform_hosts", &self.platform_hosts),
            ("strippable_host_labels", &self.strippable_host_labels),
        ];
        for (name, entries) in tables {
            for entry in entries {
                check_entry(&mut errors, name, entry);
            }
        }

        for host_params in &self.host_tracking_params {
            check_entry(&mut errors, "host_tracking_params.host", &host_params.host);
            if host_params.params.is_empty() {
                errors.push(format!(
                    "host_tracking_params entry '{}' has no params",
                    host_params.host
                ));
            }
            for param in &host_params.params {
                check_entry(&mut errors, "host_tracking_params.params", param);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "URL rules validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }

    /// True if a query parameter named `key` is removed from a URL whose
    /// lower-cased host is `host`.
    pub fn removes_key(&self, host: &str, key: &str) -> bool {
        let key = key.to_lowercase();
        if self.tracking_params.iter().any(|k| *k == key) {
            return true;
        }
        if self
            .tracking_param_prefixes
            .iter()
            .any(|p| key.starts_with(p.as_str()))
        {
            return true;
        }
        self.host_tracking_params.iter().any(|hp| {
            host.contains(hp.host.as_str()) && hp.params.iter().any(|k| *k == key)
        })
    }

    /// True if `host` is a URL shortener or a subdomain of one.
    pub fn is_shortener_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.shortener_hosts.iter().any(|s| {
            host == *s
                || host
                    .strip_suffix(s.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }

    /// True if `host` belongs to a multi-tenant platform domain.
    ///
    /// Platform entries match as dot-bounded label runs: "wordpress.com"
    /// matches "en.blog.wordpress.com" but not "mywordpress.common.net".
    pub fn is_platform_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        let host_labels: Vec<&str> = host.split('.').collect();
        self.platform_hosts.iter().any(|entry| {
            let entry_labels: Vec<&str> = entry.split('.').collect();
            !entry_labels.is_empty()
                && entry_labels.len() <= host_labels.len()
                && host_labels
                    .windows(entry_labels.len())
                    .any(|run| run == entry_labels.as_slice())
        })
    }

    /// True if the lossy normalizer may strip `label` from the front of a
    /// host. All-digit labels are strippable regardless of the table.
    pub fn is_strippable_label(&self, label: &str) -> bool {
        self.strippable_host_labels.iter().any(|l| l == label)
            || (!label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()))
    }
}

fn check_entry(errors: &mut Vec<String>, table: &str, entry: &str) {
    if entry.is_empty() {
        errors.push(format!("{} contains an empty entry", table));
    } else if entry.chars().any(|c| c.is_whitespace()) {
        errors.push(format!("{} entry '{}' contains whitespace", table, entry));
    } else if entry.chars().any(|c| c.is_uppercase()) {
        errors.push(format!(
            "{} entry '{}' must be lower-case (matching is case-insensitive)",
            table, entry
        ));
    }
}
