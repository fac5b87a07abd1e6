//! Link detection and domain extraction over free-form comment text.
//!
//! Both scanners take text-or-absent input (`&str`, `Option<&str>`); absent text
//! never contains a link and never yields a domain.

use regex::Regex;
use std::sync::OnceLock;

/// Top-level domains accepted for bare hostnames (no scheme, no `www.` prefix).
pub const LINK_TLDS: &[&str] = &[
    "com", "net", "org", "co", "io", "ca", "uk", "de", "app", "xyz", "info", "biz", "gov", "edu", "news",
    "be", "ch", "it",
];

fn tld_alternation() -> String {
    LINK_TLDS.join("|")
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?ix)
            \b(
                https?://\S+
              | www\.\S+
              | (?:[a-z0-9-]+\.)+(?:{tlds})\b(?:/\S*)?
            )",
            tlds = tld_alternation()
        );
        Regex::new(&pattern).expect("static link pattern")
    })
}

// Group 1: host introduced by a scheme or `www.` (any final label).
// Group 2: bare host ending in a whitelisted TLD.
fn domain_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?ix)
            \b(?:
                (?:https?://|www\.)((?:[a-z0-9-]+\.)+[a-z0-9-]+)
              | ((?:[a-z0-9-]+\.)+(?:{tlds}))
            )\b",
            tlds = tld_alternation()
        );
        Regex::new(&pattern).expect("static domain pattern")
    })
}

/// True if `text` contains a URL (`http(s)://…`, `www.…`) or a bare hostname
/// ending in one of [`LINK_TLDS`]. Case-insensitive, stops at the first hit.
pub fn has_link<'a>(text: impl Into<Option<&'a str>>) -> bool {
    match text.into() {
        Some(t) => link_re().is_match(t),
        None => false,
    }
}

/// Leftmost domain in `text`, lowercased, without scheme or path.
/// Returns an empty string when nothing domain-like is present.
pub fn extract_domain<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };
    let lower = text.to_lowercase();
    domain_re()
        .captures(&lower)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
