//! Coarse domain categories and the ordered keyword rules that assign them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category assigned to the first domain referenced by a comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NoLink,
    VideoPlatform,
    Wikipedia,
    Social,
    LinkShortener,
    Ecommerce,
    Crypto,
    FileShare,
    Messaging,
    GenericLink,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::NoLink,
        Category::VideoPlatform,
        Category::Wikipedia,
        Category::Social,
        Category::LinkShortener,
        Category::Ecommerce,
        Category::Crypto,
        Category::FileShare,
        Category::Messaging,
        Category::GenericLink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::NoLink => "no_link",
            Category::VideoPlatform => "video_platform",
            Category::Wikipedia => "wikipedia",
            Category::Social => "social",
            Category::LinkShortener => "link_shortener",
            Category::Ecommerce => "ecommerce",
            Category::Crypto => "crypto",
            Category::FileShare => "file_share",
            Category::Messaging => "messaging",
            Category::GenericLink => "generic_link",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown link category: {s}"))
    }
}

/// One classification rule: any keyword contained in the domain selects `category`.
pub type CategoryRule = (Category, &'static [&'static str]);

/// Default rule list, evaluated top to bottom. Platform-specific buckets come before
/// the broad ones; the catch-all (`generic_link`) is implicit.
/// Matching is plain substring containment, so "ethereal.com" lands in `crypto`.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    (Category::VideoPlatform, &["youtube.com", "youtu.be"]),
    (Category::Wikipedia, &["wikipedia.org"]),
    (
        Category::Social,
        &["facebook.com", "fb.com", "instagram.com", "tiktok.com", "twitter.com", "x.com", "reddit.com"],
    ),
    (Category::LinkShortener, &["bit.ly", "tinyurl", "goo.gl", "t.co", "ow.ly", "is.gd"]),
    (Category::Ecommerce, &["amazon.", "ebay.", "shopify", "etsy.", "aliexpress", "mercado"]),
    (
        Category::Crypto,
        &["binance", "coinbase", "kraken", "crypto", "btc", "ethereum", "eth", "defi", "nft"],
    ),
    (Category::FileShare, &["drive.google.com", "dropbox", "mega.nz", "wetransfer"]),
    (Category::Messaging, &["whatsapp.com", "wa.me", "telegram", "discord", "signal.org"]),
];

/// Categorize an already-lowercased domain with [`CATEGORY_RULES`].
pub fn categorize(domain: &str) -> Category {
    categorize_with(CATEGORY_RULES, domain)
}

/// Categorize with a caller-supplied rule list. First matching rule wins;
/// an empty domain is always `no_link`, anything unmatched is `generic_link`.
pub fn categorize_with(rules: &[CategoryRule], domain: &str) -> Category {
    if domain.is_empty() {
        return Category::NoLink;
    }
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| domain.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::GenericLink)
}
