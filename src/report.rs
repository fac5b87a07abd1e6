//! Link statistics over scan rows: the numbers behind the usual charts
//! (link vs no-link, categories, top domains, subject × category, top videos).
//!
//! Rows are de-duplicated exactly, then tallied with a parallel fold/merge.

use crate::category::Category;
use crate::pipeline::ScanRow;
use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const TOP_DOMAINS: usize = 15;
pub const TOP_VIDEOS: usize = 20;

/// Label used for linked rows whose domain could not be extracted.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Mergeable partial counts.
#[derive(Default)]
struct LinkTally {
    total: u64,
    with_link: u64,
    categories: AHashMap<Category, u64>,
    domains: AHashMap<String, u64>,
    subject_categories: AHashMap<String, AHashMap<Category, u64>>,
    videos: AHashMap<String, u64>,
}

impl LinkTally {
    fn ingest(&mut self, row: &ScanRow) {
        self.total += 1;
        let rec = &row.record;
        if !rec.has_link() {
            return;
        }
        self.with_link += 1;
        *self.categories.entry(rec.link_category()).or_default() += 1;
        let domain = if rec.link_domain().is_empty() { UNKNOWN_DOMAIN } else { rec.link_domain() };
        *self.domains.entry(domain.to_string()).or_default() += 1;
        *self
            .subject_categories
            .entry(row.subject.clone())
            .or_default()
            .entry(rec.link_category())
            .or_default() += 1;
        *self.videos.entry(row.video_url.clone()).or_default() += 1;
    }

    fn merge(&mut self, other: Self) {
        self.total += other.total;
        self.with_link += other.with_link;
        for (k, v) in other.categories {
            *self.categories.entry(k).or_default() += v;
        }
        for (k, v) in other.domains {
            *self.domains.entry(k).or_default() += v;
        }
        for (subject, cats) in other.subject_categories {
            let slot = self.subject_categories.entry(subject).or_default();
            for (k, v) in cats {
                *slot.entry(k).or_default() += v;
            }
        }
        for (k, v) in other.videos {
            *self.videos.entry(k).or_default() += v;
        }
    }

    fn finish(self) -> LinkReport {
        LinkReport {
            generated_at: OffsetDateTime::now_utc().format(&Rfc3339).ok(),
            total: self.total,
            with_link: self.with_link,
            without_link: self.total - self.with_link,
            categories: self.categories.into_iter().collect(),
            top_domains: top_n(self.domains, TOP_DOMAINS),
            subject_categories: self
                .subject_categories
                .into_iter()
                .map(|(s, cats)| (s, cats.into_iter().collect()))
                .collect(),
            top_videos: top_n(self.videos, TOP_VIDEOS),
        }
    }
}

/// Highest counts first; ties broken by key so output is deterministic.
fn top_n(map: AHashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut v: Vec<(String, u64)> = map.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    v.truncate(n);
    v
}

/// Aggregated link statistics. Category counts cover linked rows only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    pub generated_at: Option<String>,
    pub total: u64,
    pub with_link: u64,
    pub without_link: u64,
    pub categories: BTreeMap<Category, u64>,
    pub top_domains: Vec<(String, u64)>,
    pub subject_categories: BTreeMap<String, BTreeMap<Category, u64>>,
    pub top_videos: Vec<(String, u64)>,
}

impl LinkReport {
    /// Tally `rows` after dropping exact duplicates (first occurrence kept).
    pub fn build(rows: &[ScanRow]) -> Self {
        let mut seen = AHashSet::with_capacity(rows.len());
        let unique: Vec<&ScanRow> = rows.iter().filter(|r| seen.insert(*r)).collect();
        if unique.len() < rows.len() {
            tracing::debug!("report: dropped {} duplicate rows", rows.len() - unique.len());
        }

        unique
            .par_iter()
            .fold(LinkTally::default, |mut t, row| {
                t.ingest(row);
                t
            })
            .reduce(LinkTally::default, |mut a, b| {
                a.merge(b);
                a
            })
            .finish()
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Comments: {} total, {} with link, {} without", self.total, self.with_link, self.without_link);

        if self.with_link == 0 {
            let _ = writeln!(out, "No linked comments.");
            return out;
        }

        let _ = writeln!(out, "\nLink categories:");
        let mut cats: Vec<_> = self.categories.iter().collect();
        cats.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (cat, n) in cats {
            let _ = writeln!(out, "  {:<16} {:>8}", cat.as_str(), n);
        }

        let _ = writeln!(out, "\nTop {} domains:", TOP_DOMAINS);
        for (domain, n) in &self.top_domains {
            let _ = writeln!(out, "  {:<40} {:>8}", domain, n);
        }

        let _ = writeln!(out, "\nLinks by subject:");
        for (subject, cats) in &self.subject_categories {
            let parts: Vec<String> = cats.iter().map(|(c, n)| format!("{}={}", c, n)).collect();
            let _ = writeln!(out, "  {}: {}", subject, parts.join(", "));
        }

        let _ = writeln!(out, "\nTop {} videos by link volume:", TOP_VIDEOS);
        for (url, n) in &self.top_videos {
            let _ = writeln!(out, "  {:<50} {:>8}", url, n);
        }
        out
    }
}
