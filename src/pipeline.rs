use crate::analysis::{analyze_video, CommentRecord};
use crate::concurrency::map_limited;
use crate::config::ScanOptions;
use crate::error::Diagnostic;
use crate::progress::make_count_progress;
use crate::source::{CommentSource, VideoSearch};
use crate::util::init_tracing_once;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A classified comment tagged with where it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanRow {
    #[serde(flatten)]
    pub record: CommentRecord,
    pub subject: String,
    pub video_url: String,
}

/// Everything a batch produced: rows in search/fetch order plus every
/// non-fatal diagnostic encountered along the way.
#[derive(Clone, Debug, Default)]
pub struct ScanOutcome {
    pub rows: Vec<ScanRow>,
    pub diagnostics: Vec<Diagnostic>,
    pub videos_analyzed: usize,
}

impl ScanOutcome {
    /// One-line note about skipped videos/subjects, if any were skipped.
    pub fn skipped_summary(&self) -> Option<String> {
        if self.diagnostics.is_empty() {
            return None;
        }
        Some(format!("{} videos or subjects were skipped (see warnings above)", self.diagnostics.len()))
    }
}

/// Batch driver: subjects → video search → per-video analysis.
#[derive(Clone, Debug, Default)]
pub struct LinkScan {
    pub(crate) opts: ScanOptions,
}

impl LinkScan {
    pub fn new() -> Self {
        Self { opts: ScanOptions::default() }
    }

    // -------- Builder methods --------
    pub fn subjects<I, S>(mut self, subjects: I) -> Self where I: IntoIterator<Item = S>, S: AsRef<str> { self.opts = self.opts.with_subjects(subjects); self }
    pub fn videos_per_subject(mut self, n: u32) -> Self { self.opts = self.opts.with_videos_per_subject(n); self }
    pub fn max_comments(mut self, n: usize) -> Self { self.opts = self.opts.with_max_comments(n); self }
    pub fn request_delay(mut self, delay: Duration) -> Self { self.opts = self.opts.with_request_delay(delay); self }
    pub fn video_concurrency(mut self, n: usize) -> Self { self.opts = self.opts.with_video_concurrency(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }

    pub fn options(&self) -> &ScanOptions {
        &self.opts
    }

    /// Search every subject and analyze the videos found.
    /// A failed search or video is recorded as a diagnostic and skipped.
    pub fn run<Q, S>(&self, search: &Q, source: &S) -> ScanOutcome
    where
        Q: VideoSearch + ?Sized,
        S: CommentSource + ?Sized,
    {
        init_tracing_once();
        let mut outcome = ScanOutcome::default();
        let pb = if self.opts.progress {
            Some(make_count_progress(0, self.opts.progress_label.as_deref().unwrap_or("Videos")))
        } else {
            None
        };

        for subject in &self.opts.subjects {
            tracing::info!("Searching for: {}", subject);
            let urls = match search.search_videos(subject, self.opts.videos_per_subject) {
                Ok(urls) => urls,
                Err(e) => {
                    let diag = Diagnostic::SearchFailed { query: subject.clone(), message: e.to_string() };
                    tracing::warn!(kind = diag.kind(), "{}", diag);
                    outcome.diagnostics.push(diag);
                    continue;
                }
            };
            if let Some(pb) = &pb {
                pb.inc_length(urls.len() as u64);
            }
            let part = self.analyze_urls(source, subject, &urls);
            if let Some(pb) = &pb {
                pb.inc(part.videos_analyzed as u64);
            }
            outcome.rows.extend(part.rows);
            outcome.diagnostics.extend(part.diagnostics);
            outcome.videos_analyzed += part.videos_analyzed;
        }

        if let Some(pb) = pb {
            pb.finish_with_message("Videos: done");
        }
        tracing::info!(
            "Analyzed {} videos: {} comments, {} diagnostics",
            outcome.videos_analyzed,
            outcome.rows.len(),
            outcome.diagnostics.len()
        );
        outcome
    }

    /// Analyze a known list of video URLs under one subject label.
    pub fn analyze_urls<S>(&self, source: &S, subject: &str, urls: &[String]) -> ScanOutcome
    where
        S: CommentSource + ?Sized,
    {
        let max = self.opts.max_comments;
        let results = map_limited(urls, self.opts.video_concurrency, self.opts.request_delay, |url| {
            tracing::info!("Analyzing: {}", url);
            analyze_video(source, url, max)
        });

        let mut outcome = ScanOutcome { videos_analyzed: urls.len(), ..Default::default() };
        for (url, result) in urls.iter().zip(results) {
            match result {
                Ok(records) => outcome.rows.extend(records.into_iter().map(|record| ScanRow {
                    record,
                    subject: subject.to_string(),
                    video_url: url.clone(),
                })),
                Err(diag) => {
                    tracing::warn!(kind = diag.kind(), "{}", diag);
                    outcome.diagnostics.push(diag);
                }
            }
        }
        outcome
    }
}
