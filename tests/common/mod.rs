#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use ytlinks::{CommentPage, CommentSource, FetchError, PageRequest, SortOrder, VideoSearch};

/// A page of `n` comments named `<prefix>-<i>`, continuing to `next` when given.
pub fn page(prefix: &str, n: usize, next: Option<&str>) -> CommentPage {
    CommentPage {
        items: (0..n).map(|i| Some(format!("{}-{}", prefix, i))).collect(),
        next_page_token: next.map(str::to_string),
    }
}

/// A page built from literal comment texts.
pub fn page_of(texts: &[&str], next: Option<&str>) -> CommentPage {
    CommentPage { items: texts.iter().map(|t| Some(t.to_string())).collect(), next_page_token: next.map(str::to_string) }
}

/// Comment source that replays a fixed script of page results, in order,
/// and records every request it receives.
/// Requests past the end of the script fail, so over-fetching shows up as an error.
pub struct ScriptedSource {
    script: Vec<Result<CommentPage, FetchError>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, u32, Option<String>)>>,
    orders: Mutex<Vec<SortOrder>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<CommentPage, FetchError>>) -> Self {
        Self { script, calls: AtomicUsize::new(0), requests: Mutex::new(Vec::new()), orders: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (video id, page size, page token) for every request, in order.
    pub fn requests(&self) -> Vec<(String, u32, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }

    /// Ordering asked for by every request, in order.
    pub fn orders(&self) -> Vec<SortOrder> {
        self.orders.lock().unwrap().clone()
    }
}

impl CommentSource for ScriptedSource {
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CommentPage, FetchError> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        self.orders.lock().unwrap().push(request.order);
        self.requests.lock().unwrap().push((
            request.video_id.to_string(),
            request.page_size,
            request.page_token.map(str::to_string),
        ));
        self.script
            .get(i)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Api { status: 500, message: "script exhausted".into() }))
    }
}

/// Comment source keyed by video id; each video has a single page (no continuation).
/// Unknown ids fail with a 403, like a video with comments disabled.
#[derive(Default)]
pub struct VideoTable {
    pages: HashMap<String, Vec<String>>,
}

impl VideoTable {
    pub fn with(mut self, video_id: &str, comments: &[&str]) -> Self {
        self.pages.insert(video_id.to_string(), comments.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl CommentSource for VideoTable {
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CommentPage, FetchError> {
        match self.pages.get(request.video_id.as_str()) {
            Some(comments) => Ok(CommentPage {
                items: comments.iter().cloned().map(Some).collect(),
                next_page_token: None,
            }),
            None => Err(FetchError::Api { status: 403, message: "commentsDisabled".into() }),
        }
    }
}

/// Search stub mapping subjects to URL lists; unknown subjects fail.
#[derive(Default)]
pub struct StaticSearch {
    results: HashMap<String, Vec<String>>,
    pub max_results_seen: Mutex<Vec<u32>>,
}

impl StaticSearch {
    pub fn with(mut self, subject: &str, urls: &[&str]) -> Self {
        self.results.insert(subject.to_string(), urls.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl VideoSearch for StaticSearch {
    fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<String>, FetchError> {
        self.max_results_seen.lock().unwrap().push(max_results);
        self.results
            .get(query)
            .map(|urls| urls.iter().take(max_results as usize).cloned().collect())
            .ok_or_else(|| FetchError::Network("connection reset".into()))
    }
}
