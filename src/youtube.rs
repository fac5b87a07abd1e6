//! Blocking YouTube Data API v3 client: comment pages and topic video search.

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::source::{CommentPage, CommentSource, PageRequest, SortOrder, VideoSearch};
use crate::video_id::VideoId;
use anyhow::{bail, Context, Result};
use serde_json::Value;

pub struct YouTubeClient {
    http: reqwest::blocking::Client,
    cfg: ApiConfig,
}

impl YouTubeClient {
    pub fn new(cfg: ApiConfig) -> Result<Self> {
        if cfg.api_key.is_empty() {
            bail!("YouTube API key is empty");
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self { http, cfg })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.cfg
    }

    fn get_json(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.cfg.base_url.trim_end_matches('/'), endpoint);
        tracing::trace!(endpoint, ?params, "YouTube API request");
        let resp = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.cfg.api_key.as_str())])
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(FetchError::Api { status: status.as_u16(), message: api_error_message(&body) });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl CommentSource for YouTubeClient {
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CommentPage, FetchError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("videoId", request.video_id.to_string()),
            ("maxResults", request.page_size.to_string()),
            ("textFormat", "plainText".to_string()),
            ("order", request.order.as_param().to_string()),
        ];
        if let Some(token) = request.page_token {
            params.push(("pageToken", token.to_string()));
        }
        let body = self.get_json("commentThreads", &params)?;
        Ok(parse_comment_page(&body))
    }
}

impl VideoSearch for YouTubeClient {
    fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<String>, FetchError> {
        let mut params = vec![
            ("part", "id".to_string()),
            ("type", "video".to_string()),
            ("q", query.to_string()),
            ("maxResults", max_results.to_string()),
            ("order", SortOrder::Relevance.as_param().to_string()),
        ];
        if let Some(region) = &self.cfg.region_code {
            params.push(("regionCode", region.clone()));
        }
        let body = self.get_json("search", &params)?;
        Ok(parse_search_results(&body))
    }
}

/// Pull top-level comment texts and the continuation token out of a
/// `commentThreads` response. A missing or non-string text is kept as `None`.
pub fn parse_comment_page(body: &Value) -> CommentPage {
    let items = body
        .get("items")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .map(|item| {
                    item.pointer("/snippet/topLevelComment/snippet/textDisplay")
                        .and_then(|t| t.as_str())
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default();

    let next_page_token = body
        .get("nextPageToken")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    CommentPage { items, next_page_token }
}

/// Watch URLs for every `id.videoId` in a `search` response.
pub fn parse_search_results(body: &Value) -> Vec<String> {
    body.get("items")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.pointer("/id/videoId").and_then(|v| v.as_str()))
                .filter_map(VideoId::new)
                .map(|id| id.watch_url())
                .collect()
        })
        .unwrap_or_default()
}

/// Best-effort message from an API error body (`error.message`), else the raw body.
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            match trimmed.char_indices().nth(200) {
                Some((cut, _)) => format!("{}…", &trimmed[..cut]),
                None => trimmed.to_string(),
            }
        })
}
