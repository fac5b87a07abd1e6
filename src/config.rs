use crate::analysis::DEFAULT_MAX_COMMENTS;
use anyhow::{bail, Result};
use std::time::Duration;

/// Default YouTube Data API v3 root.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Remote client settings. The key is passed in explicitly; nothing reads it globally.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub region_code: Option<String>, // search bias, e.g. "CA"
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            region_code: Some("CA".to_string()),
        }
    }
}

impl ApiConfig {
    /// Defaults plus the key from `YOUTUBE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::default().with_api_key(key)),
            _ => bail!("{} is not set", API_KEY_ENV),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into().trim().to_string();
        self
    }
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    pub fn with_region_code(mut self, region: Option<&str>) -> Self {
        self.region_code = region.map(|r| r.trim().to_uppercase()).filter(|r| !r.is_empty());
        self
    }
}

/// Batch options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    pub subjects: Vec<String>,
    pub videos_per_subject: u32,
    pub max_comments: usize,          // per video
    pub request_delay: Duration,      // pause after each video (or chunk of videos)
    pub video_concurrency: usize,     // videos analyzed at once within a subject
    pub progress: bool,
    pub progress_label: Option<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            subjects: Vec::new(),
            videos_per_subject: 10,
            max_comments: DEFAULT_MAX_COMMENTS,
            request_delay: Duration::from_secs(1),
            video_concurrency: 1, // sequential keeps us well inside API quotas
            progress: true,
            progress_label: None,
        }
    }
}

impl ScanOptions {
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subjects = crate::topics::normalize_subjects(subjects);
        self
    }
    pub fn with_videos_per_subject(mut self, n: u32) -> Self {
        self.videos_per_subject = n.clamp(1, 50);
        self
    }
    pub fn with_max_comments(mut self, n: usize) -> Self {
        self.max_comments = n;
        self
    }
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }
    pub fn with_video_concurrency(mut self, n: usize) -> Self {
        self.video_concurrency = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
}
