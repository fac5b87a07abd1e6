//! Video identifier parsing for the YouTube URL shapes we accept.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Non-empty YouTube video id as understood by the Data API.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Wrap a raw id; `None` for empty input.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this id.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolve a video URL to its id.
///
/// Accepted shapes:
///   - `youtube.com/watch?v=<id>` (with or without `www.`)
///   - `youtube.com/shorts/<id>`, `youtube.com/embed/<id>`
///   - `youtu.be/<id>`
///
/// Anything else, including URLs that fail to parse, resolves to `None`.
pub fn resolve_video_id(url: &str) -> Option<VideoId> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    match host {
        "youtube.com" | "www.youtube.com" => {
            if parsed.path() == "/watch" {
                let id = parsed
                    .query_pairs()
                    .filter(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned())
                    .find(|v| !v.is_empty())?;
                return VideoId::new(id);
            }
            let mut parts = parsed.path().trim_matches('/').split('/');
            match parts.next() {
                Some("shorts") | Some("embed") => VideoId::new(parts.next().unwrap_or_default()),
                _ => None,
            }
        }
        "youtu.be" => VideoId::new(parsed.path().trim_matches('/')),
        _ => None,
    }
}
