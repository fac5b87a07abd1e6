//! Per-comment classification and the per-video analysis pipeline.

use crate::category::{categorize, Category};
use crate::collector::collect_comments;
use crate::error::Diagnostic;
use crate::patterns::{extract_domain, has_link};
use crate::source::CommentSource;
use crate::video_id::resolve_video_id;
use serde::{Deserialize, Serialize};

/// Comments fetched per video when the caller has no preference.
pub const DEFAULT_MAX_COMMENTS: usize = 300;

/// One classified comment.
///
/// Records are only built by [`CommentRecord::classify`], which guarantees:
///   - `has_link == false` ⇒ empty domain and `no_link`
///   - non-empty domain ⇒ category other than `no_link`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentRecord {
    content: String,
    has_link: bool,
    link_domain: String,
    link_category: Category,
}

impl CommentRecord {
    /// Run matcher → extractor (only on a match) → classifier over `content`.
    pub fn classify(content: impl Into<String>) -> Self {
        let content = content.into();
        let has_link = has_link(content.as_str());
        let link_domain = if has_link { extract_domain(content.as_str()) } else { String::new() };
        let link_category = categorize(&link_domain);
        Self { content, has_link, link_domain, link_category }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
    pub fn has_link(&self) -> bool {
        self.has_link
    }
    pub fn link_domain(&self) -> &str {
        &self.link_domain
    }
    pub fn link_category(&self) -> Category {
        self.link_category
    }
}

/// Classify comment texts in order.
pub fn classify_comments<I, S>(texts: I) -> Vec<CommentRecord>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts.into_iter().map(CommentRecord::classify).collect()
}

/// Resolve `url`, collect up to `max_count` comments and classify each one.
///
/// An unresolvable URL or a failed fetch comes back as a [`Diagnostic`]; a video
/// with no comments yields an empty list.
pub fn analyze_video<S: CommentSource + ?Sized>(
    source: &S,
    url: &str,
    max_count: usize,
) -> Result<Vec<CommentRecord>, Diagnostic> {
    let video_id = resolve_video_id(url).ok_or_else(|| Diagnostic::UnresolvableUrl { url: url.to_string() })?;
    let comments = collect_comments(source, &video_id, max_count)?;
    if comments.is_empty() {
        return Ok(Vec::new());
    }
    Ok(classify_comments(comments))
}
