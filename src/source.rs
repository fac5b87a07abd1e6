//! Remote collaborator seams: a paged comment source and a topic video search.

use crate::error::FetchError;
use crate::video_id::VideoId;

/// Items requested per comment page.
pub const PAGE_SIZE: u32 = 100;

/// Result ordering sent to the remote. Comment pages are read newest first,
/// video searches by relevance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Time,
    Relevance,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Time => "time",
            SortOrder::Relevance => "relevance",
        }
    }
}

/// One page request. `page_token` is the opaque continuation from the previous page.
/// Texts are always requested as plain text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub video_id: &'a VideoId,
    pub page_size: u32,
    pub page_token: Option<&'a str>,
    pub order: SortOrder,
}

/// One page of comment texts. An item is `None` when the remote sent no usable text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentPage {
    pub items: Vec<Option<String>>,
    pub next_page_token: Option<String>,
}

pub trait CommentSource: Send + Sync {
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CommentPage, FetchError>;
}

pub trait VideoSearch: Send + Sync {
    /// Watch URLs for the top `max_results` videos matching `query`.
    fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<String>, FetchError>;
}
