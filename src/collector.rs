//! Bounded, paged comment collection.

use crate::error::Diagnostic;
use crate::source::{CommentSource, PageRequest, SortOrder, PAGE_SIZE};
use crate::video_id::VideoId;

/// Per-call accumulation state.
struct FetchState {
    comments: Vec<String>,
    page_token: Option<String>,
    remaining: usize,
}

impl FetchState {
    fn new(max_count: usize) -> Self {
        Self { comments: Vec::with_capacity(max_count.min(PAGE_SIZE as usize * 4)), page_token: None, remaining: max_count }
    }

    /// Keep at most `remaining` items of the page; absent text becomes "".
    fn absorb(&mut self, items: Vec<Option<String>>) {
        let take = items.len().min(self.remaining);
        self.comments.extend(items.into_iter().take(take).map(Option::unwrap_or_default));
        self.remaining -= take;
    }

    /// Advance to `next`; false when there is nothing further to request.
    fn advance(&mut self, next: Option<String>) -> bool {
        match next {
            Some(tok) if !tok.is_empty() && self.page_token.as_deref() != Some(tok.as_str()) => {
                self.page_token = Some(tok);
                true
            }
            _ => false,
        }
    }
}

/// Collect up to `max_count` top-level comment texts for `video_id`, newest first.
///
/// Pages of [`PAGE_SIZE`] are requested until the cap is reached, the source stops
/// returning a continuation token, or a request fails. On failure everything gathered
/// so far is dropped and a [`Diagnostic::FetchFailed`] is returned.
pub fn collect_comments<S: CommentSource + ?Sized>(
    source: &S,
    video_id: &VideoId,
    max_count: usize,
) -> Result<Vec<String>, Diagnostic> {
    let mut state = FetchState::new(max_count);
    if state.remaining == 0 {
        return Ok(state.comments);
    }

    let mut pages = 0usize;
    loop {
        let request = PageRequest {
            video_id,
            page_size: PAGE_SIZE,
            page_token: state.page_token.as_deref(),
            order: SortOrder::Time,
        };
        let page = source.fetch_page(&request).map_err(|e| {
            tracing::debug!(video = %video_id, pages, dropped = state.comments.len(), "comment page fetch failed");
            Diagnostic::FetchFailed { video_id: video_id.to_string(), message: e.to_string() }
        })?;
        pages += 1;

        state.absorb(page.items);
        if state.remaining == 0 || !state.advance(page.next_page_token) {
            break;
        }
    }

    tracing::debug!(video = %video_id, pages, comments = state.comments.len(), "collected comments");
    Ok(state.comments)
}
