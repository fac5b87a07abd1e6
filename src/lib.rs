mod patterns;
mod category;
mod video_id;
mod error;

mod source;
mod collector;
mod analysis;
mod youtube;

mod config;
mod topics;
mod pipeline;
mod concurrency;
mod progress;
mod util;

mod export;
mod report;

pub use crate::patterns::{extract_domain, has_link, LINK_TLDS};
pub use crate::category::{categorize, categorize_with, Category, CategoryRule, CATEGORY_RULES};
pub use crate::video_id::{resolve_video_id, VideoId};
pub use crate::error::{Diagnostic, FetchError};

// Remote seams + the default YouTube implementation.
pub use crate::source::{CommentPage, CommentSource, PageRequest, SortOrder, VideoSearch, PAGE_SIZE};
pub use crate::youtube::{api_error_message, parse_comment_page, parse_search_results, YouTubeClient};

// Per-video core.
pub use crate::collector::collect_comments;
pub use crate::analysis::{analyze_video, classify_comments, CommentRecord, DEFAULT_MAX_COMMENTS};

// Batch orchestration and configuration.
pub use crate::config::{ApiConfig, ScanOptions, API_KEY_ENV, DEFAULT_API_BASE};
pub use crate::topics::{default_subjects, merge_extra_subjects, normalize_subjects};
pub use crate::pipeline::{LinkScan, ScanOutcome, ScanRow};
pub use crate::util::init_tracing_once;

// Persistence and reporting.
pub use crate::export::{discover_result_files, read_rows, read_rows_in_dir, write_rows, ExportFormat};
pub use crate::report::{LinkReport, TOP_DOMAINS, TOP_VIDEOS, UNKNOWN_DOMAIN};
