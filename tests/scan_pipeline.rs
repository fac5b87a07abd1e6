#[path = "common/mod.rs"]
mod common;

use common::*;
use std::time::{Duration, Instant};
use ytlinks::{Category, LinkScan};

fn quiet_scan() -> LinkScan {
    LinkScan::new().progress(false).request_delay(Duration::ZERO)
}

fn table() -> VideoTable {
    VideoTable::default()
        .with("v1", &["first https://bit.ly/a", "hello"])
        .with("v2", &["buy on ebay.com"])
        .with("v3", &["watch youtu.be/zzz"])
}

/// Two subjects, one bad URL, one video with comments disabled, one failed search:
/// - rows carry subject + URL and keep search/fetch order
/// - each failure becomes one diagnostic and the batch keeps going
#[test]
fn batch_tags_rows_and_collects_diagnostics() {
    let search = StaticSearch::default()
        .with("Canadian news", &["https://www.youtube.com/watch?v=v1", "https://vimeo.com/1", "https://youtu.be/v2"])
        .with("Canadian food", &["https://youtu.be/gone", "https://www.youtube.com/shorts/v3"]);

    let outcome = quiet_scan()
        .subjects(["Canadian news", "Canadian music", "Canadian food"])
        .run(&search, &table());

    let got: Vec<(&str, &str, &str, Category)> = outcome
        .rows
        .iter()
        .map(|r| (r.subject.as_str(), r.video_url.as_str(), r.record.content(), r.record.link_category()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Canadian news", "https://www.youtube.com/watch?v=v1", "first https://bit.ly/a", Category::LinkShortener),
            ("Canadian news", "https://www.youtube.com/watch?v=v1", "hello", Category::NoLink),
            ("Canadian news", "https://youtu.be/v2", "buy on ebay.com", Category::Ecommerce),
            ("Canadian food", "https://www.youtube.com/shorts/v3", "watch youtu.be/zzz", Category::VideoPlatform),
        ]
    );

    let kinds: Vec<&str> = outcome.diagnostics.iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, vec!["unresolvable_url", "search_failed", "fetch_failed"]);
    assert_eq!(outcome.videos_analyzed, 5);
}

/// `videos_per_subject` is forwarded to the search and `max_comments` caps each video.
#[test]
fn options_reach_search_and_collector() {
    let search = StaticSearch::default().with("s", &["https://youtu.be/v1"]);
    let outcome = quiet_scan().subjects(["s"]).videos_per_subject(3).max_comments(1).run(&search, &table());

    assert_eq!(*search.max_results_seen.lock().unwrap(), vec![3]);
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0].record.content(), "first https://bit.ly/a");
}

/// Concurrent analysis returns the same rows in the same order as sequential.
#[test]
fn concurrency_preserves_order() {
    let urls: Vec<String> = ["v1", "v2", "v3", "v1", "v2"].iter().map(|id| format!("https://youtu.be/{id}")).collect();
    let src = table();

    let seq = quiet_scan().analyze_urls(&src, "s", &urls);
    let par = quiet_scan().video_concurrency(3).analyze_urls(&src, "s", &urls);

    assert_eq!(seq.rows, par.rows);
    assert_eq!(seq.rows.len(), 7);
    assert!(par.diagnostics.is_empty());
}

/// Blank and repeated subjects are dropped before searching.
#[test]
fn subjects_are_normalized() {
    let scan = quiet_scan().subjects(["  news ", "", "News", "food"]);
    assert_eq!(scan.options().subjects, vec!["news", "food"]);
}

/// The pause follows every video when analyzing one at a time,
/// and every chunk when several run together.
#[test]
fn request_delay_paces_videos() {
    let urls: Vec<String> = (0..3).map(|i| format!("https://vimeo.com/{i}")).collect();
    let src = table();

    let delay = Duration::from_millis(20);
    let started = Instant::now();
    let outcome = LinkScan::new().progress(false).request_delay(delay).analyze_urls(&src, "s", &urls);
    assert!(started.elapsed() >= delay * 3, "one pause per video");
    assert_eq!(outcome.diagnostics.len(), 3);

    let delay = Duration::from_millis(100);
    let started = Instant::now();
    LinkScan::new().progress(false).request_delay(delay).video_concurrency(3).analyze_urls(&src, "s", &urls);
    let elapsed = started.elapsed();
    assert!(elapsed >= delay, "chunk pause applied");
    assert!(elapsed < delay * 3, "single pause for one chunk, took {elapsed:?}");
}

/// A batch where every video fails yields no rows but still reports what was skipped.
#[test]
fn all_failed_batch_reports_skips() {
    let search = StaticSearch::default().with("s", &["https://youtu.be/gone", "https://vimeo.com/1"]);
    let outcome = quiet_scan().subjects(["s", "unknown"]).run(&search, &table());

    assert!(outcome.rows.is_empty());
    assert_eq!(outcome.diagnostics.len(), 3);
    assert_eq!(
        outcome.skipped_summary().as_deref(),
        Some("3 videos or subjects were skipped (see warnings above)")
    );

    let clean = quiet_scan().subjects(["s"]).run(&StaticSearch::default().with("s", &["https://youtu.be/v1"]), &table());
    assert_eq!(clean.skipped_summary(), None);
}
