use std::fs;
use ytlinks::{
    discover_result_files, read_rows, read_rows_in_dir, write_rows, Category, CommentRecord, ExportFormat, LinkReport,
    ScanRow, UNKNOWN_DOMAIN,
};

fn row(subject: &str, video: &str, text: &str) -> ScanRow {
    ScanRow { record: CommentRecord::classify(text), subject: subject.to_string(), video_url: video.to_string() }
}

fn sample_rows() -> Vec<ScanRow> {
    vec![
        row("news", "https://youtu.be/a", "see http://bit.ly/x"),
        row("news", "https://youtu.be/a", "see http://bit.ly/x"), // exact duplicate
        row("news", "https://youtu.be/a", "no link"),
        row("news", "https://youtu.be/b", "shop amazon.ca"),
        row("food", "https://youtu.be/c", "recipe at example.org/pie"),
        row("food", "https://youtu.be/c", "local: http://localhost:8000"),
        row("food", "https://youtu.be/c", "again example.org"),
    ]
}

/// JSONL export: one object per row with the downstream field names, readable back.
#[test]
fn jsonl_round_trip_and_shape() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("results.jsonl");
    let rows = sample_rows();

    assert_eq!(write_rows(&rows, &out, ExportFormat::Jsonl).unwrap(), rows.len());
    assert_eq!(read_rows(&out).unwrap(), rows);

    let first = fs::read_to_string(&out).unwrap();
    let v: serde_json::Value = serde_json::from_str(first.lines().next().unwrap()).unwrap();
    for key in ["content", "has_link", "link_domain", "link_category", "subject", "video_url"] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
    assert_eq!(v["link_category"], "link_shortener");

    // no staging file left behind
    let names: Vec<String> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["results.jsonl"]);
}

/// Zstd export is compressed on disk and detected by extension on read.
#[test]
fn zst_export_and_directory_discovery() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("out");
    let rows = sample_rows();

    write_rows(&rows[..3], &dir.join("a.jsonl"), ExportFormat::Jsonl).unwrap();
    write_rows(&rows[3..], &dir.join("b.jsonl.zst"), ExportFormat::Zst).unwrap();
    fs::write(dir.join("notes.txt"), "ignore me").unwrap();

    let raw = fs::read(dir.join("b.jsonl.zst")).unwrap();
    assert_eq!(&raw[..4], &[0x28, 0xb5, 0x2f, 0xfd], "zstd magic");
    assert_eq!(ExportFormat::from_path(&dir.join("b.jsonl.zst")), ExportFormat::Zst);

    let files = discover_result_files(&dir);
    assert_eq!(files.len(), 2);
    assert_eq!(read_rows_in_dir(&dir).unwrap(), rows);
}

/// Nothing is written for an empty batch.
#[test]
fn empty_batch_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("results.jsonl");
    assert_eq!(write_rows(&[], &out, ExportFormat::Jsonl).unwrap(), 0);
    assert!(!out.exists());
}

/// A failed write reports the error and leaves no staging file behind.
#[test]
fn failed_write_cleans_up_staging_file() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("results.jsonl");
    fs::create_dir(&out).unwrap();
    fs::write(out.join("keep.txt"), "occupied").unwrap();

    let err = write_rows(&sample_rows(), &out, ExportFormat::Jsonl).unwrap_err();
    assert!(format!("{err:#}").contains("results.jsonl"));
    assert!(!tmp.path().join(".results.jsonl.inprogress").exists());
    assert!(out.join("keep.txt").exists());
}

/// Report over the sample:
/// - the duplicate row is counted once (6 unique rows, 5 with link)
/// - linked rows without an extractable domain are grouped as "unknown"
/// - top lists are ordered by count, then name
#[test]
fn report_counts() {
    let report = LinkReport::build(&sample_rows());
    assert_eq!(report.total, 6);
    assert_eq!(report.with_link, 5);
    assert_eq!(report.without_link, 1);

    assert_eq!(report.categories.get(&Category::GenericLink), Some(&2));
    assert_eq!(report.categories.get(&Category::LinkShortener), Some(&1));
    assert_eq!(report.categories.get(&Category::Ecommerce), Some(&1));
    assert_eq!(report.categories.get(&Category::NoLink), Some(&1)); // localhost link

    assert_eq!(report.top_domains[0], ("example.org".to_string(), 2));
    assert!(report.top_domains.contains(&(UNKNOWN_DOMAIN.to_string(), 1)));

    assert_eq!(report.subject_categories["news"].get(&Category::LinkShortener), Some(&1));
    assert_eq!(report.subject_categories["food"].get(&Category::GenericLink), Some(&2));

    assert_eq!(report.top_videos[0], ("https://youtu.be/c".to_string(), 3));
    assert!(report.generated_at.is_some());

    let text = report.render_text();
    assert!(text.contains("6 total, 5 with link"));
    assert!(text.contains("example.org"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["categories"]["generic_link"], 2);
}

/// An empty input gives an all-zero report.
#[test]
fn report_empty() {
    let report = LinkReport::build(&[]);
    assert_eq!(report.total, 0);
    assert!(report.top_domains.is_empty());
    assert!(report.render_text().contains("No linked comments."));
}
