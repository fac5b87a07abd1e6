use anyhow::{Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use ytlinks::{
    default_subjects, init_tracing_once, merge_extra_subjects, read_rows, read_rows_in_dir, write_rows, ApiConfig,
    ExportFormat, LinkReport, LinkScan, ScanRow, YouTubeClient, DEFAULT_MAX_COMMENTS,
};

const RESULTS_PATH: &str = "video_link_results.jsonl";
const REPORT_PATH: &str = "video_link_report.json";
const VIDEOS_PER_SUBJECT: u32 = 10;

/// `ytlinks`              search, analyze and save results + report
/// `ytlinks report [PATH]` rebuild the report from a results file or directory
fn main() -> Result<()> {
    init_tracing_once();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("report") => {
            let input = PathBuf::from(args.get(1).map(String::as_str).unwrap_or(RESULTS_PATH));
            let rows = if input.is_dir() { read_rows_in_dir(&input)? } else { read_rows(&input)? };
            emit_report(&rows)
        }
        _ => scan(),
    }
}

fn scan() -> Result<()> {
    let client = YouTubeClient::new(ApiConfig::from_env()?)?;

    let mut subjects = default_subjects();
    merge_extra_subjects(&mut subjects);

    let outcome = LinkScan::new()
        .subjects(&subjects)
        .videos_per_subject(VIDEOS_PER_SUBJECT)
        .max_comments(DEFAULT_MAX_COMMENTS)
        .progress(true)
        .run(&client, &client);

    if let Some(note) = outcome.skipped_summary() {
        println!("{}", note);
    }
    let out = Path::new(RESULTS_PATH);
    let n = write_rows(&outcome.rows, out, ExportFormat::from_path(out))?;
    if n == 0 {
        println!("No results to save.");
        return Ok(());
    }
    println!("Saved {} results to {}", n, RESULTS_PATH);
    emit_report(&outcome.rows)
}

fn emit_report(rows: &[ScanRow]) -> Result<()> {
    let report = LinkReport::build(rows);
    let f = fs::File::create(REPORT_PATH).with_context(|| format!("create {}", REPORT_PATH))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &report)?;
    w.flush()?;
    print!("{}", report.render_text());
    Ok(())
}
