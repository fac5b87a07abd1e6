//! Result persistence: one JSON object per row, plain or zstd-compressed.

use crate::pipeline::ScanRow;
use crate::util::{create_with_backoff, open_with_backoff, replace_file_atomic_backoff, staging_path_for};
use anyhow::{Context, Result};
use regex::Regex;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zstd::stream::read::Decoder as ZstdDecoder;
use zstd::stream::write::Encoder as ZstdEncoder;

/// Output format for result files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Jsonl,
    Zst,
}

impl ExportFormat {
    /// `.zst` → Zst, anything else → Jsonl.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("zst") => ExportFormat::Zst,
            _ => ExportFormat::Jsonl,
        }
    }
}

const WRITE_BUF: usize = 256 * 1024;
const ZSTD_LEVEL: i32 = 3;

/// Write `rows` to `out` and return how many were written.
/// An empty batch writes nothing. The file is built in a staging sibling and promoted at the end.
pub fn write_rows(rows: &[ScanRow], out: &Path, format: ExportFormat) -> Result<usize> {
    if rows.is_empty() {
        tracing::info!("No results to save.");
        return Ok(0);
    }
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }

    let tmp = staging_path_for(out);
    let f = create_with_backoff(&tmp, 16, 50).with_context(|| format!("create {}", tmp.display()))?;
    let written = write_staged(rows, f, format).and_then(|()| replace_file_atomic_backoff(&tmp, out));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.context(format!("write {}", out.display())));
    }
    tracing::info!("Saved {} results to {}", rows.len(), out.display());
    Ok(rows.len())
}

fn write_staged(rows: &[ScanRow], f: std::fs::File, format: ExportFormat) -> Result<()> {
    let mut w = BufWriter::with_capacity(WRITE_BUF, f);
    match format {
        ExportFormat::Jsonl => {
            write_lines(rows, &mut w)?;
            w.flush()?;
        }
        ExportFormat::Zst => {
            let mut enc = ZstdEncoder::new(w, ZSTD_LEVEL)?;
            write_lines(rows, &mut enc)?;
            enc.finish()?.flush()?;
        }
    }
    Ok(())
}

fn write_lines(rows: &[ScanRow], w: &mut impl Write) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut *w, row)?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// Read rows back from a file written by [`write_rows`]; format follows the extension.
/// Blank lines are skipped; a malformed line is an error naming its line number.
pub fn read_rows(path: &Path) -> Result<Vec<ScanRow>> {
    let f = open_with_backoff(path, 16, 50).with_context(|| format!("open {}", path.display()))?;
    let inner: Box<dyn Read> = match ExportFormat::from_path(path) {
        ExportFormat::Jsonl => Box::new(f),
        ExportFormat::Zst => Box::new(ZstdDecoder::new(f)?),
    };
    let r = BufReader::new(inner);
    let mut rows = Vec::new();
    for (i, line) in r.lines().enumerate() {
        let line = line.with_context(|| format!("read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let row: ScanRow = serde_json::from_str(&line)
            .with_context(|| format!("parse {} line {}", path.display(), i + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Result files (`*.jsonl`, `*.jsonl.zst`) directly inside `dir`, sorted by name.
pub fn discover_result_files(dir: &Path) -> Vec<PathBuf> {
    let re = Regex::new(r"^[^.].*\.jsonl(\.zst)?$").expect("static result file pattern");
    let mut files = Vec::new();
    if !dir.exists() {
        return files;
    }
    for ent in WalkDir::new(dir).min_depth(1).max_depth(1).into_iter().flatten() {
        if !ent.file_type().is_file() {
            continue;
        }
        if let Some(name) = ent.file_name().to_str() {
            if re.is_match(name) {
                files.push(ent.path().to_path_buf());
            }
        }
    }
    files.sort();
    files
}

/// Read and concatenate every result file in `dir`.
pub fn read_rows_in_dir(dir: &Path) -> Result<Vec<ScanRow>> {
    let mut rows = Vec::new();
    for path in discover_result_files(dir) {
        rows.extend(read_rows(&path)?);
    }
    Ok(rows)
}
