//! JSON output for extracted records
//!
//! Two shapes are produced: a single pretty-printed record, and an aggregated
//! document `{ timeStamp, totalItems, results: [ { code } ] }` holding a whole
//! run. Writers work on any `std::io::Write`; the `save_*` helpers add the
//! filesystem handling.

use crate::core::error::{Result, ResultExt, ScrapeError};
use crate::core::models::ExtractedRecord;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One entry of an aggregated document
#[derive(Debug, Serialize)]
pub struct AggregatedEntry<'a> {
    pub code: &'a ExtractedRecord,
}

/// Aggregated results of a run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedDocument<'a> {
    /// RFC 3339 UTC creation time
    pub time_stamp: String,
    pub total_items: usize,
    pub results: Vec<AggregatedEntry<'a>>,
}

impl<'a> AggregatedDocument<'a> {
    /// Document stamped with the current time
    pub fn new(records: &'a [ExtractedRecord]) -> Self {
        Self::at(records, Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Document with an explicit timestamp
    pub fn at(records: &'a [ExtractedRecord], time_stamp: impl Into<String>) -> Self {
        Self {
            time_stamp: time_stamp.into(),
            total_items: records.len(),
            results: records.iter().map(|code| AggregatedEntry { code }).collect(),
        }
    }
}

/// Pretty-printed JSON of a single record
pub fn record_to_json(record: &ExtractedRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Aggregated document of `records` as a JSON string
pub fn to_aggregated_json(records: &[ExtractedRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&AggregatedDocument::new(records))?)
}

/// Stream one record to `writer`
pub fn write_record<W: Write>(writer: W, record: &ExtractedRecord) -> Result<()> {
    serde_json::to_writer_pretty(writer, record)?;
    Ok(())
}

/// Stream the aggregated document of `records` to `writer`
pub fn write_aggregated<W: Write>(mut writer: W, records: &[ExtractedRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &AggregatedDocument::new(records))?;
    writeln!(writer)?;
    Ok(())
}

/// Stream `records` as a plain JSON array
pub fn write_records<W: Write>(mut writer: W, records: &[ExtractedRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(ScrapeError::from)
            .context(format!("creating {}", parent.display()))?;
    }
    let file = File::create(path)
        .map_err(ScrapeError::from)
        .context(format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Save one record to `path`, creating parent directories
pub fn save_record(path: &Path, record: &ExtractedRecord) -> Result<()> {
    let mut out = create_output(path)?;
    write_record(&mut out, record)?;
    out.flush()?;
    Ok(())
}

/// Save `records` as a plain JSON array to `path`, creating parent directories
pub fn save_records(path: &Path, records: &[ExtractedRecord]) -> Result<()> {
    let mut out = create_output(path)?;
    write_records(&mut out, records)?;
    out.flush()?;
    Ok(())
}

/// Save the aggregated document of `records` to `path`, creating parent directories
pub fn save_all(path: &Path, records: &[ExtractedRecord]) -> Result<()> {
    let mut out = create_output(path)?;
    write_aggregated(&mut out, records)?;
    out.flush()?;
    Ok(())
}
