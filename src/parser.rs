//! Entry parser for job-lifecycle logs.
//!
//! Each CSV row is `HH:MM:SS,<description>,START|END,<pid>`, without a header.
//! Quoted fields follow the usual CSV rules, so a description may contain a
//! comma. Rows that do not have exactly four fields are skipped; a four-field
//! row with an invalid timestamp aborts the whole scan.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{NaiveTime, Timelike};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::MonitorError;

/// Format shared by the log input and every rendered time in the report.
pub const TIME_FORMAT: &str = "%H:%M:%S";

const FIELD_COUNT: usize = 4;

/// Lifecycle marker carried by a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Start,
    End,
    /// Anything else; kept so the tracker can ignore it explicitly.
    Other(String),
}

impl Status {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "START" => Status::Start,
            "END" => Status::End,
            other => Status::Other(other.to_string()),
        }
    }
}

/// One validated log line with trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub time: NaiveTime,
    pub description: String,
    pub status: Status,
    pub pid: String,
}

/// Strict 24-hour `HH:MM:SS`. chrono accepts `:60` as a leap second; that is
/// rejected here like any other out-of-range second.
pub fn parse_time(line_no: u64, raw: &str) -> Result<NaiveTime, MonitorError> {
    let malformed = |reason: String| MonitorError::MalformedTimestamp {
        line: line_no,
        value: raw.to_string(),
        reason,
    };
    let time =
        NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|err| malformed(err.to_string()))?;
    if time.nanosecond() >= 1_000_000_000 {
        return Err(malformed("second must be in 0..59".to_string()));
    }
    Ok(time)
}

/// Converts one CSV row. `Ok(None)` means the row was skipped for having the
/// wrong number of fields.
pub fn parse_record(line_no: u64, row: &StringRecord) -> Result<Option<LogRecord>, MonitorError> {
    if row.len() != FIELD_COUNT {
        debug!(line = line_no, fields = row.len(), "skipping record");
        return Ok(None);
    }

    let field = |idx: usize| row.get(idx).unwrap_or_default().trim();
    let time = parse_time(line_no, field(0))?;

    Ok(Some(LogRecord {
        time,
        description: field(1).to_string(),
        status: Status::parse(field(2)),
        pid: field(3).to_string(),
    }))
}

/// Lazily yields records from any reader.
///
/// Read failures are reported against `path` so the caller can surface which
/// source broke.
pub fn records<'a, R: Read + 'a>(
    reader: R,
    path: &'a Path,
) -> impl Iterator<Item = Result<LogRecord, MonitorError>> + 'a {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .into_records()
        .filter_map(move |row| match row {
            Ok(row) => {
                let line_no = row.position().map_or(0, |pos| pos.line());
                parse_record(line_no, &row).transpose()
            }
            Err(err) => Some(Err(MonitorError::from_csv(path, err))),
        })
}

/// Opens the log at `path` for a single buffered scan.
pub fn open_log(path: &Path) -> Result<BufReader<File>, MonitorError> {
    let file = File::open(path).map_err(|err| MonitorError::from_source_io(path, err))?;
    Ok(BufReader::new(file))
}
