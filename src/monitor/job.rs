//! Job records and duration classification.
//!
//! [`OpenJob`] and [`CompletedJob`] are the two lifecycle stages of a job;
//! [`Thresholds`] turns a completed job's duration into a [`Classification`].

use chrono::NaiveTime;
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 86_400;

/// Identity of an in-flight job: trimmed description plus trimmed pid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct JobKey {
    pub description: String,
    pub pid: String,
}

impl JobKey {
    pub fn new(description: impl Into<String>, pid: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            pid: pid.into(),
        }
    }
}

impl std::fmt::Display for JobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (PID: {})", self.description, self.pid)
    }
}

/// Outcome of comparing a completed job's duration against [`Thresholds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Ok,
    Warning,
    Error,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Ok => write!(f, "OK"),
            Classification::Warning => write!(f, "WARNING"),
            Classification::Error => write!(f, "ERROR"),
        }
    }
}

/// Duration boundaries used to classify completed jobs, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    pub warning_secs: u32,
    pub error_secs: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_secs: 5 * 60,
            error_secs: 10 * 60,
        }
    }
}

impl Thresholds {
    /// Both bounds are inclusive on the lower classification:
    /// `d <= warning` is OK, `warning < d <= error` is WARNING.
    pub fn classify(&self, duration_secs: u32) -> Classification {
        if duration_secs > self.error_secs {
            Classification::Error
        } else if duration_secs > self.warning_secs {
            Classification::Warning
        } else {
            Classification::Ok
        }
    }
}

/// A job whose START has been seen but not its END.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenJob {
    pub key: JobKey,
    pub description: String,
    pub pid: String,
    #[serde(serialize_with = "serialize_hms")]
    pub start_time: NaiveTime,
    // Position of the key's first START, used to list incomplete jobs in log order.
    #[serde(skip)]
    pub(crate) seq: u64,
}

/// A START matched with its END.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedJob {
    pub key: JobKey,
    pub description: String,
    pub pid: String,
    #[serde(serialize_with = "serialize_hms")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "serialize_hms")]
    pub end_time: NaiveTime,
    pub duration_seconds: u32,
}

impl CompletedJob {
    pub fn close(open: OpenJob, end_time: NaiveTime) -> Self {
        Self {
            duration_seconds: elapsed_seconds(open.start_time, end_time),
            key: open.key,
            description: open.description,
            pid: open.pid,
            start_time: open.start_time,
            end_time,
        }
    }

    pub fn duration_minutes(&self) -> f64 {
        f64::from(self.duration_seconds) / 60.0
    }
}

/// Seconds from `start` to `end` on a 24h clock, wrapping past midnight.
/// The result is always in `[0, 86400)`.
pub fn elapsed_seconds(start: NaiveTime, end: NaiveTime) -> u32 {
    let diff = (end - start).num_seconds();
    // rem_euclid keeps the value non-negative and below one day.
    diff.rem_euclid(SECONDS_PER_DAY) as u32
}

// Times serialize as `HH:MM:SS` instead of chrono's fractional default.
fn serialize_hms<S: serde::Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&time.format(crate::parser::TIME_FORMAT))
}
