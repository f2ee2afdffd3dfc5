//! Single-pass START/END matcher.
//!
//! [`JobTracker::ingest`] is the per-key state machine: a START opens (or
//! restarts) a job, a matching END closes it into a [`CompletedJob`].

use std::collections::HashMap;

use tracing::debug;

use super::job::{CompletedJob, JobKey, OpenJob};
use crate::error::MonitorError;
use crate::parser::{LogRecord, Status};

/// What a single record did to the tracker state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// START for a key that was not open.
    Opened,
    /// START for a key that was already open; the new start time wins.
    Restarted,
    /// END matched an open job; the completed job was appended.
    Closed,
    /// END with no open job for its key.
    Unmatched,
    /// Status other than START or END.
    Ignored,
}

/// Matches START/END pairs for one run.
///
/// Owns the open jobs keyed by [`JobKey`] and the completed jobs in the
/// order their END lines were seen.
#[derive(Debug, Default)]
pub struct JobTracker {
    open: HashMap<JobKey, OpenJob>,
    completed: Vec<CompletedJob>,
    next_seq: u64,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one record and reports which transition it caused.
    pub fn ingest(&mut self, record: LogRecord) -> Transition {
        let key = JobKey::new(record.description.clone(), record.pid.clone());
        match record.status {
            Status::Start => {
                if let Some(existing) = self.open.get_mut(&key) {
                    debug!(job = %key, "START overwrites open job");
                    existing.start_time = record.time;
                    return Transition::Restarted;
                }
                let seq = self.next_seq;
                self.next_seq += 1;
                self.open.insert(
                    key.clone(),
                    OpenJob {
                        key,
                        description: record.description,
                        pid: record.pid,
                        start_time: record.time,
                        seq,
                    },
                );
                Transition::Opened
            }
            Status::End => match self.open.remove(&key) {
                Some(open) => {
                    let done = CompletedJob::close(open, record.time);
                    debug!(job = %key, secs = done.duration_seconds, "job completed");
                    self.completed.push(done);
                    Transition::Closed
                }
                None => {
                    debug!(job = %key, "END without matching START");
                    Transition::Unmatched
                }
            },
            Status::Other(raw) => {
                debug!(job = %key, status = %raw, "ignoring unknown status");
                Transition::Ignored
            }
        }
    }

    /// Drains a record stream, stopping at the first fatal error.
    pub fn ingest_all<I>(&mut self, records: I) -> Result<(), MonitorError>
    where
        I: IntoIterator<Item = Result<LogRecord, MonitorError>>,
    {
        let (mut restarted, mut unmatched, mut ignored) = (0usize, 0usize, 0usize);
        for record in records {
            match self.ingest(record?) {
                Transition::Restarted => restarted += 1,
                Transition::Unmatched => unmatched += 1,
                Transition::Ignored => ignored += 1,
                Transition::Opened | Transition::Closed => {}
            }
        }
        debug!(
            completed = self.completed.len(),
            open = self.open.len(),
            restarted,
            unmatched,
            ignored,
            "log scan finished"
        );
        Ok(())
    }

    pub fn completed(&self) -> &[CompletedJob] {
        &self.completed
    }

    /// Open jobs in the order their key was first started.
    pub fn open_jobs(&self) -> Vec<&OpenJob> {
        let mut jobs: Vec<&OpenJob> = self.open.values().collect();
        jobs.sort_by_key(|job| job.seq);
        jobs
    }
}
