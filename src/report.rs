//! Job duration report.
//!
//! The [`Report`] is built once from the tracker state and then rendered
//! independently for each destination (console with colours, plain file).

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::cli::ReportFormat;
use crate::error::MonitorError;
use crate::monitor::{Classification, CompletedJob, JobTracker, OpenJob, Thresholds};
use crate::parser::TIME_FORMAT;
use crate::ui::Palette;

/// A completed job together with its derived figures.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedEntry {
    #[serde(flatten)]
    pub job: CompletedJob,
    pub duration_minutes: f64,
    pub classification: Classification,
}

/// Snapshot of one run, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub thresholds: Thresholds,
    pub total_completed: usize,
    pub completed: Vec<CompletedEntry>,
    pub incomplete: Vec<OpenJob>,
}

impl Report {
    pub fn build(tracker: &JobTracker, thresholds: Thresholds) -> Self {
        let completed: Vec<CompletedEntry> = tracker
            .completed()
            .iter()
            .map(|job| CompletedEntry {
                duration_minutes: job.duration_minutes(),
                classification: thresholds.classify(job.duration_seconds),
                job: job.clone(),
            })
            .collect();

        Self {
            thresholds,
            total_completed: completed.len(),
            completed,
            incomplete: tracker.open_jobs().into_iter().cloned().collect(),
        }
    }

    pub fn render(&self, format: ReportFormat, palette: &Palette) -> Result<String, MonitorError> {
        match format {
            ReportFormat::Text => Ok(self.to_text(palette)),
            ReportFormat::Json => {
                let mut out = serde_json::to_string_pretty(self)?;
                out.push('\n');
                Ok(out)
            }
        }
    }

    /// Plain-text layout; `palette` only affects the status labels.
    pub fn to_text(&self, palette: &Palette) -> String {
        let mut out = String::new();
        out.push_str("\nJOB MONITORING REPORT\n");
        out.push_str("=====================\n");
        out.push_str(&format!("Total jobs completed: {}\n", self.total_completed));

        out.push_str("\nJOB DETAILS:\n");
        out.push_str("===========\n");
        for entry in &self.completed {
            let job = &entry.job;
            out.push_str(&format!("{} (PID: {}):\n", job.description, job.pid));
            out.push_str(&format!("  Start: {}\n", job.start_time.format(TIME_FORMAT)));
            out.push_str(&format!("  End: {}\n", job.end_time.format(TIME_FORMAT)));
            out.push_str(&format!(
                "  Duration: {:.2} minutes ({} seconds)\n",
                entry.duration_minutes, job.duration_seconds
            ));
            out.push_str(&format!(
                "  Status: {}\n\n",
                palette.classification(entry.classification)
            ));
        }

        if !self.incomplete.is_empty() {
            out.push_str("\nINCOMPLETE JOBS:\n");
            out.push_str("===============\n");
            for job in &self.incomplete {
                out.push_str(&format!("{} (PID: {})\n", job.description, job.pid));
                out.push_str(&format!(
                    "  Started at: {}\n",
                    job.start_time.format(TIME_FORMAT)
                ));
                out.push_str(&format!(
                    "  Status: {} - No END entry found\n\n",
                    palette.incomplete()
                ));
            }
        }

        out
    }
}

/// Writes rendered report text to `path`, replacing any previous report.
pub fn write_report(path: &Path, content: &str) -> Result<(), MonitorError> {
    fs::write(path, content).map_err(|source| MonitorError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}
