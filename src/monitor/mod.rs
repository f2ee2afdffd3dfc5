//! Job lifecycle tracking: START/END matching and duration classification.

mod job;
mod tracker;

pub use job::{Classification, CompletedJob, OpenJob, Thresholds};
pub use tracker::JobTracker;
