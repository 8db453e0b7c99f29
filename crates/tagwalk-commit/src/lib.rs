//! Commit types for tagwalk.
//!
//! This crate provides the commit types used throughout tagwalk:
//! - [`CommitRecord`]: a commit as read from the log, with its tag and classification
//! - [`Classification`]: the convention-derived type, scope and bump flags
//! - [`parse_log`]: splits pre-formatted log text into records

mod classification;
mod error;
mod log;
mod record;

pub use classification::{Classification, ClassificationBuilder};
pub use error::{CommitError, CommitResult};
pub use log::{LOG_FORMAT, LOG_MARKER, parse_log};
pub use record::{CommitRecord, CommitRecordBuilder, Identity};
