//! Library errors

use thiserror::Error;

use crate::records::{MedicationStatus, TestStatus};

/// Errors raised by the trace rendering layer.
///
/// Frame-by-frame drawing never errors (an unready surface is a no-op);
/// these cover setup and layout handling only.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("unknown trace channel: {0}")]
    UnknownChannel(String),

    #[error("invalid channel geometry: {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    #[error("invalid color literal: '{0}'")]
    InvalidColor(String),

    #[error("layout serialization failed: {0}")]
    Layout(#[from] serde_json::Error),
}

/// Errors raised by ward record state machines.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("alert already acknowledged")]
    AlreadyAcknowledged,

    #[error("unknown alert: {0}")]
    UnknownAlert(uuid::Uuid),

    #[error("invalid medication transition: {from:?} -> {to:?}")]
    MedicationTransition {
        from: MedicationStatus,
        to: MedicationStatus,
    },

    #[error("invalid test transition: {from:?} -> {to:?}")]
    TestTransition { from: TestStatus, to: TestStatus },

    #[error("unknown patient: {0}")]
    UnknownPatient(uuid::Uuid),
}
