//! Medication, lab test, and ward event records
//!
//! Simple status machines with one-directional transitions. Invalid
//! transitions are errors rather than silent no-ops so workflow bugs
//! surface in the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RecordError;

/// Medication administration status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicationStatus {
    Due,
    Upcoming,
    Completed,
    Missed,
}

impl MedicationStatus {
    /// Due/Upcoming resolve to Completed or Missed; resolved states are
    /// terminal.
    pub fn can_transition(self, to: MedicationStatus) -> bool {
        matches!(
            (self, to),
            (
                MedicationStatus::Due | MedicationStatus::Upcoming,
                MedicationStatus::Completed | MedicationStatus::Missed
            ) | (MedicationStatus::Upcoming, MedicationStatus::Due)
        )
    }
}

/// A scheduled medication for one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub name: String,
    pub dose: String,
    pub route: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: MedicationStatus,
}

impl Medication {
    pub fn set_status(&mut self, to: MedicationStatus) -> Result<(), RecordError> {
        if !self.status.can_transition(to) {
            return Err(RecordError::MedicationTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Lab test workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Pending,
    SampleNeeded,
    InProgress,
    Completed,
}

impl TestStatus {
    pub fn can_transition(self, to: TestStatus) -> bool {
        matches!(
            (self, to),
            (
                TestStatus::Pending | TestStatus::SampleNeeded,
                TestStatus::InProgress
            ) | (TestStatus::Pending, TestStatus::SampleNeeded)
                | (TestStatus::InProgress, TestStatus::Completed)
        )
    }
}

/// An ordered lab test for one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabTest {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub name: String,
    pub ordered_at: DateTime<Utc>,
    pub status: TestStatus,
}

impl LabTest {
    pub fn set_status(&mut self, to: TestStatus) -> Result<(), RecordError> {
        if !self.status.can_transition(to) {
            return Err(RecordError::TestTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Ward event log categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WardEventKind {
    Admission,
    Observation,
    MedicationGiven,
    TestResult,
    Transfer,
}

/// Append-only ward event log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardEvent {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub kind: WardEventKind,
    pub description: String,
    pub at: DateTime<Utc>,
}

impl WardEvent {
    pub fn new(patient_id: Uuid, kind: WardEventKind, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            kind,
            description: description.into(),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(status: MedicationStatus) -> Medication {
        Medication {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            name: "Amoxicillin".into(),
            dose: "500 mg".into(),
            route: "PO".into(),
            scheduled_at: Utc::now(),
            status,
        }
    }

    #[test]
    fn medication_due_resolves_once() {
        let mut m = med(MedicationStatus::Due);
        m.set_status(MedicationStatus::Completed).unwrap();
        assert!(m.set_status(MedicationStatus::Missed).is_err());
    }

    #[test]
    fn medication_cannot_reopen() {
        let mut m = med(MedicationStatus::Missed);
        assert!(matches!(
            m.set_status(MedicationStatus::Due),
            Err(RecordError::MedicationTransition { .. })
        ));
    }

    #[test]
    fn test_workflow_runs_forward_only() {
        let mut t = LabTest {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            name: "CBC".into(),
            ordered_at: Utc::now(),
            status: TestStatus::Pending,
        };
        t.set_status(TestStatus::SampleNeeded).unwrap();
        t.set_status(TestStatus::InProgress).unwrap();
        assert!(t.set_status(TestStatus::Pending).is_err());
        t.set_status(TestStatus::Completed).unwrap();
        assert!(t.set_status(TestStatus::InProgress).is_err());
    }
}
