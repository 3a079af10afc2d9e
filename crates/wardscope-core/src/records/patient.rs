//! Patient records and the ward roster

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RecordError;
use crate::records::alert::Alert;
use crate::vitals::VitalsSnapshot;

/// One point in a patient's historical vitals series. Trend charting itself
/// is delegated to a charting layer; this is only the data contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub at: DateTime<Utc>,
    pub heart_rate: f64,
    pub spo2: f64,
    pub systolic: f64,
    pub diastolic: f64,
    pub temperature: f64,
}

impl TrendPoint {
    pub fn from_snapshot(at: DateTime<Utc>, v: &VitalsSnapshot) -> Self {
        Self {
            at,
            heart_rate: v.heart_rate,
            spo2: v.spo2,
            systolic: v.systolic,
            diastolic: v.diastolic,
            temperature: v.temperature,
        }
    }
}

/// A ward patient as the dashboard sees them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub age: u8,
    /// Bed label, e.g. "W2-07"
    pub bed: String,
    /// Current vitals baseline used when opening this patient's monitor
    pub vitals: VitalsSnapshot,
    pub alerts: Vec<Alert>,
    pub trend: Vec<TrendPoint>,
    pub medication_due: bool,
    pub test_pending: bool,
}

impl Patient {
    pub fn new(name: impl Into<String>, age: u8, bed: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            bed: bed.into(),
            vitals: VitalsSnapshot::default(),
            alerts: Vec::new(),
            trend: Vec::new(),
            medication_due: false,
            test_pending: false,
        }
    }

    /// Whether any alert on this patient is still open.
    pub fn has_open_alerts(&self) -> bool {
        self.alerts.iter().any(|a| !a.acknowledged)
    }
}

/// In-memory patient store for one ward.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WardRoster {
    patients: Vec<Patient>,
}

impl WardRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, patient: Patient) {
        self.patients.push(patient);
    }

    pub fn get(&self, id: Uuid) -> Result<&Patient, RecordError> {
        self.patients
            .iter()
            .find(|p| p.id == id)
            .ok_or(RecordError::UnknownPatient(id))
    }

    pub fn get_mut(&mut self, id: Uuid) -> Result<&mut Patient, RecordError> {
        self.patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RecordError::UnknownPatient(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Patients with at least one unacknowledged alert.
    pub fn with_open_alerts(&self) -> Vec<&Patient> {
        self.patients.iter().filter(|p| p.has_open_alerts()).collect()
    }

    /// Patients flagged as having a medication due.
    pub fn medication_due(&self) -> Vec<&Patient> {
        self.patients.iter().filter(|p| p.medication_due).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::alert::Severity;

    #[test]
    fn roster_lookup_by_id() {
        let mut roster = WardRoster::new();
        let p = Patient::new("Test Patient", 60, "W1-01");
        let id = p.id;
        roster.admit(p);
        assert_eq!(roster.get(id).unwrap().bed, "W1-01");
        assert!(matches!(
            roster.get(Uuid::new_v4()),
            Err(RecordError::UnknownPatient(_))
        ));
    }

    #[test]
    fn open_alert_filter() {
        let mut roster = WardRoster::new();
        let mut p = Patient::new("A", 40, "W1-02");
        p.alerts
            .push(Alert::new(p.id, "RR above 24", Severity::Moderate));
        roster.admit(p);
        roster.admit(Patient::new("B", 50, "W1-03"));
        assert_eq!(roster.with_open_alerts().len(), 1);
    }
}
