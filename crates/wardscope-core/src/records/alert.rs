//! Patient alerts
//!
//! Alerts are raised against a patient with a severity level and are
//! acknowledged exactly once by a nurse; acknowledgment is a one-way
//! transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RecordError;

/// Alert severity, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Moderate,
    Warning,
    Stable,
}

impl Severity {
    /// Sort key; lower is more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Moderate => 1,
            Severity::Warning => 2,
            Severity::Stable => 3,
        }
    }
}

/// A single alert raised for a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// What tripped the alert, e.g. "SpO2 below 92%"
    pub trigger: String,
    pub severity: Severity,
    pub acknowledged: bool,
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(patient_id: Uuid, trigger: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            trigger: trigger.into(),
            severity,
            acknowledged: false,
            raised_at: Utc::now(),
        }
    }

    /// One-way acknowledgment. A second acknowledgment is an error so the
    /// UI can tell the nurse someone already took it.
    pub fn acknowledge(&mut self) -> Result<(), RecordError> {
        if self.acknowledged {
            return Err(RecordError::AlreadyAcknowledged);
        }
        self.acknowledged = true;
        Ok(())
    }
}

/// Live alert view: holds the ward's alerts and serves the filtered
/// orderings the alert screen shows.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
}

impl AlertBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    pub fn all(&self) -> &[Alert] {
        &self.alerts
    }

    /// Alerts not yet acknowledged, most urgent and newest first.
    pub fn unacknowledged(&self) -> Vec<&Alert> {
        let mut open: Vec<&Alert> = self.alerts.iter().filter(|a| !a.acknowledged).collect();
        open.sort_by(|a, b| {
            a.severity
                .rank()
                .cmp(&b.severity.rank())
                .then(b.raised_at.cmp(&a.raised_at))
        });
        open
    }

    /// Alerts at one severity level.
    pub fn by_severity(&self, severity: Severity) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|a| a.severity == severity)
            .collect()
    }

    /// Acknowledge an alert by id.
    pub fn acknowledge(&mut self, id: Uuid) -> Result<(), RecordError> {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => alert.acknowledge(),
            None => Err(RecordError::UnknownAlert(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledge_is_one_way() {
        let mut alert = Alert::new(Uuid::new_v4(), "HR above 140", Severity::Critical);
        assert!(!alert.acknowledged);
        alert.acknowledge().unwrap();
        assert!(alert.acknowledged);
        assert!(matches!(
            alert.acknowledge(),
            Err(RecordError::AlreadyAcknowledged)
        ));
    }

    #[test]
    fn unacknowledged_orders_by_severity() {
        let pid = Uuid::new_v4();
        let mut board = AlertBoard::new();
        board.push(Alert::new(pid, "temp trending up", Severity::Warning));
        board.push(Alert::new(pid, "SpO2 below 92%", Severity::Critical));
        let mut acked = Alert::new(pid, "BP elevated", Severity::Moderate);
        acked.acknowledge().unwrap();
        board.push(acked);

        let open = board.unacknowledged();
        assert_eq!(open.len(), 2);
        assert_eq!(open[0].severity, Severity::Critical);
        assert_eq!(open[1].severity, Severity::Warning);
    }

    #[test]
    fn board_acknowledge_by_id() {
        let mut board = AlertBoard::new();
        let alert = Alert::new(Uuid::new_v4(), "test pending overdue", Severity::Stable);
        let id = alert.id;
        board.push(alert);
        board.acknowledge(id).unwrap();
        assert!(board.unacknowledged().is_empty());
    }
}
