//! Ward records
//!
//! Data contracts the dashboard consumes around the monitor core: patients,
//! alerts, and medication/test/event workflows. All of it is in-memory and
//! synthetic; in a deployed system these would come from a record API keyed
//! by patient id.

pub mod alert;
pub mod mock;
pub mod orders;
pub mod patient;

pub use alert::{Alert, AlertBoard, Severity};
pub use orders::{LabTest, Medication, MedicationStatus, TestStatus, WardEvent, WardEventKind};
pub use patient::{Patient, TrendPoint, WardRoster};
