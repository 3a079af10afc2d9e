//! Simulated ward data
//!
//! Hardcoded, entirely fictional patients so the app and integration tests
//! have something to show without a record backend. Stands in for a real
//! clinical data source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::records::alert::{Alert, Severity};
use crate::records::orders::{
    LabTest, Medication, MedicationStatus, TestStatus, WardEvent, WardEventKind,
};
use crate::records::patient::{Patient, WardRoster};
use crate::vitals::VitalsSnapshot;

/// Build a seeded mock roster. The same seed yields the same ward.
pub fn mock_roster(seed: u64) -> WardRoster {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut roster = WardRoster::new();

    let beds = [
        ("Ade Okafor", 67u8, "W2-01"),
        ("Maren Lindqvist", 54, "W2-02"),
        ("Tomas Ruiz", 71, "W2-03"),
        ("Priya Nair", 45, "W2-04"),
        ("Jonas Keller", 59, "W2-05"),
        ("Elif Demir", 63, "W2-06"),
    ];

    for (name, age, bed) in beds {
        let mut p = Patient::new(name, age, bed);
        p.vitals = jittered_baseline(&mut rng);
        p.medication_due = rng.gen_bool(0.4);
        p.test_pending = rng.gen_bool(0.3);

        if p.vitals.spo2 < 93.0 {
            p.alerts.push(Alert::new(
                p.id,
                format!("SpO2 below 93% ({:.0}%)", p.vitals.spo2),
                Severity::Critical,
            ));
        } else if p.vitals.heart_rate > 100.0 {
            p.alerts.push(Alert::new(
                p.id,
                format!("HR above 100 ({:.0} bpm)", p.vitals.heart_rate),
                Severity::Moderate,
            ));
        }

        roster.admit(p);
    }

    roster
}

/// Scheduled medications for a patient, mirroring the roster flags.
pub fn mock_medications(patient: &Patient) -> Vec<Medication> {
    let mut meds = vec![Medication {
        id: uuid::Uuid::new_v4(),
        patient_id: patient.id,
        name: "Lisinopril".into(),
        dose: "10 mg".into(),
        route: "PO".into(),
        scheduled_at: chrono::Utc::now(),
        status: MedicationStatus::Upcoming,
    }];
    if patient.medication_due {
        meds.push(Medication {
            id: uuid::Uuid::new_v4(),
            patient_id: patient.id,
            name: "Amoxicillin".into(),
            dose: "500 mg".into(),
            route: "IV".into(),
            scheduled_at: chrono::Utc::now(),
            status: MedicationStatus::Due,
        });
    }
    meds
}

/// Ordered tests for a patient.
pub fn mock_tests(patient: &Patient) -> Vec<LabTest> {
    if !patient.test_pending {
        return Vec::new();
    }
    vec![LabTest {
        id: uuid::Uuid::new_v4(),
        patient_id: patient.id,
        name: "CBC".into(),
        ordered_at: chrono::Utc::now(),
        status: TestStatus::Pending,
    }]
}

/// Admission event for a patient.
pub fn admission_event(patient: &Patient) -> WardEvent {
    WardEvent::new(
        patient.id,
        WardEventKind::Admission,
        format!("Admitted to bed {}", patient.bed),
    )
}

fn jittered_baseline(rng: &mut StdRng) -> VitalsSnapshot {
    let base = VitalsSnapshot::default();
    VitalsSnapshot {
        heart_rate: base.heart_rate + rng.gen_range(-12.0..30.0),
        spo2: (base.spo2 + rng.gen_range(-6.0..2.0)).clamp(90.0, 100.0),
        respiratory_rate: base.respiratory_rate + rng.gen_range(-3.0..5.0),
        systolic: base.systolic + rng.gen_range(-15.0..25.0),
        diastolic: base.diastolic + rng.gen_range(-10.0..12.0),
        end_tidal_co2: base.end_tidal_co2 + rng.gen_range(-4.0..4.0),
        temperature: base.temperature + rng.gen_range(-0.5..1.4),
        ..base
    }
    .with_derived_map()
}
