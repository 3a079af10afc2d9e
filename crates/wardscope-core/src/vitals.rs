//! Vital-sign snapshot
//!
//! The snapshot is the single shared value between the simulator (one
//! writer) and the trace renderers / readout display (many readers). It is
//! always replaced wholesale, never mutated field by field, so a reader
//! observes either the previous or the next complete set of values.

use serde::{Deserialize, Serialize};

/// One complete set of vital-sign values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    /// Heart rate in beats per minute
    pub heart_rate: f64,
    /// Peripheral oxygen saturation in percent, held within [90, 100]
    pub spo2: f64,
    /// Respiratory rate in breaths per minute
    pub respiratory_rate: f64,
    /// Systolic blood pressure in mmHg
    pub systolic: f64,
    /// Diastolic blood pressure in mmHg
    pub diastolic: f64,
    /// Mean arterial pressure in mmHg, derived from systolic/diastolic
    pub mean_arterial_pressure: f64,
    /// End-tidal CO2 in mmHg
    pub end_tidal_co2: f64,
    /// Core temperature in degrees Celsius
    pub temperature: f64,
}

impl VitalsSnapshot {
    /// Mean arterial pressure estimate: diastolic plus a third of the pulse
    /// pressure.
    pub fn derived_map(systolic: f64, diastolic: f64) -> f64 {
        diastolic + (systolic - diastolic) / 3.0
    }

    /// Recompute the derived mean arterial pressure from the current
    /// pressures.
    pub fn with_derived_map(mut self) -> Self {
        self.mean_arterial_pressure = Self::derived_map(self.systolic, self.diastolic);
        self
    }
}

impl Default for VitalsSnapshot {
    /// Admission baseline for a stable adult patient.
    fn default() -> Self {
        Self {
            heart_rate: 78.0,
            spo2: 97.0,
            respiratory_rate: 16.0,
            systolic: 120.0,
            diastolic: 80.0,
            mean_arterial_pressure: Self::derived_map(120.0, 80.0),
            end_tidal_co2: 38.0,
            temperature: 36.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_is_between_pressures() {
        let map = VitalsSnapshot::derived_map(120.0, 80.0);
        assert!(map > 80.0 && map < 120.0);
        assert!((map - 93.333).abs() < 0.01);
    }

    #[test]
    fn default_baseline_is_consistent() {
        let v = VitalsSnapshot::default();
        assert_eq!(
            v.mean_arterial_pressure,
            VitalsSnapshot::derived_map(v.systolic, v.diastolic)
        );
        assert!(v.spo2 >= 90.0 && v.spo2 <= 100.0);
    }
}
