//! Synthetic waveform generation
//!
//! Pure amplitude functions, one per monitor channel, mapping simulated time
//! and the current vitals snapshot to an instantaneous signal value. All
//! functions are deterministic: the same `(t, vitals)` always yields the same
//! amplitude. Visual texture (baseline wander, pleth noise) comes from sums
//! of incommensurate sines of `t`, never from an RNG — randomness lives in
//! the simulator only.
//!
//! Phase is computed against the driving rate (heart rate for the cardiac,
//! pleth, and arterial channels; respiratory rate for capnography). Rates at
//! or below zero are clamped to [`MIN_RATE_BPM`] so phase math can never
//! divide by zero or go non-finite.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::vitals::VitalsSnapshot;

/// Floor applied to the driving rate before phase computation.
pub const MIN_RATE_BPM: f64 = 1.0;

/// The four monitor channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// ECG-like cardiac electrical trace
    Cardiac,
    /// Plethysmographic (pulse oximetry) trace
    Pleth,
    /// Arterial blood pressure trace
    Arterial,
    /// Capnographic (end-tidal CO2) trace
    Capno,
}

impl TraceKind {
    /// All channels in display order (top to bottom on the panel).
    pub fn all() -> [TraceKind; 4] {
        [
            TraceKind::Cardiac,
            TraceKind::Pleth,
            TraceKind::Arterial,
            TraceKind::Capno,
        ]
    }

    /// Display label used on the monitor panel.
    pub fn label(&self) -> &'static str {
        match self {
            TraceKind::Cardiac => "ECG II",
            TraceKind::Pleth => "Pleth",
            TraceKind::Arterial => "ABP",
            TraceKind::Capno => "EtCO2",
        }
    }

    /// The vitals field that drives this channel's phase.
    pub fn driving_rate(&self, vitals: &VitalsSnapshot) -> f64 {
        match self {
            TraceKind::Capno => vitals.respiratory_rate,
            _ => vitals.heart_rate,
        }
    }

    /// Instantaneous amplitude at simulated time `t` with default tuning.
    pub fn sample(&self, t: f64, vitals: &VitalsSnapshot) -> f64 {
        self.sample_with(t, vitals, &Tuning::default())
    }

    /// Instantaneous amplitude at simulated time `t`.
    pub fn sample_with(&self, t: f64, vitals: &VitalsSnapshot, tuning: &Tuning) -> f64 {
        match self {
            TraceKind::Cardiac => cardiac(t, vitals, tuning),
            TraceKind::Pleth => pleth(t, vitals, tuning),
            TraceKind::Arterial => arterial_shape(cycle_fraction(t, vitals.heart_rate)),
            TraceKind::Capno => capno_shape(
                cycle_fraction(t, vitals.respiratory_rate),
                vitals.end_tidal_co2,
            ),
        }
    }
}

/// Amplitudes of the non-periodic texture terms.
///
/// Tests that assert exact cycle periodicity zero these out with
/// [`Tuning::NONE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Slow sinusoidal baseline wander added to the cardiac trace
    pub baseline_wander: f64,
    /// High-frequency ripple added to the pleth trace
    pub pleth_noise: f64,
}

impl Tuning {
    /// No texture terms; the signal is exactly cycle-periodic.
    pub const NONE: Tuning = Tuning {
        baseline_wander: 0.0,
        pleth_noise: 0.0,
    };
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            baseline_wander: 0.04,
            pleth_noise: 0.015,
        }
    }
}

fn clamped_rate(rate_bpm: f64) -> f64 {
    if rate_bpm.is_finite() {
        rate_bpm.max(MIN_RATE_BPM)
    } else {
        MIN_RATE_BPM
    }
}

/// Cardiac phase in radians, normalized to [0, 2π).
pub fn cardiac_phase(t: f64, heart_rate: f64) -> f64 {
    (t * clamped_rate(heart_rate) / 60.0 * TAU).rem_euclid(TAU)
}

/// Position within one cycle of `rate_bpm`, normalized to [0, 1).
pub fn cycle_fraction(t: f64, rate_bpm: f64) -> f64 {
    (t * clamped_rate(rate_bpm) / 60.0).rem_euclid(1.0)
}

fn cardiac(t: f64, vitals: &VitalsSnapshot, tuning: &Tuning) -> f64 {
    let wander = tuning.baseline_wander * (TAU * 0.21 * t).sin();
    cardiac_shape(cardiac_phase(t, vitals.heart_rate)) + wander
}

/// PQRST morphology over one cardiac cycle.
///
/// Piecewise half-sine segments over phase sub-ranges: a low-amplitude
/// atrial (P) deflection early in the cycle, the ventricular complex (Q
/// pre-deflection, R spike, S overshoot), and a broader repolarization (T)
/// deflection. Segment edges land on sine zeros so the trace stays
/// continuous across breakpoints. Unitless; mapped to pixels by the
/// renderer.
pub fn cardiac_shape(phi: f64) -> f64 {
    const P_END: f64 = 0.50;
    const Q_START: f64 = 0.90;
    const R_START: f64 = 1.00;
    const S_START: f64 = 1.12;
    const S_END: f64 = 1.24;
    const T_START: f64 = 1.90;
    const T_END: f64 = 2.60;

    if phi < P_END {
        0.12 * (phi / P_END * PI).sin()
    } else if phi < Q_START {
        0.0
    } else if phi < R_START {
        -0.18 * ((phi - Q_START) / (R_START - Q_START) * PI).sin()
    } else if phi < S_START {
        1.45 * ((phi - R_START) / (S_START - R_START) * PI).sin()
    } else if phi < S_END {
        -0.38 * ((phi - S_START) / (S_END - S_START) * PI).sin()
    } else if phi < T_START {
        0.0
    } else if phi < T_END {
        0.32 * ((phi - T_START) / (T_END - T_START) * PI).sin()
    } else {
        0.0
    }
}

fn pleth(t: f64, vitals: &VitalsSnapshot, tuning: &Tuning) -> f64 {
    let phi = cardiac_phase(t, vitals.heart_rate);
    // Single perfusion lobe during the first half of the cycle.
    let lobe = if phi < PI { phi.sin() } else { 0.0 };
    lobe + tuning.pleth_noise * ((17.3 * t).sin() + 0.5 * (31.7 * t).sin())
}

/// Arterial pressure morphology over one cardiac cycle.
///
/// Four segments: systolic upstroke, early systolic decline, dicrotic notch
/// (dip and rebound from aortic valve closure), diastolic runoff. Output is
/// in a pressure-like unit band of roughly 58-100; the numeric readout, not
/// this shape, carries the patient's actual pressures.
pub fn arterial_shape(u: f64) -> f64 {
    const UPSTROKE_END: f64 = 0.12;
    const DECLINE_END: f64 = 0.34;
    const NOTCH_END: f64 = 0.42;
    const REBOUND_END: f64 = 0.50;
    const DIASTOLIC: f64 = 58.0;
    const SYSTOLIC_PEAK: f64 = 100.0;
    const SHOULDER: f64 = 78.0;

    if u < UPSTROKE_END {
        let w = u / UPSTROKE_END;
        DIASTOLIC + (SYSTOLIC_PEAK - DIASTOLIC) * (w * PI / 2.0).sin()
    } else if u < DECLINE_END {
        let w = (u - UPSTROKE_END) / (DECLINE_END - UPSTROKE_END);
        SYSTOLIC_PEAK - (SYSTOLIC_PEAK - SHOULDER) * w
    } else if u < NOTCH_END {
        let w = (u - DECLINE_END) / (NOTCH_END - DECLINE_END);
        SHOULDER - 7.0 * (w * PI).sin()
    } else if u < REBOUND_END {
        let w = (u - NOTCH_END) / (REBOUND_END - NOTCH_END);
        SHOULDER + 3.5 * (w * PI).sin()
    } else {
        let w = (u - REBOUND_END) / (1.0 - REBOUND_END);
        DIASTOLIC + (SHOULDER - DIASTOLIC) * (1.0 - w) * (1.0 - w)
    }
}

/// Capnogram morphology over one respiratory cycle.
///
/// The cycle position is a fraction of the breath in [0, 1), not radians.
/// Trapezoid: expiratory upstroke, alveolar plateau at the current end-tidal
/// CO2 value, inspiratory downstroke, then baseline for the rest of the
/// breath. Output in mmHg.
pub fn capno_shape(u: f64, end_tidal_co2: f64) -> f64 {
    const RISE_END: f64 = 0.15;
    const PLATEAU_END: f64 = 0.75;
    const FALL_END: f64 = 0.90;

    let plateau = end_tidal_co2.max(0.0);
    if u < RISE_END {
        plateau * (u / RISE_END * PI / 2.0).sin()
    } else if u < PLATEAU_END {
        plateau
    } else if u < FALL_END {
        plateau * ((u - PLATEAU_END) / (FALL_END - PLATEAU_END) * PI / 2.0).cos()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals() -> VitalsSnapshot {
        VitalsSnapshot::default()
    }

    #[test]
    fn cardiac_shape_is_continuous_at_breakpoints() {
        for bp in [0.50, 0.90, 1.00, 1.12, 1.24, 1.90, 2.60] {
            let before = cardiac_shape(bp - 1e-9);
            let after = cardiac_shape(bp + 1e-9);
            assert!(
                (before - after).abs() < 1e-6,
                "discontinuity at phase {bp}: {before} vs {after}"
            );
        }
    }

    #[test]
    fn arterial_shape_stays_in_pressure_band() {
        for i in 0..1000 {
            let u = i as f64 / 1000.0;
            let a = arterial_shape(u);
            assert!(
                (40.0..=105.0).contains(&a),
                "arterial amplitude {a} out of band at u={u}"
            );
        }
    }

    #[test]
    fn arterial_shape_wraps_continuously() {
        let end = arterial_shape(1.0 - 1e-9);
        let start = arterial_shape(0.0);
        assert!((end - start).abs() < 1e-3);
    }

    #[test]
    fn capno_plateau_tracks_etco2() {
        assert_eq!(capno_shape(0.5, 38.0), 38.0);
        assert_eq!(capno_shape(0.5, 44.5), 44.5);
        assert_eq!(capno_shape(0.95, 38.0), 0.0);
    }

    #[test]
    fn capno_negative_etco2_floors_at_zero() {
        assert_eq!(capno_shape(0.5, -10.0), 0.0);
    }

    #[test]
    fn phase_handles_degenerate_rates() {
        for rate in [0.0, -5.0, f64::NAN, f64::NEG_INFINITY] {
            let phi = cardiac_phase(1.0, rate);
            assert!(phi.is_finite());
            assert!((0.0..TAU).contains(&phi));
        }
    }

    #[test]
    fn pleth_second_half_is_flat_without_noise() {
        let v = vitals();
        // hr=78 -> cycle 60/78 s; 0.6 of the way through is past the lobe
        let t = 60.0 / 78.0 * 0.6;
        assert_eq!(TraceKind::Pleth.sample_with(t, &v, &Tuning::NONE), 0.0);
    }

    #[test]
    fn driving_rate_selects_respiration_for_capno() {
        let v = vitals();
        assert_eq!(TraceKind::Capno.driving_rate(&v), v.respiratory_rate);
        assert_eq!(TraceKind::Cardiac.driving_rate(&v), v.heart_rate);
    }
}
