//! Vitals simulator
//!
//! Owns the current [`VitalsSnapshot`] and advances it on a fixed cadence by
//! adding a bounded uniform perturbation to each field. The snapshot is
//! published through a `tokio::sync::watch` channel, so every tick replaces
//! the value wholesale and readers can never observe a half-updated mix of
//! old and new fields.
//!
//! There is exactly one writer (the tick loop) and any number of readers
//! (trace renderers, the readout display).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::vitals::VitalsSnapshot;

/// Uniform perturbation bounds for one field, applied per tick as
/// `next = prev + uniform(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub min: f64,
    pub max: f64,
}

impl Delta {
    /// Symmetric bounds `(-half_width, +half_width)`.
    pub fn symmetric(half_width: f64) -> Self {
        Self {
            min: -half_width,
            max: half_width,
        }
    }

    fn sample(&self, rng: &mut impl Rng) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Simulator cadence, per-field perturbation bounds, and clamping policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Tick period in milliseconds
    pub tick_period_ms: u64,
    pub heart_rate: Delta,
    pub spo2: Delta,
    pub respiratory_rate: Delta,
    pub systolic: Delta,
    pub diastolic: Delta,
    pub end_tidal_co2: Delta,
    pub temperature: Delta,
    /// Clamp every field to a physiological range, not just SpO2.
    ///
    /// The reference monitor only bounds SpO2 and lets the other fields
    /// drift; that behavior is kept as the default. Enable this to bound
    /// long sessions.
    pub clamp_all: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 2000,
            heart_rate: Delta::symmetric(1.0),
            spo2: Delta::symmetric(0.25),
            respiratory_rate: Delta::symmetric(0.5),
            systolic: Delta::symmetric(1.5),
            diastolic: Delta::symmetric(1.0),
            end_tidal_co2: Delta::symmetric(0.8),
            temperature: Delta::symmetric(0.05),
            clamp_all: false,
        }
    }
}

/// SpO2 bounds, always enforced.
pub const SPO2_RANGE: (f64, f64) = (90.0, 100.0);

/// One simulation step. Pure given the RNG: perturbs every field, clamps
/// SpO2 to [`SPO2_RANGE`] (and the rest if `clamp_all` is set), and
/// recomputes the derived mean arterial pressure.
pub fn step(
    prev: &VitalsSnapshot,
    config: &SimulatorConfig,
    rng: &mut impl Rng,
) -> VitalsSnapshot {
    let mut next = VitalsSnapshot {
        heart_rate: prev.heart_rate + config.heart_rate.sample(rng),
        spo2: prev.spo2 + config.spo2.sample(rng),
        respiratory_rate: prev.respiratory_rate + config.respiratory_rate.sample(rng),
        systolic: prev.systolic + config.systolic.sample(rng),
        diastolic: prev.diastolic + config.diastolic.sample(rng),
        mean_arterial_pressure: prev.mean_arterial_pressure,
        end_tidal_co2: prev.end_tidal_co2 + config.end_tidal_co2.sample(rng),
        temperature: prev.temperature + config.temperature.sample(rng),
    };

    next.spo2 = next.spo2.clamp(SPO2_RANGE.0, SPO2_RANGE.1);

    if config.clamp_all {
        next.heart_rate = next.heart_rate.clamp(20.0, 220.0);
        next.respiratory_rate = next.respiratory_rate.clamp(4.0, 60.0);
        next.systolic = next.systolic.clamp(60.0, 250.0);
        next.diastolic = next.diastolic.clamp(30.0, 150.0);
        next.end_tidal_co2 = next.end_tidal_co2.clamp(10.0, 80.0);
        next.temperature = next.temperature.clamp(32.0, 43.0);
    }

    next.with_derived_map()
}

/// The simulator: seeded RNG plus the watch channel the snapshot is
/// published on.
pub struct VitalsSimulator {
    config: SimulatorConfig,
    rng: StdRng,
    tx: watch::Sender<VitalsSnapshot>,
}

impl VitalsSimulator {
    /// Create a simulator starting from `baseline`, seeded from entropy.
    pub fn new(baseline: VitalsSnapshot, config: SimulatorConfig) -> Self {
        Self::with_rng(baseline, config, StdRng::from_entropy())
    }

    /// Create a simulator with a fixed seed, for reproducible runs.
    pub fn with_seed(baseline: VitalsSnapshot, config: SimulatorConfig, seed: u64) -> Self {
        Self::with_rng(baseline, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(baseline: VitalsSnapshot, config: SimulatorConfig, rng: StdRng) -> Self {
        let (tx, _) = watch::channel(baseline.with_derived_map());
        Self { config, rng, tx }
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<VitalsSnapshot> {
        self.tx.subscribe()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> VitalsSnapshot {
        *self.tx.borrow()
    }

    /// Advance one tick and publish the replacement snapshot.
    pub fn tick(&mut self) -> VitalsSnapshot {
        let next = step(&self.latest(), &self.config, &mut self.rng);
        self.tx.send_replace(next);
        trace!(
            heart_rate = next.heart_rate,
            spo2 = next.spo2,
            "vitals tick"
        );
        next
    }

    /// Run the tick loop on the tokio runtime at the configured cadence.
    ///
    /// The loop runs until the returned handle is stopped or dropped.
    pub fn spawn(mut self) -> SimulatorHandle {
        let rx = self.subscribe();
        let period = Duration::from_millis(self.config.tick_period_ms.max(1));
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first interval tick fires immediately; the baseline is
            // already published, so consume it before perturbing.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.tick();
            }
        });
        SimulatorHandle { task, rx }
    }
}

/// Handle to a running simulator tick loop.
pub struct SimulatorHandle {
    task: JoinHandle<()>,
    rx: watch::Receiver<VitalsSnapshot>,
}

impl SimulatorHandle {
    /// Subscribe to snapshot updates from the running loop.
    pub fn subscribe(&self) -> watch::Receiver<VitalsSnapshot> {
        self.rx.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> VitalsSnapshot {
        *self.rx.borrow()
    }

    /// Stop the tick loop.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
