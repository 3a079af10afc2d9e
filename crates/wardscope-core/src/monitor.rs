//! Monitor panel
//!
//! Composes the four trace renderers with the vitals simulator: one frame
//! loop per channel, one tick loop for the simulator, numeric readouts
//! derived from the latest snapshot. The panel owns every loop handle and
//! cancels them all on stop, and restarts a channel's loop (with a fresh
//! cursor) whenever the rate that drives its phase has changed since the
//! loop was started.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::TraceError;
use crate::simulator::{SimulatorConfig, SimulatorHandle, VitalsSimulator};
use crate::trace::{
    FrameLoopHandle, FrameScheduler, PixelSurface, TraceChannel, TraceRenderer,
};
use crate::vitals::VitalsSnapshot;
use crate::waveform::TraceKind;

/// Monitor layout: the channel set plus the simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorLayout {
    pub name: String,
    pub channels: Vec<TraceChannel>,
    pub simulator: SimulatorConfig,
}

impl MonitorLayout {
    /// Serialize to JSON for layout storage.
    pub fn to_json(&self) -> Result<String, TraceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a layout previously produced by [`MonitorLayout::to_json`].
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for MonitorLayout {
    /// The standard four-trace bedside layout.
    fn default() -> Self {
        Self {
            name: "Bedside Monitor".to_string(),
            channels: TraceKind::all()
                .into_iter()
                .map(TraceChannel::for_kind)
                .collect(),
            simulator: SimulatorConfig::default(),
        }
    }
}

/// Display strings for the numeric readout column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readouts {
    /// Rounded beats per minute
    pub heart_rate: String,
    /// Rounded saturation with percent sign
    pub spo2: String,
    /// "systolic/diastolic (map)", all rounded
    pub pressure: String,
    /// Rounded breaths per minute
    pub respiratory_rate: String,
    /// Rounded mmHg
    pub end_tidal_co2: String,
    /// Degrees Celsius to one decimal
    pub temperature: String,
}

impl Readouts {
    pub fn from_snapshot(v: &VitalsSnapshot) -> Self {
        Self {
            heart_rate: format!("{:.0}", v.heart_rate),
            spo2: format!("{:.0}%", v.spo2),
            pressure: format!(
                "{:.0}/{:.0} ({:.0})",
                v.systolic, v.diastolic, v.mean_arterial_pressure
            ),
            respiratory_rate: format!("{:.0}", v.respiratory_rate),
            end_tidal_co2: format!("{:.0}", v.end_tidal_co2),
            temperature: format!("{:.1}", v.temperature),
        }
    }
}

struct ChannelSlot {
    channel: TraceChannel,
    surface: Arc<Mutex<PixelSurface>>,
    frame_loop: Option<FrameLoopHandle>,
    /// Driving rate the running loop was started with
    started_rate: f64,
}

/// The monitor panel. Created per patient session; the simulation resets
/// every time a panel is started.
pub struct MonitorPanel {
    layout: MonitorLayout,
    baseline: VitalsSnapshot,
    slots: Vec<ChannelSlot>,
    simulator: Option<SimulatorHandle>,
    vitals_rx: Option<watch::Receiver<VitalsSnapshot>>,
}

impl MonitorPanel {
    pub fn new(layout: MonitorLayout, baseline: VitalsSnapshot) -> Self {
        let slots = layout
            .channels
            .iter()
            .cloned()
            .map(|channel| {
                let surface = Arc::new(Mutex::new(PixelSurface::new(
                    channel.width,
                    channel.height,
                    channel.background,
                )));
                ChannelSlot {
                    channel,
                    surface,
                    frame_loop: None,
                    started_rate: 0.0,
                }
            })
            .collect();
        Self {
            layout,
            baseline,
            slots,
            simulator: None,
            vitals_rx: None,
        }
    }

    /// Standard layout, default baseline.
    pub fn with_defaults() -> Self {
        Self::new(MonitorLayout::default(), VitalsSnapshot::default())
    }

    /// Start the simulator tick loop and one frame loop per channel.
    ///
    /// Requires a tokio runtime (the simulator runs on it). Use
    /// [`MonitorPanel::start_with_vitals`] to drive the panel from an
    /// external vitals source instead.
    pub fn start(&mut self, scheduler: &dyn FrameScheduler) {
        let sim = VitalsSimulator::new(self.baseline, self.layout.simulator.clone()).spawn();
        let rx = sim.subscribe();
        self.simulator = Some(sim);
        self.start_with_vitals(rx, scheduler);
    }

    /// Start the frame loops against an externally supplied vitals feed.
    pub fn start_with_vitals(
        &mut self,
        vitals: watch::Receiver<VitalsSnapshot>,
        scheduler: &dyn FrameScheduler,
    ) {
        info!(layout = %self.layout.name, channels = self.slots.len(), "starting monitor panel");
        self.vitals_rx = Some(vitals);
        for i in 0..self.slots.len() {
            self.restart_slot(i, scheduler);
        }
    }

    /// Restart any channel whose driving rate changed since its loop was
    /// started. Call periodically (e.g. once per simulator tick).
    pub fn sync_loops(&mut self, scheduler: &dyn FrameScheduler) {
        let Some(rx) = self.vitals_rx.clone() else {
            return;
        };
        let vitals = *rx.borrow();
        for i in 0..self.slots.len() {
            let rate = self.slots[i].channel.kind.driving_rate(&vitals);
            if self.slots[i].frame_loop.is_some() && rate != self.slots[i].started_rate {
                debug!(kind = ?self.slots[i].channel.kind, rate, "driving rate changed, restarting trace loop");
                self.restart_slot(i, scheduler);
            }
        }
    }

    /// Cancel every frame loop and the simulator.
    pub fn stop(&mut self) {
        for slot in &mut self.slots {
            if let Some(mut handle) = slot.frame_loop.take() {
                handle.cancel();
            }
        }
        if let Some(sim) = self.simulator.take() {
            sim.stop();
        }
        self.vitals_rx = None;
        info!(layout = %self.layout.name, "monitor panel stopped");
    }

    /// Latest numeric readouts, if the panel is running.
    pub fn readouts(&self) -> Option<Readouts> {
        self.vitals_rx
            .as_ref()
            .map(|rx| Readouts::from_snapshot(&rx.borrow()))
    }

    /// Latest raw snapshot, if the panel is running.
    pub fn latest_vitals(&self) -> Option<VitalsSnapshot> {
        self.vitals_rx.as_ref().map(|rx| *rx.borrow())
    }

    /// The shared draw surface for a channel, for the display layer.
    pub fn surface(&self, kind: TraceKind) -> Option<Arc<Mutex<PixelSurface>>> {
        self.slots
            .iter()
            .find(|s| s.channel.kind == kind)
            .map(|s| s.surface.clone())
    }

    /// All channel surfaces in layout order.
    pub fn surfaces(&self) -> Vec<(TraceKind, Arc<Mutex<PixelSurface>>)> {
        self.slots
            .iter()
            .map(|s| (s.channel.kind, s.surface.clone()))
            .collect()
    }

    /// Cancel the slot's running loop, then start a fresh one (new renderer,
    /// cursor back at zero). Cancel-before-spawn keeps exactly one loop per
    /// surface alive.
    fn restart_slot(&mut self, index: usize, scheduler: &dyn FrameScheduler) {
        let Some(rx) = self.vitals_rx.clone() else {
            return;
        };
        let slot = &mut self.slots[index];
        if let Some(mut old) = slot.frame_loop.take() {
            old.cancel();
        }

        let mut renderer = TraceRenderer::new(slot.channel.clone());
        let surface = slot.surface.clone();
        let loop_rx = rx.clone();
        let handle = scheduler.spawn_loop(Box::new(move |t| {
            let vitals = *loop_rx.borrow();
            if let Ok(mut surf) = surface.lock() {
                renderer.render_frame(t, &vitals, &mut *surf);
            }
        }));

        slot.started_rate = slot.channel.kind.driving_rate(&rx.borrow());
        slot.frame_loop = Some(handle);
    }
}

impl Drop for MonitorPanel {
    fn drop(&mut self) {
        self.stop();
    }
}
