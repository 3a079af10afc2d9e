//! # WardScope Core Library
//!
//! Core functionality for the WardScope bedside monitoring dashboard.
//!
//! This library provides:
//! - Synthetic vital-sign waveform generation (ECG, pleth, arterial, capno)
//! - A periodic vitals simulator with whole-snapshot replacement semantics
//! - A scrolling strip-chart trace renderer over a pluggable draw surface
//! - Monitor panel orchestration (per-channel frame loops with explicit
//!   cancellation)
//! - Ward record contracts (patients, alerts, medication/test workflows)
//!
//! All data is synthetic. There is no device integration and no persistence;
//! the simulation resets every time a monitor panel is started.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wardscope_core::monitor::MonitorPanel;
//! use wardscope_core::trace::TokioScheduler;
//!
//! let mut panel = MonitorPanel::with_defaults();
//! panel.start(&TokioScheduler::default());
//! // ... read panel.readouts() / panel.surfaces() from the UI layer ...
//! panel.stop();
//! ```

pub mod error;
pub mod monitor;
pub mod records;
pub mod simulator;
pub mod trace;
pub mod vitals;
pub mod waveform;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{RecordError, TraceError};
    pub use crate::monitor::{MonitorLayout, MonitorPanel, Readouts};
    pub use crate::records::{Alert, AlertBoard, LabTest, Medication, Patient, Severity};
    pub use crate::simulator::{SimulatorConfig, SimulatorHandle, VitalsSimulator};
    pub use crate::trace::{
        DrawSurface, FrameScheduler, ManualScheduler, PixelSurface, TokioScheduler, TraceChannel,
        TraceRenderer,
    };
    pub use crate::vitals::VitalsSnapshot;
    pub use crate::waveform::TraceKind;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
