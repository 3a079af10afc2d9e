//! Headless WardScope demo
//!
//! Picks a patient from the mock ward, runs their bedside monitor for a few
//! seconds on the tokio runtime, logs the numeric readouts once per second,
//! and writes each trace surface out as a PPM image on shutdown.
//!
//! Usage: `wardscope [seconds]` (default 10). Set `RUST_LOG` to control
//! verbosity, e.g. `RUST_LOG=wardscope_core=debug`.

use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wardscope_core::monitor::MonitorPanel;
use wardscope_core::records::mock::mock_roster;
use wardscope_core::trace::TokioScheduler;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let seconds: u64 = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()
        .context("run duration must be a whole number of seconds")?
        .unwrap_or(10);

    let roster = mock_roster(2024);
    let patient = roster.iter().next().context("mock ward is empty")?;
    info!(
        patient = %patient.name,
        bed = %patient.bed,
        open_alerts = patient.alerts.len(),
        "opening bedside monitor"
    );

    let mut panel = MonitorPanel::new(Default::default(), patient.vitals);
    let scheduler = TokioScheduler::default();
    panel.start(&scheduler);

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;
    for _ in 0..seconds {
        ticker.tick().await;
        panel.sync_loops(&scheduler);
        if let Some(r) = panel.readouts() {
            info!(
                hr = %r.heart_rate,
                spo2 = %r.spo2,
                bp = %r.pressure,
                rr = %r.respiratory_rate,
                etco2 = %r.end_tidal_co2,
                temp = %r.temperature,
                "vitals"
            );
        }
    }

    for (kind, surface) in panel.surfaces() {
        let path = format!("trace-{}.ppm", format!("{kind:?}").to_lowercase());
        let surf = surface
            .lock()
            .map_err(|_| anyhow::anyhow!("trace surface lock poisoned"))?;
        let file = File::create(&path).with_context(|| format!("creating {path}"))?;
        surf.write_ppm(&mut BufWriter::new(file))
            .with_context(|| format!("writing {path}"))?;
        info!(%path, "trace image written");
    }

    panel.stop();
    Ok(())
}
