use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::watch;
use wardscope_core::monitor::MonitorPanel;
use wardscope_core::trace::{ManualScheduler, TokioScheduler, TraceChannel};
use wardscope_core::vitals::VitalsSnapshot;
use wardscope_core::waveform::TraceKind;

#[test]
fn start_registers_one_loop_per_channel() {
    let scheduler = ManualScheduler::new();
    let (_tx, rx) = watch::channel(VitalsSnapshot::default());
    let mut panel = MonitorPanel::with_defaults();
    panel.start_with_vitals(rx, &scheduler);
    assert_eq!(scheduler.active_count(), 4);
    panel.stop();
    assert_eq!(scheduler.active_count(), 0);
}

#[test]
fn rate_change_restarts_without_duplicating_loops() {
    let scheduler = ManualScheduler::new();
    let (tx, rx) = watch::channel(VitalsSnapshot::default());
    let mut panel = MonitorPanel::with_defaults();
    panel.start_with_vitals(rx, &scheduler);
    assert_eq!(scheduler.total_registered(), 4);

    // Heart rate changes: the three heart-rate-driven channels restart,
    // capno (respiration-driven) keeps its loop.
    tx.send_replace(VitalsSnapshot {
        heart_rate: 92.0,
        ..VitalsSnapshot::default()
    });
    panel.sync_loops(&scheduler);
    assert_eq!(scheduler.active_count(), 4, "duplicate loops after restart");
    assert_eq!(scheduler.total_registered(), 7);

    // Respiratory rate changes: only capno restarts.
    tx.send_replace(VitalsSnapshot {
        heart_rate: 92.0,
        respiratory_rate: 22.0,
        ..VitalsSnapshot::default()
    });
    panel.sync_loops(&scheduler);
    assert_eq!(scheduler.active_count(), 4);
    assert_eq!(scheduler.total_registered(), 8);

    // Nothing changed: no restarts at all.
    panel.sync_loops(&scheduler);
    assert_eq!(scheduler.total_registered(), 8);
}

#[test]
fn frames_paint_every_channel_surface() {
    let scheduler = ManualScheduler::new();
    let (_tx, rx) = watch::channel(VitalsSnapshot::default());
    let mut panel = MonitorPanel::with_defaults();
    panel.start_with_vitals(rx, &scheduler);

    for _ in 0..30 {
        scheduler.step(0.016);
    }

    for (kind, surface) in panel.surfaces() {
        let trace_color = TraceChannel::for_kind(kind).trace_color;
        let surf = surface.lock().unwrap();
        assert!(
            surf.count_pixels(trace_color) > 0,
            "{kind:?} surface never painted"
        );
    }
    panel.stop();
}

#[test]
fn readouts_reflect_the_latest_snapshot() {
    let scheduler = ManualScheduler::new();
    let (tx, rx) = watch::channel(VitalsSnapshot::default());
    let mut panel = MonitorPanel::with_defaults();
    panel.start_with_vitals(rx, &scheduler);

    let r = panel.readouts().expect("panel running");
    assert_eq!(r.heart_rate, "78");
    assert_eq!(r.pressure, "120/80 (93)");

    tx.send_replace(VitalsSnapshot {
        heart_rate: 101.0,
        ..VitalsSnapshot::default()
    });
    assert_eq!(panel.readouts().unwrap().heart_rate, "101");
    panel.stop();
    assert!(panel.readouts().is_none());
}

#[test]
fn sync_before_start_is_a_noop() {
    let scheduler = ManualScheduler::new();
    let mut panel = MonitorPanel::with_defaults();
    panel.sync_loops(&scheduler);
    assert_eq!(scheduler.total_registered(), 0);
}

#[tokio::test]
async fn full_panel_runs_on_the_tokio_scheduler() {
    let scheduler = TokioScheduler::new(Duration::from_millis(2));
    let mut panel = MonitorPanel::with_defaults();
    panel.start(&scheduler);

    tokio::time::sleep(Duration::from_millis(60)).await;

    assert!(panel.readouts().is_some());
    let ecg = panel.surface(TraceKind::Cardiac).expect("cardiac surface");
    let painted = {
        let surf = ecg.lock().unwrap();
        surf.count_pixels(TraceChannel::for_kind(TraceKind::Cardiac).trace_color)
    };
    assert!(painted > 0, "tokio-driven loop never painted");
    panel.stop();
}
