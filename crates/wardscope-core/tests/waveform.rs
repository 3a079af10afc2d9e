use wardscope_core::vitals::VitalsSnapshot;
use wardscope_core::waveform::{cardiac_phase, TraceKind, Tuning};

fn seeded_vitals() -> VitalsSnapshot {
    VitalsSnapshot {
        heart_rate: 78.0,
        spo2: 96.0,
        respiratory_rate: 16.0,
        ..VitalsSnapshot::default()
    }
}

#[test]
fn sampling_is_deterministic() {
    let v = seeded_vitals();
    for kind in TraceKind::all() {
        for i in 0..200 {
            let t = i as f64 * 0.037;
            assert_eq!(
                kind.sample(t, &v),
                kind.sample(t, &v),
                "{kind:?} not pure at t={t}"
            );
        }
    }
}

#[test]
fn cardiac_and_pleth_repeat_every_cycle() {
    let v = seeded_vitals();
    let period = 60.0 / v.heart_rate;
    for kind in [TraceKind::Cardiac, TraceKind::Pleth] {
        for i in 0..50 {
            let t = i as f64 * 0.111;
            let a = kind.sample_with(t, &v, &Tuning::NONE);
            let b = kind.sample_with(t + period, &v, &Tuning::NONE);
            assert!(
                (a - b).abs() < 1e-6,
                "{kind:?} not periodic at t={t}: {a} vs {b}"
            );
        }
    }
}

#[test]
fn capno_repeats_every_breath() {
    let v = seeded_vitals();
    let period = 60.0 / v.respiratory_rate;
    for i in 0..50 {
        let t = i as f64 * 0.173;
        let a = TraceKind::Capno.sample_with(t, &v, &Tuning::NONE);
        let b = TraceKind::Capno.sample_with(t + period, &v, &Tuning::NONE);
        assert!((a - b).abs() < 1e-6, "capno not periodic at t={t}");
    }
}

#[test]
fn degenerate_rates_never_produce_nan() {
    for hr in [0.0, -5.0, f64::NAN] {
        let v = VitalsSnapshot {
            heart_rate: hr,
            respiratory_rate: hr,
            ..VitalsSnapshot::default()
        };
        for kind in TraceKind::all() {
            for i in 0..100 {
                let t = i as f64 * 0.25;
                let a = kind.sample(t, &v);
                assert!(a.is_finite(), "{kind:?} produced {a} for rate {hr} at t={t}");
            }
        }
    }
}

#[test]
fn scenario_hr78_starts_in_atrial_branch_and_repeats() {
    let v = seeded_vitals();
    // t = 0 -> cardiac phase 0, inside the low-amplitude atrial segment
    assert_eq!(cardiac_phase(0.0, v.heart_rate), 0.0);
    let at_zero = TraceKind::Cardiac.sample_with(0.0, &v, &Tuning::NONE);
    assert!(
        at_zero.abs() <= 0.15,
        "atrial-segment amplitude unexpectedly large: {at_zero}"
    );

    // One full cardiac cycle later the amplitude repeats
    let one_cycle = TraceKind::Cardiac.sample_with(60.0 / 78.0, &v, &Tuning::NONE);
    assert!((at_zero - one_cycle).abs() < 1e-6);

    // Mid-QRS the spike dominates everything else in the cycle
    let r_peak_t = 1.06 / std::f64::consts::TAU * (60.0 / 78.0);
    let r_peak = TraceKind::Cardiac.sample_with(r_peak_t, &v, &Tuning::NONE);
    assert!(r_peak > 1.0, "R spike missing: {r_peak}");
}

#[test]
fn capno_plateau_follows_current_etco2() {
    let mut v = seeded_vitals();
    v.end_tidal_co2 = 42.0;
    // Middle of the breath sits on the alveolar plateau
    let mid_plateau_t = 0.45 * 60.0 / v.respiratory_rate;
    assert_eq!(TraceKind::Capno.sample_with(mid_plateau_t, &v, &Tuning::NONE), 42.0);
}
