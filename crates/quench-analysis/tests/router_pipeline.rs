use std::f64::consts::PI;

use quench_analysis::presets::standard_pipeline;
use quench_analysis::ObservableRouter;
use quench_core::{AnalysisConfig, Event, Jet, Particle};

fn pion(pt: f64, eta: f64, phi: f64) -> Particle {
    Particle::new(211, 1.0, pt, eta, phi)
}

fn dijet_event() -> Event {
    let lead = Jet::bare(100.0, 0.1, 0.1, 0.0, 5.0)
        .with_constituents(vec![pion(60.0, 0.1, 0.0), pion(40.0, 0.12, 0.05)]);
    let sublead =
        Jet::bare(40.0, 0.2, -0.2, PI, 4.0).with_constituents(vec![pion(40.0, -0.2, PI)]);
    let trigger = pion(25.0, 0.1, 0.0);
    Event::new(vec![lead, sublead], vec![trigger])
}

fn narrow_event() -> Event {
    let a = Jet::bare(90.0, 0.1, 0.1, 0.0, 3.0).with_constituents(vec![pion(70.0, 0.1, 0.0)]);
    let b = Jet::bare(60.0, 0.2, 0.2, 0.3, 3.0).with_constituents(vec![pion(30.0, 0.2, 0.3)]);
    Event::new(vec![a, b], vec![])
}

fn sum(hist: &quench_hist::HistogramSet, name: &str) -> f64 {
    hist.by_name(name)
        .unwrap_or_else(|| panic!("missing accumulator {name}"))
        .sum()
}

#[test]
fn standard_pipeline_routes_every_observable() {
    let settings = standard_pipeline(AnalysisConfig::default());
    let mut router = ObservableRouter::from_settings(&settings).unwrap();

    router.process_event(&dijet_event());
    router.process_event(&Event::default());
    router.process_event(&narrow_event());
    assert_eq!(router.events_processed(), 3);

    let hist = router.finalize();

    // Rapidity-sliced spectra: all four jets sit below |y| = 0.3.
    assert_eq!(sum(&hist, "jet-spectra/JetpT_0_0.3_R0.4"), 4.0);
    assert_eq!(sum(&hist, "jet-spectra/JetpT_0.3_0.8_R0.4"), 0.0);
    assert_eq!(sum(&hist, "jet-spectra/JetpT_0_1.2_R0.4"), 4.0);
    assert_eq!(sum(&hist, "jet-spectra/JetpT_R0.4"), 4.0);

    // Dijet balance: one accepted pair, one rejected pair, one empty event.
    let counter = hist.by_name("dijet-xj/xJ_counter_R0.4").unwrap();
    assert_eq!(counter.bin_content(1), Some(1.0)); // passes
    assert_eq!(counter.bin_content(0), Some(1.0)); // failures
    assert_eq!(counter.entries(), 2); // the empty event never reaches it
    assert_eq!(sum(&hist, "dijet-xj/xJ_90_100_R0.4"), 1.0);
    assert_eq!(sum(&hist, "dijet-xj/JetpT1_R0.4"), 1.0);
    assert_eq!(sum(&hist, "dijet-xj/JetpT2_R0.4"), 0.0); // 40 GeV is below the axis
    assert_eq!(
        hist.by_name("dijet-xj/JetpT2_R0.4").unwrap().underflow(),
        1.0
    );

    // Plane classification with all angles at zero: azimuths 0 and pi are
    // second-order in-plane; pi is third-order out-of-plane.
    assert_eq!(sum(&hist, "inout-plane/InPlaneSpec_N2_R0.4"), 4.0);
    assert_eq!(sum(&hist, "inout-plane/InPlaneSpec_N3_R0.4"), 3.0);
    assert_eq!(sum(&hist, "inout-plane/OutPlaneSpec_N3_R0.4"), 1.0);
    assert_eq!(sum(&hist, "inout-plane/Spec_R0.4"), 4.0);

    // Subjet fragmentation: only the 100 and 90 GeV jets enter the window,
    // with leading z near 1.0 and at 70/90 respectively.
    assert_eq!(sum(&hist, "subjet-frag/z_Custom_r01"), 2.0);
    assert_eq!(sum(&hist, "subjet-frag/z_Custom_r02"), 2.0);
    assert_eq!(sum(&hist, "subjet-frag/z_High_r01"), 2.0);
    assert_eq!(sum(&hist, "subjet-frag/z_HighD_r01"), 0.0);
    let jet_counter = hist.by_name("subjet-frag/Number_Jets").unwrap();
    assert_eq!(jet_counter.bin_content(0), Some(4.0)); // two jets x two radii
    assert_eq!(jet_counter.bin_content(1), Some(0.0));

    // Hadron-jet correlation: one trigger in the overlapping 20-50, 12-50,
    // 1+ and eta-only classes; the away-side jet is the pi-separated one.
    assert_eq!(sum(&hist, "hadron-jet/hNtrig_20_50"), 1.0);
    assert_eq!(sum(&hist, "hadron-jet/hNtrig_12_50"), 1.0);
    assert_eq!(sum(&hist, "hadron-jet/hNtrig_8_9"), 0.0);
    assert_eq!(sum(&hist, "hadron-jet/hNtrig_1"), 1.0);
    assert_eq!(sum(&hist, "hadron-jet/hNtrig_eta"), 1.0);
    assert_eq!(sum(&hist, "hadron-jet/Njet_all_20_50"), 2.0);
    // Away-side count normalized by 1 / (2 * (0.9 - 0.4)) = 1.
    assert_eq!(sum(&hist, "hadron-jet/Njet_20_50"), 1.0);

    // Azimuth distribution: 100 and 90 GeV jets land in the 89-100 bin.
    assert_eq!(sum(&hist, "phi-dist/89_100_phi_R0.4"), 2.0);
    assert_eq!(sum(&hist, "phi-dist/79_89_phi_R0.4"), 0.0);

    // Jet mass: the 100 and 90 GeV jets fill the 80-100 window, the 60 GeV
    // jet sits exactly on the floor of the first window.
    assert_eq!(sum(&hist, "jet-mass/Jet_Mass_80_100"), 2.0);
    assert_eq!(sum(&hist, "jet-mass/Jet_Mass_60_80"), 1.0);
    assert_eq!(sum(&hist, "jet-mass/JetpT_NSub_04"), 4.0);

    // Tagged spectra: jets above 40 GeV with a hard enough constituent.
    assert_eq!(sum(&hist, "tagged-spectra/TrackpT_R0.4"), 3.0);
    assert_eq!(sum(&hist, "tagged-spectra/TrackpT_nolead_R0.4"), 3.0);
}

#[test]
fn empty_events_leave_no_trace() {
    let settings = standard_pipeline(AnalysisConfig::default());
    let mut router = ObservableRouter::from_settings(&settings).unwrap();
    for _ in 0..5 {
        router.process_event(&Event::default());
    }
    let hist = router.finalize();
    for (name, histogram) in hist.iter() {
        assert_eq!(histogram.entries(), 0, "unexpected fill in {name}");
    }
}

#[test]
fn booking_is_deterministic_across_routers() {
    let settings = standard_pipeline(AnalysisConfig::default());
    let a = ObservableRouter::from_settings(&settings).unwrap();
    let b = ObservableRouter::from_settings(&settings).unwrap();
    let names_a: Vec<&str> = a.accumulators().iter().map(|(name, _)| name).collect();
    let names_b: Vec<&str> = b.accumulators().iter().map(|(name, _)| name).collect();
    assert_eq!(names_a, names_b);
    assert!(!names_a.is_empty());
}
