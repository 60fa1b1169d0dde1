//! Published measurement wirings.
//!
//! Each function bakes one analysis's cuts, edge tables and accumulator
//! binnings into a declarative settings value, with the acceptance ceilings
//! derived from the configured jet radius. Kinematic constants follow the
//! measurements the engine reproduces: the ATLAS jet spectrum and dijet
//! balance, the ALICE in-/out-of-plane and subjet-fragmentation analyses,
//! the ALICE hadron–jet correlation, and the companion azimuth, mass and
//! tagged-spectrum distributions.

use std::f64::consts::PI;

use quench_core::{AnalysisConfig, JetCuts, ParticleCuts};
use quench_hist::Binning;

use crate::correlation::standard_trigger_classes;
use crate::dijet::DijetSelection;
use crate::settings::{
    AzimuthSettings, CorrelationSettings, DijetAsymmetrySettings, JetMassSettings,
    ObservableSettings, PipelineSettings, PlaneSpectraSettings, RapiditySpectraSettings,
    SubjetFragmentationSettings, TaggedSpectraSettings,
};

/// ATLAS absolute-rapidity slice bounds.
const ABS_RAP_SLICES: [f64; 6] = [0.3, 0.8, 1.2, 1.6, 2.1, 2.8];

/// ATLAS jet-spectrum pT binning.
const SPECTRUM_PT_EDGES: [f64; 24] = [
    30.0, 40.0, 50.0, 56.0, 63.0, 70.0, 79.0, 89.0, 100.0, 112.0, 125.0, 141.0, 158.0, 177.0,
    199.0, 223.0, 251.0, 281.0, 316.0, 354.0, 398.0, 501.0, 630.0, 1000.0,
];

/// Leading-jet pT routing bins for xJ (upper bounds; first window opens at 10).
const XJ_LEAD_PT_EDGES: [f64; 18] = [
    30.0, 60.0, 90.0, 100.0, 112.0, 126.0, 141.0, 158.0, 178.0, 200.0, 224.0, 251.0, 282.0,
    316.0, 398.0, 562.0, 630.0, 1000.0,
];

/// Leading/subleading spectrum binning.
const DIJET_PT_EDGES: [f64; 15] = [
    100.0, 112.0, 126.0, 141.0, 158.0, 178.0, 200.0, 224.0, 251.0, 282.0, 316.0, 398.0, 562.0,
    630.0, 1000.0,
];

/// ALICE charged-jet spectrum binning for the plane-resolved analysis.
const PLANE_PT_EDGES: [f64; 11] = [
    20.0, 25.0, 35.0, 40.0, 50.0, 60.0, 80.0, 100.0, 120.0, 140.0, 200.0,
];

/// Inclusive-z binning of the subjet fragmentation.
const Z_FULL_EDGES: [f64; 12] = [
    0.0, 0.02, 0.04, 0.1, 0.3, 0.6, 0.7, 0.77, 0.83, 0.89, 0.95, 1.00001,
];

/// Leading-z binning of the lower pT family.
const Z_HIGH_EDGES: [f64; 7] = [0.6, 0.7, 0.77, 0.83, 0.89, 0.95, 1.00001];

/// Leading-z binning of the upper pT family.
const Z_HIGHD_EDGES: [f64; 11] = [
    0.7, 0.75, 0.77, 0.8, 0.83, 0.86, 0.9, 0.92, 0.95, 0.98, 1.00001,
];

/// Azimuth-distribution pT routing bins (first window opens at 71).
const PHI_PT_EDGES: [f64; 12] = [
    79.0, 89.0, 100.0, 126.0, 158.0, 200.0, 251.0, 316.0, 398.0, 500.0, 650.0, 1000.0,
];

/// Jet-mass pT window bounds; harder jets feed the open-ended window.
const MASS_PT_WINDOWS: [f64; 12] = [
    80.0, 100.0, 120.0, 140.0, 160.0, 180.0, 200.0, 220.0, 240.0, 260.0, 280.0, 300.0,
];

/// Tagged-spectrum binnings.
const TAGGED_MIDRAP_EDGES: [f64; 13] = [
    71.0, 79.0, 89.0, 100.0, 126.0, 158.0, 200.0, 251.0, 316.0, 398.0, 500.0, 650.0, 1000.0,
];
const TAGGED_TRACK_EDGES: [f64; 8] = [40.0, 50.0, 60.0, 70.0, 80.0, 100.0, 120.0, 140.0];
const TAGGED_WIDE_EDGES: [f64; 6] = [200.0, 250.0, 300.0, 400.0, 500.0, 1000.0];

/// Calorimeter acceptance of the wide-rapidity analyses.
const WIDE_ETA_MAX: f64 = 3.2;
/// Tracker acceptance of the midrapidity analyses.
const TRACKER_ETA_MAX: f64 = 0.9;

fn jet_eta_ceiling(acceptance: f64, config: &AnalysisConfig) -> f64 {
    acceptance - config.jet_radius
}

/// ATLAS jet spectrum in |y| slices.
pub fn rapidity_spectra(config: &AnalysisConfig) -> ObservableSettings {
    ObservableSettings::RapiditySpectra(RapiditySpectraSettings {
        label: "jet-spectra".to_string(),
        jet_cuts: JetCuts {
            min_pt: Some(20.0),
            max_abs_eta: Some(jet_eta_ceiling(WIDE_ETA_MAX, config)),
            ..JetCuts::default()
        },
        abs_rap_edges: ABS_RAP_SLICES.to_vec(),
        inclusive_ceilings: vec![2.1, 2.8, 1.2],
        pt_binning: Binning::from_edges(&SPECTRUM_PT_EDGES),
    })
}

/// ATLAS dijet momentum balance.
pub fn dijet_asymmetry(config: &AnalysisConfig) -> ObservableSettings {
    ObservableSettings::DijetAsymmetry(DijetAsymmetrySettings {
        label: "dijet-xj".to_string(),
        jet_cuts: JetCuts {
            min_pt: Some(20.0),
            max_abs_eta: Some(jet_eta_ceiling(WIDE_ETA_MAX, config)),
            ..JetCuts::default()
        },
        selection: DijetSelection {
            pair_cuts: JetCuts {
                min_pt: Some(20.0),
                max_abs_eta: Some(2.1),
                ..JetCuts::default()
            },
            min_delta_phi: 7.0 * PI / 8.0,
        },
        lead_pt_edges: XJ_LEAD_PT_EDGES.to_vec(),
        lead_pt_floor: 10.0,
        xj_binning: Binning::uniform(20, 0.32, 1.0),
        spectra_binning: Binning::from_edges(&DIJET_PT_EDGES),
    })
}

/// ALICE in-/out-of-plane charged-jet spectra for n = 2, 3, 4.
pub fn plane_spectra(config: &AnalysisConfig) -> ObservableSettings {
    ObservableSettings::PlaneSpectra(PlaneSpectraSettings {
        label: "inout-plane".to_string(),
        jet_cuts: JetCuts {
            min_pt: Some(20.0),
            max_abs_eta: Some(jet_eta_ceiling(TRACKER_ETA_MAX, config)),
            ..JetCuts::default()
        },
        orders: vec![2, 3, 4],
        constituent_window: Some(ParticleCuts {
            min_pt: Some(5.0),
            max_pt: Some(100.0),
            max_abs_eta: None,
        }),
        pt_binning: Binning::from_edges(&PLANE_PT_EDGES),
    })
}

/// ALICE subjet fragmentation at r = 0.1 and 0.2.
pub fn subjet_fragmentation(config: &AnalysisConfig) -> ObservableSettings {
    ObservableSettings::SubjetFragmentation(SubjetFragmentationSettings {
        label: "subjet-frag".to_string(),
        jet_cuts: JetCuts {
            min_pt: Some(80.0),
            max_pt: Some(150.0),
            max_abs_eta: Some(jet_eta_ceiling(TRACKER_ETA_MAX, config)),
            ..JetCuts::default()
        },
        radii: vec![0.1, 0.2],
        inclusive_binning: Binning::from_edges(&Z_FULL_EDGES),
        high_binning: Binning::from_edges(&Z_HIGH_EDGES),
        highd_binning: Binning::from_edges(&Z_HIGHD_EDGES),
        custom_binning: Binning::uniform(25, 0.50001, 1.00001),
        high_max_pt: 120.0,
        highd_min_pt: 100.0,
    })
}

/// ALICE hadron-triggered away-side jet counting.
pub fn hadron_jet_correlation(config: &AnalysisConfig) -> ObservableSettings {
    let jet_eta = jet_eta_ceiling(TRACKER_ETA_MAX, config);
    ObservableSettings::HadronJetCorrelation(CorrelationSettings {
        label: "hadron-jet".to_string(),
        jet_cuts: JetCuts {
            min_pt: Some(0.15),
            max_pt: Some(100.0),
            max_abs_eta: Some(jet_eta),
            ..JetCuts::default()
        },
        classes: standard_trigger_classes(TRACKER_ETA_MAX),
        away_side_min: PI - 0.6,
        pt_binning: Binning::uniform(100, 0.0, 100.0),
        acceptance_half_width: jet_eta,
    })
}

/// ATLAS jet azimuth distributions by pT bin.
pub fn azimuth_distribution(config: &AnalysisConfig) -> ObservableSettings {
    ObservableSettings::AzimuthDistribution(AzimuthSettings {
        label: "phi-dist".to_string(),
        jet_cuts: JetCuts {
            min_pt: Some(70.0),
            max_abs_eta: Some(jet_eta_ceiling(WIDE_ETA_MAX, config)),
            max_abs_rap: Some(1.2),
            ..JetCuts::default()
        },
        pt_edges: PHI_PT_EDGES.to_vec(),
        pt_floor: 71.0,
        phi_binning: Binning::uniform(64, 0.0, 2.0 * PI),
    })
}

/// Jet-mass spectra in 20 GeV pT windows.
pub fn jet_mass(config: &AnalysisConfig) -> ObservableSettings {
    ObservableSettings::JetMass(JetMassSettings {
        label: "jet-mass".to_string(),
        jet_cuts: JetCuts {
            min_pt: Some(0.15),
            max_abs_eta: Some(TRACKER_ETA_MAX),
            ..JetCuts::default()
        },
        spectrum_cuts: JetCuts {
            min_pt: Some(20.0),
            max_abs_eta: Some(0.5),
            ..JetCuts::default()
        },
        mass_max_abs_eta: jet_eta_ceiling(TRACKER_ETA_MAX, config),
        mass_min_pt: 60.0,
        pt_window_edges: MASS_PT_WINDOWS.to_vec(),
        mass_binning: Binning::uniform(200, 0.0, 100.0),
        spectrum_binning: Binning::uniform(50, 20.0, 520.0),
    })
}

/// Spectra with a leading-constituent tag requirement.
pub fn tagged_spectra(config: &AnalysisConfig) -> ObservableSettings {
    let eta_space = if config.jet_radius <= 0.4 {
        0.7 - config.jet_radius
    } else {
        WIDE_ETA_MAX - config.jet_radius
    };
    ObservableSettings::TaggedSpectra(TaggedSpectraSettings {
        label: "tagged-spectra".to_string(),
        jet_cuts: JetCuts {
            min_pt: Some(40.0),
            max_abs_eta: Some(jet_eta_ceiling(WIDE_ETA_MAX, config)),
            ..JetCuts::default()
        },
        midrap_max_abs_rap: 1.2,
        wide_max_abs_eta: 2.0,
        eta_space,
        lead_min_constituent_pt: 10.0 * config.jet_radius + 3.0,
        midrap_binning: Binning::from_edges(&TAGGED_MIDRAP_EDGES),
        tagged_binning: Binning::from_edges(&TAGGED_TRACK_EDGES),
        wide_binning: Binning::from_edges(&TAGGED_WIDE_EDGES),
    })
}

/// Every preset observable in one pipeline.
pub fn standard_pipeline(config: AnalysisConfig) -> PipelineSettings {
    let observables = vec![
        rapidity_spectra(&config),
        dijet_asymmetry(&config),
        plane_spectra(&config),
        subjet_fragmentation(&config),
        hadron_jet_correlation(&config),
        azimuth_distribution(&config),
        jet_mass(&config),
        tagged_spectra(&config),
    ];
    PipelineSettings {
        config,
        observables,
    }
}
