//! Declarative observable configuration.
//!
//! A pipeline is one [`quench_core::AnalysisConfig`] plus a list of enabled
//! observables, each a tagged variant carrying its cuts, edge tables and
//! binnings. Settings documents round-trip through YAML so a run can be
//! reproduced from its recorded configuration.

use serde::{Deserialize, Serialize};

use quench_core::{AnalysisConfig, ErrorInfo, JetCuts, ParticleCuts, QuenchError};
use quench_hist::Binning;

use crate::correlation::{default_away_side_min, TriggerClass};
use crate::dijet::DijetSelection;

/// One enabled observable and its full configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ObservableSettings {
    /// Jet pT spectra in slices of absolute rapidity.
    RapiditySpectra(RapiditySpectraSettings),
    /// Dijet momentum balance xJ with a back-to-back requirement.
    DijetAsymmetry(DijetAsymmetrySettings),
    /// In-/out-of-plane jet spectra against harmonic symmetry planes.
    PlaneSpectra(PlaneSpectraSettings),
    /// Leading and inclusive subjet momentum fractions.
    SubjetFragmentation(SubjetFragmentationSettings),
    /// Hadron-triggered away-side jet counting.
    HadronJetCorrelation(CorrelationSettings),
    /// Jet azimuth distributions routed by pT bin.
    AzimuthDistribution(AzimuthSettings),
    /// Jet mass spectra in pT windows.
    JetMass(JetMassSettings),
    /// Spectra with a leading-constituent tag requirement.
    TaggedSpectra(TaggedSpectraSettings),
}

impl ObservableSettings {
    /// The accumulator-path prefix of this observable.
    pub fn label(&self) -> &str {
        match self {
            ObservableSettings::RapiditySpectra(s) => &s.label,
            ObservableSettings::DijetAsymmetry(s) => &s.label,
            ObservableSettings::PlaneSpectra(s) => &s.label,
            ObservableSettings::SubjetFragmentation(s) => &s.label,
            ObservableSettings::HadronJetCorrelation(s) => &s.label,
            ObservableSettings::AzimuthDistribution(s) => &s.label,
            ObservableSettings::JetMass(s) => &s.label,
            ObservableSettings::TaggedSpectra(s) => &s.label,
        }
    }
}

/// Settings for the rapidity-sliced spectra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RapiditySpectraSettings {
    /// Accumulator-path prefix.
    pub label: String,
    /// Event-level jet selection.
    pub jet_cuts: JetCuts,
    /// Upper bounds of the |y| slices.
    pub abs_rap_edges: Vec<f64>,
    /// Inclusive |y| ceilings, each with its own spectrum.
    pub inclusive_ceilings: Vec<f64>,
    /// Spectrum binning in pT.
    pub pt_binning: Binning,
}

/// Settings for the dijet asymmetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DijetAsymmetrySettings {
    /// Accumulator-path prefix.
    pub label: String,
    /// Event-level jet selection.
    pub jet_cuts: JetCuts,
    /// Pairing rules (secondary sub-selection and Δφ threshold).
    pub selection: DijetSelection,
    /// Upper bounds of the leading-pT routing bins.
    pub lead_pt_edges: Vec<f64>,
    /// Conceptual floor of the first routing bin, used for naming only.
    pub lead_pt_floor: f64,
    /// xJ histogram binning.
    pub xj_binning: Binning,
    /// Leading/subleading spectrum binning.
    pub spectra_binning: Binning,
}

/// Settings for the in-/out-of-plane spectra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneSpectraSettings {
    /// Accumulator-path prefix.
    pub label: String,
    /// Event-level jet selection.
    pub jet_cuts: JetCuts,
    /// Harmonic orders to classify against (angles come from the run config).
    pub orders: Vec<u32>,
    /// Leading-constituent requirement; jets without a constituent in this
    /// window are skipped entirely.
    #[serde(default)]
    pub constituent_window: Option<ParticleCuts>,
    /// Spectrum binning in pT.
    pub pt_binning: Binning,
}

/// Settings for the subjet fragmentation observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjetFragmentationSettings {
    /// Accumulator-path prefix.
    pub label: String,
    /// Event-level jet selection.
    pub jet_cuts: JetCuts,
    /// Reclustering radii, each with an independent accumulator family.
    pub radii: Vec<f64>,
    /// Binning of the inclusive-z family.
    pub inclusive_binning: Binning,
    /// Binning of the lower pT-range family.
    pub high_binning: Binning,
    /// Binning of the upper pT-range family.
    pub highd_binning: Binning,
    /// Binning of the full-range leading-z family.
    pub custom_binning: Binning,
    /// Jets below this pT feed the lower family (with the jet selection
    /// floor this makes the window [floor, high_max_pt)).
    pub high_max_pt: f64,
    /// Jets above this pT feed the upper family; the two windows overlap by
    /// design and are normalized independently downstream.
    pub highd_min_pt: f64,
}

/// Settings for the hadron–jet correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSettings {
    /// Accumulator-path prefix.
    pub label: String,
    /// Jet selection for both the all-jets and away-side counts.
    pub jet_cuts: JetCuts,
    /// Trigger populations; overlapping windows double-count by design.
    pub classes: Vec<TriggerClass>,
    /// Away-side requirement on Δφ(trigger, jet).
    #[serde(default = "default_away_side_min")]
    pub away_side_min: f64,
    /// Jet-pT binning shared by every class.
    pub pt_binning: Binning,
    /// Jet acceptance half-width; away-side counts are scaled by
    /// 1 / (2 × this) once at finalization.
    pub acceptance_half_width: f64,
}

/// Settings for the azimuth distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AzimuthSettings {
    /// Accumulator-path prefix.
    pub label: String,
    /// Event-level jet selection.
    pub jet_cuts: JetCuts,
    /// Upper bounds of the pT routing bins.
    pub pt_edges: Vec<f64>,
    /// Conceptual floor of the first routing bin, used for naming only.
    pub pt_floor: f64,
    /// Azimuth binning over [0, 2π).
    pub phi_binning: Binning,
}

/// Settings for the jet-mass spectra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JetMassSettings {
    /// Accumulator-path prefix.
    pub label: String,
    /// Base jet selection.
    pub jet_cuts: JetCuts,
    /// Selection for the midrapidity pT spectrum.
    pub spectrum_cuts: JetCuts,
    /// |η| ceiling for the mass measurement.
    pub mass_max_abs_eta: f64,
    /// pT floor of the first mass window.
    pub mass_min_pt: f64,
    /// Upper bounds of the bounded pT windows; harder jets feed one
    /// open-ended window.
    pub pt_window_edges: Vec<f64>,
    /// Mass binning shared by every window.
    pub mass_binning: Binning,
    /// Binning of the midrapidity pT spectrum.
    pub spectrum_binning: Binning,
}

/// Settings for the leading-constituent-tagged spectra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedSpectraSettings {
    /// Accumulator-path prefix.
    pub label: String,
    /// Event-level jet selection.
    pub jet_cuts: JetCuts,
    /// |y| ceiling of the midrapidity spectrum.
    pub midrap_max_abs_rap: f64,
    /// |η| ceiling of the wide-acceptance spectrum.
    pub wide_max_abs_eta: f64,
    /// |η| ceiling of the tagged/untagged spectrum pair.
    pub eta_space: f64,
    /// A jet is tagged when some constituent exceeds this pT.
    pub lead_min_constituent_pt: f64,
    /// Binning of the midrapidity spectrum.
    pub midrap_binning: Binning,
    /// Binning of the tagged/untagged pair.
    pub tagged_binning: Binning,
    /// Binning of the wide-acceptance spectrum.
    pub wide_binning: Binning,
}

/// A full pipeline: run configuration plus enabled observables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Run-level configuration (jet radius, plane angles).
    #[serde(default)]
    pub config: AnalysisConfig,
    /// Enabled observables, instantiated in order.
    pub observables: Vec<ObservableSettings>,
}

impl PipelineSettings {
    /// Parses a YAML settings document.
    pub fn from_yaml(text: &str) -> Result<Self, QuenchError> {
        let settings: PipelineSettings = serde_yaml::from_str(text).map_err(|err| {
            QuenchError::Serde(ErrorInfo::new("settings-parse", err.to_string()))
        })?;
        settings.config.validate()?;
        Ok(settings)
    }

    /// Serializes the pipeline back to YAML.
    pub fn to_yaml(&self) -> Result<String, QuenchError> {
        serde_yaml::to_string(self)
            .map_err(|err| QuenchError::Serde(ErrorInfo::new("settings-emit", err.to_string())))
    }
}

/// Window labels `lo_hi` for a floor and a run of upper bounds.
pub(crate) fn range_labels(floor: f64, edges: &[f64]) -> Vec<String> {
    let mut labels = Vec::with_capacity(edges.len());
    let mut lo = floor;
    for &hi in edges {
        labels.push(format!("{lo}_{hi}"));
        lo = hi;
    }
    labels
}
