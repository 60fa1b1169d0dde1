use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use quench_core::kinematics::delta_phi;
use quench_core::pid::is_charged_hadron;
use quench_core::Particle;

/// Default away-side requirement: Δφ ≥ π − 0.6.
pub fn default_away_side_min() -> f64 {
    PI - 0.6
}

/// A named hadron-selection window defining one trigger population.
///
/// Classes overlap by design; a hadron falling into several windows counts
/// as a trigger in each of them independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerClass {
    /// Suffix used in the accumulator names, e.g. `20_50`.
    pub label: String,
    /// Trigger pT floor in GeV (exclusive), unset for the η-only class.
    #[serde(default)]
    pub min_pt: Option<f64>,
    /// Trigger pT ceiling in GeV (exclusive).
    #[serde(default)]
    pub max_pt: Option<f64>,
    /// Acceptance ceiling on |η| (exclusive).
    pub max_abs_eta: f64,
}

impl TriggerClass {
    /// Builds a class from its window bounds.
    pub fn new(
        label: impl Into<String>,
        min_pt: Option<f64>,
        max_pt: Option<f64>,
        max_abs_eta: f64,
    ) -> Self {
        Self {
            label: label.into(),
            min_pt,
            max_pt,
            max_abs_eta,
        }
    }

    /// Whether the particle triggers this class: a charged hadron inside the
    /// pT window and the η acceptance.
    pub fn accepts(&self, particle: &Particle) -> bool {
        if !is_charged_hadron(particle) {
            return false;
        }
        if particle.abs_eta() >= self.max_abs_eta {
            return false;
        }
        if let Some(min) = self.min_pt {
            if particle.pt <= min {
                return false;
            }
        }
        if let Some(max) = self.max_pt {
            if particle.pt >= max {
                return false;
            }
        }
        true
    }
}

/// Whether a jet sits on the away side of a trigger hadron.
pub fn is_away_side(trigger_phi: f64, jet_phi: f64, min_separation: f64) -> bool {
    delta_phi(trigger_phi, jet_phi) >= min_separation
}

/// The trigger populations of the hadron–jet measurement, from the tightest
/// high-pT window down to the η-only reference class.
pub fn standard_trigger_classes(max_abs_eta: f64) -> Vec<TriggerClass> {
    vec![
        TriggerClass::new("20_50", Some(20.0), Some(50.0), max_abs_eta),
        TriggerClass::new("12_50", Some(12.0), Some(50.0), max_abs_eta),
        TriggerClass::new("8_9", Some(8.0), Some(9.0), max_abs_eta),
        TriggerClass::new("6_7", Some(6.0), Some(7.0), max_abs_eta),
        TriggerClass::new("1", Some(1.0), None, max_abs_eta),
        TriggerClass::new("eta", None, None, max_abs_eta),
    ]
}
