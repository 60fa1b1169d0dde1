use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use quench_core::kinematics::delta_phi;
use quench_core::{Jet, JetCuts};

fn default_min_delta_phi() -> f64 {
    7.0 * PI / 8.0
}

/// Pairing rules for the dijet asymmetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DijetSelection {
    /// Secondary sub-selection applied on top of the event-level jet cuts.
    #[serde(default)]
    pub pair_cuts: JetCuts,
    /// Back-to-back requirement on Δφ(lead, sublead).
    #[serde(default = "default_min_delta_phi")]
    pub min_delta_phi: f64,
}

impl Default for DijetSelection {
    fn default() -> Self {
        Self {
            pair_cuts: JetCuts::default(),
            min_delta_phi: default_min_delta_phi(),
        }
    }
}

/// Outcome of the dijet pairing for one event.
#[derive(Debug, Clone, PartialEq)]
pub enum DijetOutcome {
    /// Fewer than two event-selected jets; the event never reaches the
    /// pass/fail counter.
    NoCandidate,
    /// A candidate event that failed the sub-selection or the back-to-back
    /// requirement. `delta_phi` is present when a pair was formed.
    Rejected {
        /// Azimuthal separation of the pair, when one existed.
        delta_phi: Option<f64>,
    },
    /// An accepted pair.
    Accepted {
        /// Leading jet transverse momentum.
        lead_pt: f64,
        /// Subleading jet transverse momentum.
        sublead_pt: f64,
        /// Azimuthal separation of the pair.
        delta_phi: f64,
        /// Momentum balance xJ = sublead / lead, in (0, 1].
        x_j: f64,
    },
}

impl DijetSelection {
    /// Pairs the two hardest sub-selected jets and tests the back-to-back
    /// requirement. `jets` is the event-selected list.
    pub fn evaluate(&self, jets: &[&Jet]) -> DijetOutcome {
        if jets.len() < 2 {
            return DijetOutcome::NoCandidate;
        }
        let mut pair: Vec<&Jet> = jets
            .iter()
            .copied()
            .filter(|jet| self.pair_cuts.accepts(jet))
            .collect();
        if pair.len() < 2 {
            return DijetOutcome::Rejected { delta_phi: None };
        }
        pair.sort_unstable_by(|a, b| {
            b.pt.partial_cmp(&a.pt).unwrap_or(std::cmp::Ordering::Equal)
        });
        let (lead, sublead) = (pair[0], pair[1]);
        let separation = delta_phi(lead.phi, sublead.phi);
        if separation > self.min_delta_phi {
            DijetOutcome::Accepted {
                lead_pt: lead.pt,
                sublead_pt: sublead.pt,
                delta_phi: separation,
                x_j: sublead.pt / lead.pt,
            }
        } else {
            DijetOutcome::Rejected {
                delta_phi: Some(separation),
            }
        }
    }
}
