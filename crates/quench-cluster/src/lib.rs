//! Adapter over the `jetty` sequential-recombination crate.
//!
//! Event-level jet finding happens upstream of the engine; the types here
//! describe that clustering so a pipeline can record it, and provide the one
//! in-engine use of the algorithm: kt reclustering of jet constituents for
//! the subjet fragmentation observable.

use std::cmp::Ordering;

use jetty::{anti_kt_f, cambridge_aachen_f, cluster_if, kt_f, PseudoJet};
use serde::{Deserialize, Serialize};

use quench_core::{ErrorInfo, Particle, QuenchError, SubjetFinder};

/// Supported sequential-recombination algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JetAlgorithm {
    /// Anti-kt, the event-level default of every analysis.
    AntiKt,
    /// kt, used for constituent reclustering.
    Kt,
    /// Cambridge/Aachen.
    CambridgeAachen,
}

/// Declarative description of a clustering pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JetDefinition {
    /// Recombination algorithm.
    pub algorithm: JetAlgorithm,
    /// Radius parameter R.
    pub radius: f64,
    /// Minimum transverse momentum retained, in GeV.
    pub min_pt: f64,
}

impl JetDefinition {
    /// Clusters pseudojets, dropping anything below the pT floor.
    pub fn cluster(&self, partons: Vec<PseudoJet>) -> Vec<PseudoJet> {
        let min_pt2 = self.min_pt * self.min_pt;
        let cut = |jet: PseudoJet| jet.pt2() > min_pt2;
        let r = self.radius;
        match self.algorithm {
            JetAlgorithm::AntiKt => cluster_if(partons, &anti_kt_f(r), cut),
            JetAlgorithm::Kt => cluster_if(partons, &kt_f(r), cut),
            JetAlgorithm::CambridgeAachen => cluster_if(partons, &cambridge_aachen_f(r), cut),
        }
    }
}

/// Builds a massless pseudojet from a particle's (pT, η, φ).
pub fn pseudojet(particle: &Particle) -> PseudoJet {
    let (pt, eta, phi) = (particle.pt, particle.eta, particle.phi);
    [
        pt * eta.cosh(),
        pt * phi.cos(),
        pt * phi.sin(),
        pt * eta.sinh(),
    ]
    .into()
}

/// kt-based [`SubjetFinder`] backing the fragmentation observable.
#[derive(Debug, Clone, Copy, Default)]
pub struct KtSubjetFinder;

impl SubjetFinder for KtSubjetFinder {
    fn subjet_pts(
        &self,
        constituents: &[Particle],
        radius: f64,
    ) -> Result<Vec<f64>, QuenchError> {
        if constituents.is_empty() {
            return Err(QuenchError::Cluster(ErrorInfo::new(
                "no-constituents",
                "cannot recluster an empty constituent list",
            )));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(QuenchError::Cluster(
                ErrorInfo::new("invalid-radius", "reclustering radius must be positive")
                    .with_context("radius", radius.to_string()),
            ));
        }
        let partons: Vec<PseudoJet> = constituents.iter().map(pseudojet).collect();
        let subjets = cluster_if(partons, &kt_f(radius), |_: PseudoJet| true);
        let mut pts: Vec<f64> = subjets.iter().map(|jet| jet.pt().raw()).collect();
        pts.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        if pts.is_empty() {
            return Err(QuenchError::Cluster(ErrorInfo::new(
                "empty-clustering",
                "reclustering produced no subjets",
            )));
        }
        Ok(pts)
    }
}
