use particle_id::ParticleID;
use serde::{Deserialize, Serialize};

/// Final-state particle delivered by the subtraction collaborator.
///
/// Particles are immutable for the duration of an event and read-only to the
/// engine; the charge is supplied by the collaborator together with the PDG
/// code.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// PDG Monte-Carlo particle code.
    pub id: ParticleID,
    /// Electric charge in units of e.
    pub charge: f64,
    /// Transverse momentum in GeV.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuth in radians.
    pub phi: f64,
}

impl Particle {
    /// Creates a particle from a raw PDG code and kinematics.
    pub fn new(pdg: i32, charge: f64, pt: f64, eta: f64, phi: f64) -> Self {
        Self {
            id: ParticleID::new(pdg),
            charge,
            pt,
            eta,
            phi,
        }
    }

    /// Absolute pseudorapidity.
    pub fn abs_eta(&self) -> f64 {
        self.eta.abs()
    }

    /// Whether the particle carries electric charge.
    pub fn is_charged(&self) -> bool {
        self.charge != 0.0
    }
}

/// Clustered jet produced fresh per event by the clustering collaborator.
///
/// The constituent list is a subset of the event's filtered particle set and
/// is never mutated by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Jet {
    /// Transverse momentum in GeV.
    pub pt: f64,
    /// Rapidity.
    pub rap: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuth in radians.
    pub phi: f64,
    /// Invariant mass in GeV.
    pub mass: f64,
    /// Constituent particles, in the order delivered by the collaborator.
    pub constituents: Vec<Particle>,
}

impl Jet {
    /// Creates a jet without constituents.
    pub fn bare(pt: f64, rap: f64, eta: f64, phi: f64, mass: f64) -> Self {
        Self {
            pt,
            rap,
            eta,
            phi,
            mass,
            constituents: Vec::new(),
        }
    }

    /// Attaches constituents to the jet.
    pub fn with_constituents(mut self, constituents: Vec<Particle>) -> Self {
        self.constituents = constituents;
        self
    }

    /// Absolute rapidity.
    pub fn abs_rap(&self) -> f64 {
        self.rap.abs()
    }

    /// Absolute pseudorapidity.
    pub fn abs_eta(&self) -> f64 {
        self.eta.abs()
    }

    /// Whether any constituent passes the given particle cuts.
    pub fn has_constituent_passing(&self, cuts: &ParticleCuts) -> bool {
        self.constituents.iter().any(|p| cuts.accepts(p))
    }
}

/// One event's worth of collaborator output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    /// Jets ordered by descending transverse momentum.
    pub jets: Vec<Jet>,
    /// Background-subtracted final-state particles.
    pub particles: Vec<Particle>,
}

impl Event {
    /// Bundles jets and particles into an event view.
    pub fn new(jets: Vec<Jet>, particles: Vec<Particle>) -> Self {
        Self { jets, particles }
    }
}

/// Kinematic selection applied to jets before an observable sees them.
///
/// Unset bounds are not applied. Lower bounds are exclusive and upper bounds
/// inclusive, matching the window conventions of the source measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JetCuts {
    /// Transverse momentum floor in GeV.
    #[serde(default)]
    pub min_pt: Option<f64>,
    /// Transverse momentum ceiling in GeV.
    #[serde(default)]
    pub max_pt: Option<f64>,
    /// Ceiling on absolute pseudorapidity.
    #[serde(default)]
    pub max_abs_eta: Option<f64>,
    /// Ceiling on absolute rapidity.
    #[serde(default)]
    pub max_abs_rap: Option<f64>,
}

impl JetCuts {
    /// Whether the jet passes every configured bound.
    pub fn accepts(&self, jet: &Jet) -> bool {
        if let Some(min) = self.min_pt {
            if jet.pt <= min {
                return false;
            }
        }
        if let Some(max) = self.max_pt {
            if jet.pt > max {
                return false;
            }
        }
        if let Some(ceil) = self.max_abs_eta {
            if jet.abs_eta() >= ceil {
                return false;
            }
        }
        if let Some(ceil) = self.max_abs_rap {
            if jet.abs_rap() >= ceil {
                return false;
            }
        }
        true
    }

    /// Filters a jet list, preserving its ordering.
    pub fn filter<'a>(&self, jets: &'a [Jet]) -> Vec<&'a Jet> {
        jets.iter().filter(|jet| self.accepts(jet)).collect()
    }
}

/// Kinematic selection applied to particles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleCuts {
    /// Transverse momentum floor in GeV (exclusive).
    #[serde(default)]
    pub min_pt: Option<f64>,
    /// Transverse momentum ceiling in GeV (exclusive).
    #[serde(default)]
    pub max_pt: Option<f64>,
    /// Ceiling on absolute pseudorapidity (exclusive).
    #[serde(default)]
    pub max_abs_eta: Option<f64>,
}

impl ParticleCuts {
    /// Whether the particle passes every configured bound.
    pub fn accepts(&self, particle: &Particle) -> bool {
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
        if let Some(ceil) = self.max_abs_eta {
            if particle.abs_eta() >= ceil {
                return false;
            }
        }
        true
    }

    /// Filters a particle list, preserving its ordering.
    pub fn filter<'a>(&self, particles: &'a [Particle]) -> Vec<&'a Particle> {
        particles.iter().filter(|p| self.accepts(p)).collect()
    }
}
