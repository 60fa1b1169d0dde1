#![deny(missing_docs)]

//! Core data model, kinematics helpers and configuration for the quench
//! observable engine.
//!
//! The engine consumes background-subtracted final-state particles and
//! clustered jets produced by external collaborators; this crate defines the
//! read-only event model those collaborators deliver, the cut descriptors the
//! analyses apply to it, and the seam trait through which constituents are
//! handed back to a sequential-recombination implementation for subjet
//! reclustering.

pub mod cluster;
pub mod config;
pub mod errors;
pub mod kinematics;
pub mod pid;
mod types;

pub use cluster::SubjetFinder;
pub use config::{AnalysisConfig, PlaneAngles};
pub use errors::{ErrorInfo, QuenchError};
pub use types::{Event, Jet, JetCuts, Particle, ParticleCuts};
