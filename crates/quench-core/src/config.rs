//! Validated run configuration.
//!
//! Analyses historically pulled the jet radius and symmetry-plane angles from
//! process environment variables; here the same inputs live in an explicit
//! struct passed at construction, with [`AnalysisConfig::from_env`] retained
//! for pipelines driven by the generator harness. Malformed values are fatal
//! before any event is processed.

use std::env;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, QuenchError};

/// Environment variable carrying the jet radius.
pub const RADIUS_VAR: &str = "RJETS";
/// Environment variables carrying the symmetry-plane angles, by harmonic.
pub const PLANE_VARS: [&str; 3] = ["PSI2", "PSI3", "PSI4"];

fn default_jet_radius() -> f64 {
    0.4
}

fn config_error(code: &str, message: impl Into<String>) -> QuenchError {
    QuenchError::Config(ErrorInfo::new(code, message))
}

/// Symmetry-plane angles from the soft sector, in radians.
///
/// Angles are accepted in `[-π, π]` as delivered by hydrodynamics and are
/// normalized into `[0, 2π)` by the plane classifier, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaneAngles {
    /// Second-order event-plane angle ψ₂.
    #[serde(default)]
    pub psi2: f64,
    /// Third-order event-plane angle ψ₃.
    #[serde(default)]
    pub psi3: f64,
    /// Fourth-order event-plane angle ψ₄.
    #[serde(default)]
    pub psi4: f64,
}

impl PlaneAngles {
    /// Returns the angle for a harmonic order, when one is configured.
    pub fn angle_for(&self, order: u32) -> Option<f64> {
        match order {
            2 => Some(self.psi2),
            3 => Some(self.psi3),
            4 => Some(self.psi4),
            _ => None,
        }
    }
}

/// Run-level configuration shared by every analysis in a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Jet radius R handed to the clustering collaborator.
    #[serde(default = "default_jet_radius")]
    pub jet_radius: f64,
    /// Symmetry-plane angles.
    #[serde(default)]
    pub planes: PlaneAngles,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            jet_radius: default_jet_radius(),
            planes: PlaneAngles::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a validated configuration.
    pub fn new(jet_radius: f64, planes: PlaneAngles) -> Result<Self, QuenchError> {
        let config = Self { jet_radius, planes };
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from the process environment.
    ///
    /// Unset variables fall back to their defaults (R = 0.4, all angles 0);
    /// unparseable values are hard startup failures.
    pub fn from_env() -> Result<Self, QuenchError> {
        let jet_radius = match read_var(RADIUS_VAR)? {
            Some(value) => parse_float(RADIUS_VAR, &value)?,
            None => default_jet_radius(),
        };
        let mut angles = [0.0_f64; 3];
        for (slot, var) in angles.iter_mut().zip(PLANE_VARS) {
            if let Some(value) = read_var(var)? {
                *slot = parse_float(var, &value)?;
            }
        }
        Self::new(
            jet_radius,
            PlaneAngles {
                psi2: angles[0],
                psi3: angles[1],
                psi4: angles[2],
            },
        )
    }

    /// Checks the radius and plane-angle domains.
    pub fn validate(&self) -> Result<(), QuenchError> {
        if !self.jet_radius.is_finite() || self.jet_radius <= 0.0 {
            return Err(QuenchError::Config(
                ErrorInfo::new("invalid-radius", "jet radius must be finite and positive")
                    .with_context("radius", self.jet_radius.to_string()),
            ));
        }
        for (order, angle) in [
            (2u32, self.planes.psi2),
            (3, self.planes.psi3),
            (4, self.planes.psi4),
        ] {
            if !angle.is_finite() || !(-PI..=PI).contains(&angle) {
                return Err(QuenchError::Config(
                    ErrorInfo::new("plane-angle-domain", "plane angle outside [-pi, pi]")
                        .with_context("order", order.to_string())
                        .with_context("angle", angle.to_string()),
                ));
            }
        }
        Ok(())
    }
}

fn read_var(name: &str) -> Result<Option<String>, QuenchError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(config_error(
            "env-not-unicode",
            format!("environment variable {name} is not valid unicode"),
        )),
    }
}

fn parse_float(name: &str, value: &str) -> Result<f64, QuenchError> {
    value.trim().parse::<f64>().map_err(|_| {
        QuenchError::Config(
            ErrorInfo::new("env-parse", "environment variable is not a number")
                .with_context("variable", name)
                .with_context("value", value),
        )
    })
}
