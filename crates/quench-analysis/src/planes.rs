use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use quench_core::kinematics::{delta_phi, fold_angle};
use quench_core::{ErrorInfo, QuenchError};

/// Result of the in-/out-of-plane test for one harmonic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneClass {
    /// Within the in-plane cone of some plane image.
    InPlane,
    /// Within the in-plane cone of the rotated (out-of-plane) reference.
    OutOfPlane,
    /// In the gap between the two cones.
    Neither,
}

/// The n rotationally equivalent directions of an n-th order symmetry plane.
///
/// The reference angle is folded into `[0, 2π)` at construction; all
/// classification is invariant under replacing it with any of its images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetryPlaneSet {
    order: u32,
    psi: f64,
}

impl SymmetryPlaneSet {
    /// Creates a plane set for harmonic order `order >= 2`.
    pub fn new(order: u32, psi: f64) -> Result<Self, QuenchError> {
        if order < 2 {
            return Err(QuenchError::Config(
                ErrorInfo::new("invalid-harmonic", "plane order must be at least 2")
                    .with_context("order", order.to_string()),
            ));
        }
        if !psi.is_finite() {
            return Err(QuenchError::Config(ErrorInfo::new(
                "non-finite-angle",
                "plane angle must be finite",
            )));
        }
        Ok(Self {
            order,
            psi: fold_angle(psi),
        })
    }

    /// Harmonic order n.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Canonical plane angle in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        self.psi
    }

    /// The n equivalent plane directions ψ + 2πk/n, folded.
    pub fn images(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.order;
        (0..n).map(move |k| fold_angle(self.psi + 2.0 * PI * k as f64 / n as f64))
    }

    /// Shortest circular distance from `phi` to the closest plane image.
    pub fn min_distance(&self, phi: f64) -> f64 {
        self.images()
            .map(|image| delta_phi(phi, image))
            .fold(f64::INFINITY, f64::min)
    }

    /// Half opening of the in-plane cone: (2/3) · π / (2n).
    ///
    /// The plain geometric half-width would be π/(2n); the 2/3 factor narrows
    /// the cone for a sharper contrast between the in- and out-of-plane
    /// yields, following the measurement this reproduces.
    pub fn in_plane_threshold(&self) -> f64 {
        (2.0 / 3.0) * PI / (2.0 * self.order as f64)
    }

    /// Whether `phi` falls strictly inside the in-plane cone.
    pub fn is_in_plane(&self, phi: f64) -> bool {
        self.min_distance(phi) < self.in_plane_threshold()
    }

    /// The same-order plane set rotated by π/n, the out-of-plane reference.
    pub fn out_of_plane_reference(&self) -> Self {
        Self {
            order: self.order,
            psi: fold_angle(self.psi + PI / self.order as f64),
        }
    }

    /// Classifies an azimuth as in-plane, out-of-plane or neither.
    pub fn classify(&self, phi: f64) -> PlaneClass {
        if self.is_in_plane(phi) {
            PlaneClass::InPlane
        } else if self.out_of_plane_reference().is_in_plane(phi) {
            PlaneClass::OutOfPlane
        } else {
            PlaneClass::Neither
        }
    }
}
