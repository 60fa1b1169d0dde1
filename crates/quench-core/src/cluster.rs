//! Seam to the sequential-recombination collaborator.

use crate::errors::QuenchError;
use crate::types::Particle;

/// Reclusters jet constituents into subjets.
///
/// The engine never clusters the event itself; that happens upstream. The one
/// place clustering is invoked from inside an observable is the subjet
/// fragmentation extraction, which hands a jet's constituents back through
/// this trait. Implementations must return transverse momenta in descending
/// order and must reject an empty constituent list rather than produce a
/// default.
pub trait SubjetFinder {
    /// Reclusters `constituents` at `radius` and returns the subjet
    /// transverse momenta, largest first.
    fn subjet_pts(&self, constituents: &[Particle], radius: f64)
        -> Result<Vec<f64>, QuenchError>;
}
