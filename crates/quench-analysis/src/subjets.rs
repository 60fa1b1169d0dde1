use quench_core::{ErrorInfo, Jet, QuenchError, SubjetFinder};

/// Momentum-sharing fractions of one jet at one reclustering radius.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentationRecord {
    /// Reclustering radius r.
    pub radius: f64,
    /// Leading subjet momentum fraction, z = max subjet pT / jet pT.
    pub leading_z: f64,
    /// Every subjet's momentum fraction, largest first.
    pub inclusive_z: Vec<f64>,
}

/// Reclusters a jet's constituents at `radius` and derives the z fractions.
///
/// Reclustering an empty constituent list is undefined; it is rejected here,
/// before the clustering collaborator is invoked, and the caller skips the
/// jet's contribution to this observable only.
pub fn extract_fragmentation(
    jet: &Jet,
    radius: f64,
    finder: &dyn SubjetFinder,
) -> Result<FragmentationRecord, QuenchError> {
    if jet.constituents.is_empty() {
        return Err(QuenchError::Observable(ErrorInfo::new(
            "empty-constituents",
            "subjet fragmentation needs a non-empty constituent list",
        )));
    }
    if !(jet.pt.is_finite() && jet.pt > 0.0) {
        return Err(QuenchError::Observable(
            ErrorInfo::new("invalid-jet-pt", "jet pT must be positive for z fractions")
                .with_context("pt", jet.pt.to_string()),
        ));
    }
    let subjet_pts = finder.subjet_pts(&jet.constituents, radius)?;
    if subjet_pts.is_empty() {
        return Err(QuenchError::Observable(ErrorInfo::new(
            "no-subjets",
            "reclustering returned no subjets",
        )));
    }
    let mut inclusive_z: Vec<f64> = subjet_pts.iter().map(|pt| pt / jet.pt).collect();
    inclusive_z.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let leading_z = inclusive_z[0];
    Ok(FragmentationRecord {
        radius,
        leading_z,
        inclusive_z,
    })
}
