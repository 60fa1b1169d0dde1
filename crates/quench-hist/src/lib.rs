#![deny(missing_docs)]

//! Bin-addressed accumulators for the quench engine.
//!
//! Observables never talk to storage directly; they book named histograms at
//! initialization, keep the opaque [`HistId`] handles, and during the event
//! loop only call `fill`. Rate-normalized spectra receive a single `scale` at
//! finalization. Merging worker replicas is commutative, so event batches
//! may be accumulated independently and summed.

/// Histogram storage and arithmetic.
pub mod histogram;
/// Name-addressed booking registry.
pub mod registry;

pub use histogram::{linspace, Binning, Histogram};
pub use registry::{HistId, HistogramSet};
