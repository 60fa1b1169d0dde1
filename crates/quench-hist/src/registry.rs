use std::fs::File;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use quench_core::{ErrorInfo, QuenchError};

use crate::histogram::{Binning, Histogram};

/// Opaque accumulator handle returned by [`HistogramSet::book`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistId(usize);

/// Name-addressed accumulator registry.
///
/// Booking happens once at initialization and yields handles; lookups during
/// the event loop are plain index accesses. Export preserves booking order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistogramSet {
    histograms: IndexMap<String, Histogram>,
}

impl HistogramSet {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Books a new histogram under a unique name.
    pub fn book(&mut self, name: impl Into<String>, binning: &Binning) -> Result<HistId, QuenchError> {
        let name = name.into();
        if self.histograms.contains_key(&name) {
            return Err(QuenchError::Histogram(
                ErrorInfo::new("duplicate-name", "histogram already booked")
                    .with_context("name", name),
            ));
        }
        let histogram = binning.build().map_err(|err| match err {
            QuenchError::Histogram(info) => {
                QuenchError::Histogram(info.with_context("name", name.clone()))
            }
            other => other,
        })?;
        let (index, _) = self.histograms.insert_full(name, histogram);
        Ok(HistId(index))
    }

    /// Records a unit-weight value into the addressed histogram.
    pub fn fill(&mut self, id: HistId, value: f64) {
        self.fill_weighted(id, value, 1.0);
    }

    /// Records a weighted value into the addressed histogram.
    pub fn fill_weighted(&mut self, id: HistId, value: f64, weight: f64) {
        if let Some((_, histogram)) = self.histograms.get_index_mut(id.0) {
            histogram.fill_weighted(value, weight);
        }
    }

    /// Scales the addressed histogram by `factor`.
    pub fn scale(&mut self, id: HistId, factor: f64) {
        if let Some((_, histogram)) = self.histograms.get_index_mut(id.0) {
            histogram.scale(factor);
        }
    }

    /// Resolves a handle into its histogram.
    pub fn histogram(&self, id: HistId) -> Option<&Histogram> {
        self.histograms.get_index(id.0).map(|(_, h)| h)
    }

    /// Looks a histogram up by its booked name.
    pub fn by_name(&self, name: &str) -> Option<&Histogram> {
        self.histograms.get(name)
    }

    /// Resolves a booked name into its handle.
    pub fn id_of(&self, name: &str) -> Option<HistId> {
        self.histograms.get_index_of(name).map(HistId)
    }

    /// Number of booked histograms.
    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    /// Whether nothing has been booked.
    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }

    /// Iterates over `(name, histogram)` in booking order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Histogram)> {
        self.histograms.iter().map(|(name, h)| (name.as_str(), h))
    }

    /// Sums another registry with identical booking into this one.
    ///
    /// Worker replicas processing disjoint event batches merge through this;
    /// addition is commutative and associative, so merge order is irrelevant.
    pub fn merge(&mut self, other: &HistogramSet) -> Result<(), QuenchError> {
        if self.histograms.len() != other.histograms.len() {
            return Err(QuenchError::Histogram(ErrorInfo::new(
                "booking-mismatch",
                "cannot merge registries with different bookings",
            )));
        }
        for ((name, histogram), (other_name, other_histogram)) in
            self.histograms.iter_mut().zip(other.histograms.iter())
        {
            if name != other_name {
                return Err(QuenchError::Histogram(
                    ErrorInfo::new("booking-mismatch", "registry names disagree")
                        .with_context("left", name.clone())
                        .with_context("right", other_name.clone()),
                ));
            }
            histogram.merge(other_histogram)?;
        }
        Ok(())
    }

    /// Serializes the registry to pretty JSON.
    pub fn to_json(&self) -> Result<String, QuenchError> {
        serde_json::to_string_pretty(self).map_err(|err| {
            QuenchError::Serde(ErrorInfo::new("registry-serialize", err.to_string()))
        })
    }

    /// Writes every histogram as CSV rows `name,lo,hi,sumw`.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "histogram,lo,hi,sumw")?;
        for (name, histogram) in self.iter() {
            let edges = histogram.edges();
            for k in 0..histogram.num_bins() {
                writeln!(
                    file,
                    "{},{},{},{:.6}",
                    name,
                    edges[k],
                    edges[k + 1],
                    histogram.bin_content(k).unwrap_or(0.0)
                )?;
            }
        }
        Ok(())
    }
}
