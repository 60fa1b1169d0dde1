use serde::{Deserialize, Serialize};

use quench_core::{ErrorInfo, QuenchError};

fn hist_error(code: &str, message: impl Into<String>) -> QuenchError {
    QuenchError::Histogram(ErrorInfo::new(code, message))
}

/// Evenly spaced bin edges: `bins` intervals covering `[lo, hi]`.
pub fn linspace(bins: usize, lo: f64, hi: f64) -> Vec<f64> {
    let step = (hi - lo) / bins as f64;
    (0..=bins).map(|i| lo + step * i as f64).collect()
}

/// Bin layout requested at booking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Binning {
    /// `bins` uniform intervals between `lo` and `hi`.
    Uniform {
        /// Number of bins.
        bins: usize,
        /// Lower edge of the first bin.
        lo: f64,
        /// Upper edge of the last bin.
        hi: f64,
    },
    /// Explicit, strictly increasing edge list (`edges.len() - 1` bins).
    Edges {
        /// Bin boundaries.
        edges: Vec<f64>,
    },
}

impl Binning {
    /// Uniform binning shorthand.
    pub fn uniform(bins: usize, lo: f64, hi: f64) -> Self {
        Binning::Uniform { bins, lo, hi }
    }

    /// Explicit-edge shorthand.
    pub fn from_edges(edges: &[f64]) -> Self {
        Binning::Edges {
            edges: edges.to_vec(),
        }
    }

    /// Materializes the layout into an empty histogram.
    pub fn build(&self) -> Result<Histogram, QuenchError> {
        match self {
            Binning::Uniform { bins, lo, hi } => {
                if *bins == 0 {
                    return Err(hist_error("empty-binning", "uniform binning needs bins > 0"));
                }
                if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                    return Err(hist_error(
                        "invalid-range",
                        format!("uniform binning range [{lo}, {hi}] is not increasing"),
                    ));
                }
                Histogram::with_edges(linspace(*bins, *lo, *hi))
            }
            Binning::Edges { edges } => Histogram::with_edges(edges.clone()),
        }
    }
}

/// One-dimensional weighted histogram with under/overflow tracking.
///
/// Storage bins are half open, `[edges[k], edges[k+1])`; values below the
/// first edge land in the underflow sum and values at or above the last edge
/// in the overflow sum. This is the storage convention only; range routing
/// inside the observables uses their own edge-table contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    edges: Vec<f64>,
    sumw: Vec<f64>,
    underflow: f64,
    overflow: f64,
    entries: u64,
}

impl Histogram {
    /// Creates an empty histogram from strictly increasing finite edges.
    pub fn with_edges(edges: Vec<f64>) -> Result<Self, QuenchError> {
        if edges.len() < 2 {
            return Err(hist_error("too-few-edges", "histogram needs at least two edges"));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(hist_error("non-finite-edge", "histogram edges must be finite"));
        }
        if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(hist_error(
                "unordered-edges",
                "histogram edges must be strictly increasing",
            ));
        }
        let bins = edges.len() - 1;
        Ok(Self {
            edges,
            sumw: vec![0.0; bins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
        })
    }

    /// Number of regular bins.
    pub fn num_bins(&self) -> usize {
        self.sumw.len()
    }

    /// Bin boundaries.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Weighted content of bin `k`.
    pub fn bin_content(&self, k: usize) -> Option<f64> {
        self.sumw.get(k).copied()
    }

    /// Sum of weights below the first edge.
    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    /// Sum of weights at or above the last edge.
    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    /// Number of fill calls, regardless of weight.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Sum of weights over the regular bins.
    pub fn sum(&self) -> f64 {
        self.sumw.iter().sum()
    }

    /// Records a unit-weight value.
    pub fn fill(&mut self, value: f64) {
        self.fill_weighted(value, 1.0);
    }

    /// Records a weighted value.
    pub fn fill_weighted(&mut self, value: f64, weight: f64) {
        self.entries += 1;
        if !value.is_finite() {
            // NaN and infinities count as lost acceptance.
            self.overflow += weight;
            return;
        }
        if value < self.edges[0] {
            self.underflow += weight;
            return;
        }
        if value >= self.edges[self.edges.len() - 1] {
            self.overflow += weight;
            return;
        }
        let bin = self.edges.partition_point(|edge| *edge <= value) - 1;
        self.sumw[bin] += weight;
    }

    /// Multiplies every sum (including under/overflow) by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for w in &mut self.sumw {
            *w *= factor;
        }
        self.underflow *= factor;
        self.overflow *= factor;
    }

    /// Adds another histogram with identical edges into this one.
    pub fn merge(&mut self, other: &Histogram) -> Result<(), QuenchError> {
        if self.edges != other.edges {
            return Err(hist_error(
                "edge-mismatch",
                "cannot merge histograms with different edges",
            ));
        }
        for (w, v) in self.sumw.iter_mut().zip(&other.sumw) {
            *w += v;
        }
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        self.entries += other.entries;
        Ok(())
    }
}
