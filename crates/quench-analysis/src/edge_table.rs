use serde::{Deserialize, Serialize};

use quench_core::{ErrorInfo, QuenchError};

/// Ordered table of bin upper bounds.
///
/// The table encodes upper bounds only: `bin(v)` is the position of the first
/// edge `v` does not exceed, so the first bin covers everything up to and
/// including the first edge, and a value above every edge has no bin. Edge
/// values belong to the lower-indexed bin. Lookup is a pure function of
/// `(value, table)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct EdgeTable {
    edges: Vec<f64>,
}

impl EdgeTable {
    /// Builds a table from strictly increasing, finite edges.
    pub fn new(edges: Vec<f64>) -> Result<Self, QuenchError> {
        if edges.is_empty() {
            return Err(QuenchError::Config(ErrorInfo::new(
                "empty-edge-table",
                "edge table needs at least one edge",
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(QuenchError::Config(ErrorInfo::new(
                "non-finite-edge",
                "edge table entries must be finite",
            )));
        }
        if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(QuenchError::Config(ErrorInfo::new(
                "unordered-edges",
                "edge table entries must be strictly increasing",
            )));
        }
        Ok(Self { edges })
    }

    /// Number of bins (one per edge).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// An edge table is never empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The upper bounds.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Returns the bin holding `value`, or `None` when the value exceeds
    /// every edge. Non-finite values never bin.
    pub fn bin(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let position = self.edges.partition_point(|edge| *edge < value);
        (position < self.edges.len()).then_some(position)
    }
}

impl TryFrom<Vec<f64>> for EdgeTable {
    type Error = QuenchError;

    fn try_from(edges: Vec<f64>) -> Result<Self, Self::Error> {
        EdgeTable::new(edges)
    }
}

impl From<EdgeTable> for Vec<f64> {
    fn from(table: EdgeTable) -> Self {
        table.edges
    }
}
