//! Clustering parameters.
//!
//! Contains ClusterParams for controlling how nearby markers are merged.

use std::fmt;
use std::str::FromStr;

use crate::error::{MapError, Result};

/// Default merge distance in raw lat/lng degrees (roughly 11 km at the equator).
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.1;

/// How candidate neighbours are located during the greedy pass.
///
/// Every strategy yields the same clusters; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterStrategy {
    /// Compare every pair. O(n²).
    Exhaustive,
    /// Bucket points into threshold-sized cells and only compare adjacent cells.
    #[default]
    Grid,
    /// Query a bulk-loaded R-tree around each point.
    RTree,
}

impl ClusterStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            ClusterStrategy::Exhaustive => "exhaustive",
            ClusterStrategy::Grid => "grid",
            ClusterStrategy::RTree => "rtree",
        }
    }
}

impl fmt::Display for ClusterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterStrategy {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhaustive" | "naive" => Ok(ClusterStrategy::Exhaustive),
            "grid" => Ok(ClusterStrategy::Grid),
            "rtree" | "r-tree" => Ok(ClusterStrategy::RTree),
            other => Err(MapError::InvalidParams(format!(
                "unknown cluster strategy '{other}' (expected exhaustive, grid or rtree)"
            ))),
        }
    }
}

/// Parameters for spatial clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterParams {
    /// Two markers closer than this (Euclidean distance in degree space) are
    /// merged. Strict comparison: points exactly `threshold` apart stay apart.
    pub threshold: f64,

    /// Neighbour lookup strategy.
    pub strategy: ClusterStrategy,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CLUSTER_THRESHOLD,
            strategy: ClusterStrategy::default(),
        }
    }
}

impl ClusterParams {
    /// Creates clustering parameters, rejecting thresholds that are not
    /// finite and strictly positive.
    pub fn new(threshold: f64, strategy: ClusterStrategy) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(MapError::InvalidParams(format!(
                "threshold must be a positive finite number of degrees, got {threshold}"
            )));
        }
        Ok(Self {
            threshold,
            strategy,
        })
    }
}
