//! Spatial clustering of same-layer markers.
//!
//! Markers closer than [`ClusterParams::threshold`] collapse into one
//! synthetic cluster marker anchored at the first of them.
//!
//! - `greedy` - the first-come-claims-neighbours pass
//! - `index` - candidate lookup (exhaustive, grid buckets, R-tree)

mod greedy;
mod index;

use tracing::{debug, trace};

use crate::model::MapItem;
use crate::params::{ClusterParams, ClusterStrategy};

pub use greedy::{greedy_groups, within};
pub use index::{ExhaustiveIndex, GridIndex, NeighborIndex, TreeIndex};

/// A `[lat, lng]` pair.
pub type Point = [f64; 2];

/// Cluster one layer's markers.
///
/// The caller must not mix layers in one call. Plain markers that claim no
/// neighbour pass through unchanged and keep their relative order.
pub fn cluster_items(items: Vec<MapItem>, params: &ClusterParams) -> Vec<MapItem> {
    if items.len() < 2 {
        return items;
    }

    let points: Vec<Point> = items.iter().map(|item| [item.lat, item.lng]).collect();
    let threshold = params.threshold;
    let groups = match params.strategy {
        ClusterStrategy::Exhaustive => {
            greedy_groups(&points, threshold, &ExhaustiveIndex::new(&points))
        }
        ClusterStrategy::Grid => {
            let grid = GridIndex::build(&points, threshold);
            trace!(
                buckets = grid.bucket_count(),
                cell_size = grid.cell_size(),
                "built grid index"
            );
            greedy_groups(&points, threshold, &grid)
        }
        ClusterStrategy::RTree => {
            greedy_groups(&points, threshold, &TreeIndex::build(&points, threshold))
        }
    };

    let input_len = items.len();
    let out = assemble(items, &groups);
    debug!(
        strategy = %params.strategy,
        input = input_len,
        output = out.len(),
        clusters = out.iter().filter(|item| item.is_cluster()).count(),
        "clustered layer"
    );
    out
}

/// Move items into their groups, folding multi-member groups into clusters.
fn assemble(items: Vec<MapItem>, groups: &[Vec<usize>]) -> Vec<MapItem> {
    let mut slots: Vec<Option<MapItem>> = items.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(groups.len());

    for group in groups {
        let mut members: Vec<MapItem> = group.iter().filter_map(|&idx| slots[idx].take()).collect();
        if members.len() == 1 {
            out.extend(members.pop());
        } else {
            trace!(anchor = %members[0].id(), size = members.len(), "formed cluster");
            out.extend(MapItem::cluster_of(members));
        }
    }

    out
}
