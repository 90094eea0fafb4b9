//! Greedy first-come-claims-neighbours grouping.
//!
//! Each unconsumed point, in input order, claims every still-unconsumed
//! point closer than the threshold. Grouping is not transitive: with A-B and
//! B-C close but A-C far, A claims B and C is evaluated on its own later.

use super::Point;
use super::index::NeighborIndex;

/// Planar distance test in raw degree space.
#[inline]
pub fn within(a: Point, b: Point, threshold: f64) -> bool {
    let dlat = a[0] - b[0];
    let dlng = a[1] - b[1];
    (dlat * dlat + dlng * dlng).sqrt() < threshold
}

/// Partition point indices into groups.
///
/// Groups are emitted in anchor order; within a group the anchor comes first
/// and its neighbours follow in input order.
pub fn greedy_groups(
    points: &[Point],
    threshold: f64,
    index: &impl NeighborIndex,
) -> Vec<Vec<usize>> {
    let mut processed = vec![false; points.len()];
    let mut groups = Vec::with_capacity(points.len());
    let mut candidates = Vec::new();

    for i in 0..points.len() {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        candidates.clear();
        index.candidates(i, &mut candidates);
        candidates.retain(|&j| !processed[j] && within(points[i], points[j], threshold));
        candidates.sort_unstable();
        candidates.dedup();

        let mut group = Vec::with_capacity(candidates.len() + 1);
        group.push(i);
        for &j in &candidates {
            processed[j] = true;
            group.push(j);
        }
        groups.push(group);
    }

    groups
}
