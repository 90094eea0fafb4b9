//! Candidate lookup for the greedy clustering pass.
//!
//! An index answers "which points might be within the threshold of point i".
//! Answers may contain false positives (the caller re-checks the exact
//! distance) but must never miss a true neighbour.

use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};
use rustc_hash::FxHashMap;

use super::Point;

/// Neighbour candidate source.
pub trait NeighborIndex {
    /// Push candidate indices `j > i` for point `i` onto `out`.
    ///
    /// Only later points are reported: every earlier point has already been
    /// consumed by the time the greedy pass visits `i`.
    fn candidates(&self, i: usize, out: &mut Vec<usize>);
}

/// Every later point is a candidate.
pub struct ExhaustiveIndex {
    len: usize,
}

impl ExhaustiveIndex {
    pub fn new(points: &[Point]) -> Self {
        Self { len: points.len() }
    }
}

impl NeighborIndex for ExhaustiveIndex {
    fn candidates(&self, i: usize, out: &mut Vec<usize>) {
        out.extend(i + 1..self.len);
    }
}

type Cell = (i64, i64);

/// Uniform grid with threshold-sized cells.
///
/// Any two points closer than the threshold fall in the same or adjacent
/// cells, so a 3x3 neighbourhood covers every true neighbour.
pub struct GridIndex {
    cell_size: f64,
    cells: Vec<Cell>,
    buckets: FxHashMap<Cell, Vec<usize>>,
}

impl GridIndex {
    pub fn build(points: &[Point], cell_size: f64) -> Self {
        let mut buckets: FxHashMap<Cell, Vec<usize>> = FxHashMap::default();
        let mut cells = Vec::with_capacity(points.len());
        for (idx, p) in points.iter().enumerate() {
            let cell = cell_of(*p, cell_size);
            cells.push(cell);
            buckets.entry(cell).or_default().push(idx);
        }
        Self {
            cell_size,
            cells,
            buckets,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

fn cell_of(p: Point, cell_size: f64) -> Cell {
    // `as` saturates, which keeps absurd coordinates in the outermost cells.
    (
        (p[0] / cell_size).floor() as i64,
        (p[1] / cell_size).floor() as i64,
    )
}

impl NeighborIndex for GridIndex {
    fn candidates(&self, i: usize, out: &mut Vec<usize>) {
        let (row, col) = self.cells[i];
        for dr in -1..=1i64 {
            for dc in -1..=1i64 {
                let key = (row.saturating_add(dr), col.saturating_add(dc));
                if let Some(bucket) = self.buckets.get(&key) {
                    out.extend(bucket.iter().copied().filter(|&j| j > i));
                }
            }
        }
    }
}

type IndexedPoint = GeomWithData<Point, usize>;

/// Bulk-loaded R-tree over the points, queried with a threshold-sized box.
pub struct TreeIndex {
    points: Vec<Point>,
    reach: f64,
    tree: RTree<IndexedPoint>,
}

impl TreeIndex {
    pub fn build(points: &[Point], threshold: f64) -> Self {
        let nodes: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(idx, p)| GeomWithData::new(*p, idx))
            .collect();
        Self {
            points: points.to_vec(),
            // Slightly wider than the threshold so rounding at the box edge
            // cannot hide a point the exact check would accept.
            reach: threshold * (1.0 + 1e-9),
            tree: RTree::bulk_load(nodes),
        }
    }
}

impl NeighborIndex for TreeIndex {
    fn candidates(&self, i: usize, out: &mut Vec<usize>) {
        let [lat, lng] = self.points[i];
        let env = AABB::from_corners(
            [lat - self.reach, lng - self.reach],
            [lat + self.reach, lng + self.reach],
        );
        out.extend(
            self.tree
                .locate_in_envelope_intersecting(&env)
                .map(|node| node.data)
                .filter(|&j| j > i),
        );
    }
}
