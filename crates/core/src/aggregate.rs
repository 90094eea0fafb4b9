//! Layer merging, search filtering and map statistics.

use serde::Serialize;
use tracing::debug;

use crate::model::{LayerMap, MapItem};

/// Counters shown next to the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStats {
    /// Markers from visible layers, before the search filter.
    pub total: usize,
    /// Markers left after the search filter.
    pub visible: usize,
    /// Cluster markers among the visible ones.
    pub clusters: usize,
    /// Visible markers per layer.
    pub per_layer: LayerMap<usize>,
}

/// The render set and its statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub items: Vec<MapItem>,
    pub stats: MapStats,
}

/// Merge visible layers in precedence order and apply the search query.
///
/// A non-empty query keeps markers whose title or city contains it, ignoring
/// case. Clusters are judged on their own title and city, not their members'.
pub fn aggregate(
    per_layer: &LayerMap<Vec<MapItem>>,
    visibility: &LayerMap<bool>,
    query: &str,
) -> Aggregate {
    let merged: Vec<&MapItem> = per_layer
        .iter()
        .filter(|(kind, _)| *visibility.get(*kind))
        .flat_map(|(_, items)| items.iter())
        .collect();
    let total = merged.len();

    let items: Vec<MapItem> = if query.is_empty() {
        merged.into_iter().cloned().collect()
    } else {
        let needle = query.to_lowercase();
        merged
            .into_iter()
            .filter(|item| item.matches_lowercase(&needle))
            .cloned()
            .collect()
    };

    let mut per_layer_counts = LayerMap::<usize>::default();
    let mut clusters = 0;
    for item in &items {
        *per_layer_counts.get_mut(item.kind()) += 1;
        if item.is_cluster() {
            clusters += 1;
        }
    }

    let stats = MapStats {
        total,
        visible: items.len(),
        clusters,
        per_layer: per_layer_counts,
    };
    debug!(
        total = stats.total,
        visible = stats.visible,
        clusters = stats.clusters,
        query,
        "aggregated map items"
    );
    Aggregate { items, stats }
}
