//! The full recompute: raw sources to render set.
//!
//! `render` is a pure function of [`MapState`]. Whoever owns the UI state
//! calls it again after any change (new fetch results, a layer toggle, the
//! cluster switch, search text) and replaces the previous result.

use tracing::debug;

use crate::aggregate::{Aggregate, aggregate};
use crate::cluster::cluster_items;
use crate::export::{Row, to_rows};
use crate::layers::LayerStore;
use crate::model::{LayerKind, LayerMap, MapItem, RawEvent, RawGroup, RawHome, RawRecommendation};
use crate::normalize::normalize;
use crate::params::ClusterParams;

/// The four raw collections. `None` means the fetch has not completed yet
/// and contributes nothing, same as an empty collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSources {
    pub groups: Option<Vec<RawGroup>>,
    pub events: Option<Vec<RawEvent>>,
    pub homes: Option<Vec<RawHome>>,
    pub recommendations: Option<Vec<RawRecommendation>>,
}

impl MapSources {
    /// Which sources have arrived.
    pub fn loaded(&self) -> LayerMap<bool> {
        LayerMap::new(
            self.groups.is_some(),
            self.events.is_some(),
            self.homes.is_some(),
            self.recommendations.is_some(),
        )
    }

    /// Normalize every source that has arrived.
    pub fn normalize(&self) -> LayerMap<Vec<MapItem>> {
        LayerMap::new(
            self.groups.as_deref().map(normalize).unwrap_or_default(),
            self.events.as_deref().map(normalize).unwrap_or_default(),
            self.homes.as_deref().map(normalize).unwrap_or_default(),
            self.recommendations.as_deref().map(normalize).unwrap_or_default(),
        )
    }
}

/// Everything the render set depends on.
#[derive(Debug, Clone, Copy)]
pub struct MapState<'a> {
    pub sources: &'a MapSources,
    pub layers: &'a LayerStore,
    pub search: &'a str,
    pub params: &'a ClusterParams,
}

/// Normalize, cluster each visible layer if enabled, then aggregate.
pub fn render(state: &MapState<'_>) -> Aggregate {
    let layers = state.layers;
    let normalized = state.sources.normalize();
    debug!(
        loaded = ?state.sources.loaded(),
        clusters_enabled = layers.clusters_enabled(),
        "rendering map"
    );

    let prepared = normalized.map(|kind, items| prepare_layer(kind, items, layers, state.params));
    aggregate(&prepared, layers.visibility(), state.search)
}

fn prepare_layer(
    kind: LayerKind,
    items: Vec<MapItem>,
    layers: &LayerStore,
    params: &ClusterParams,
) -> Vec<MapItem> {
    // Hidden layers are dropped by the aggregator anyway; skip the work.
    if !layers.is_visible(kind) {
        return Vec::new();
    }
    if layers.clusters_enabled() {
        cluster_items(items, params)
    } else {
        items
    }
}

/// Render and flatten the result for download.
pub fn export(state: &MapState<'_>) -> Vec<Row> {
    to_rows(&render(state).items)
}
