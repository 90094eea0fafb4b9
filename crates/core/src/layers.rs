//! Layer visibility state.
//!
//! Pure state: four visibility flags and the global cluster switch. Callers
//! re-run the pipeline after mutating it.

use crate::model::{LayerKind, LayerMap};

/// Per-layer visibility plus the clustering switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStore {
    visibility: LayerMap<bool>,
    clusters_enabled: bool,
}

impl Default for LayerStore {
    /// All layers visible, clustering enabled.
    fn default() -> Self {
        Self::new(LayerMap::new(true, true, true, true), true)
    }
}

impl LayerStore {
    pub const fn new(visibility: LayerMap<bool>, clusters_enabled: bool) -> Self {
        Self {
            visibility,
            clusters_enabled,
        }
    }

    /// Flip one layer's visibility; the others are untouched.
    pub fn toggle(&mut self, layer: LayerKind) {
        let flag = self.visibility.get_mut(layer);
        *flag = !*flag;
    }

    pub fn set_visible(&mut self, layer: LayerKind, visible: bool) {
        *self.visibility.get_mut(layer) = visible;
    }

    pub fn toggle_clusters(&mut self) {
        self.clusters_enabled = !self.clusters_enabled;
    }

    pub fn set_clusters_enabled(&mut self, enabled: bool) {
        self.clusters_enabled = enabled;
    }

    pub const fn is_visible(&self, layer: LayerKind) -> bool {
        *self.visibility.get(layer)
    }

    pub const fn clusters_enabled(&self) -> bool {
        self.clusters_enabled
    }

    pub const fn visibility(&self) -> &LayerMap<bool> {
        &self.visibility
    }
}
