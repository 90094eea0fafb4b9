//! commap - aggregation, clustering and export of community map markers.
//!
//! Raw groups, events, homes and recommendations are normalized into
//! [`MapItem`]s, clustered per layer, merged according to layer visibility,
//! filtered by a search query and summarized. See [`pipeline::render`].

pub mod aggregate;
pub mod cluster;
pub mod error;
pub mod export;
pub mod layers;
pub mod model;
pub mod normalize;
pub mod params;
pub mod pipeline;

pub use aggregate::{Aggregate, MapStats, aggregate};
pub use cluster::cluster_items;
pub use error::{MapError, Result};
pub use export::{Cell, Row, export_filename, to_rows, write_csv};
pub use layers::LayerStore;
pub use model::{ItemDetails, LayerKind, LayerMap, MapItem};
pub use normalize::{SourceRecord, normalize};
pub use params::{ClusterParams, ClusterStrategy};
pub use pipeline::{MapSources, MapState, render};
