//! Data model: layers, raw source records and the unified map marker.

pub mod item;
pub mod layer;
pub mod raw;

pub use item::{ClusterInfo, ItemDetails, MapItem};
pub use layer::{LayerKind, LayerMap};
pub use raw::{RawEvent, RawGroup, RawHome, RawRecommendation, parse_records};
