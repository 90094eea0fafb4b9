//! Source normalization.
//!
//! Converts each raw source collection into [`MapItem`]s, dropping records
//! without a usable location. `(0, 0)` is the upstream sentinel for "no
//! location" and is treated like a missing coordinate.

use tracing::debug;

use crate::model::{ItemDetails, LayerKind, MapItem, RawEvent, RawGroup, RawHome, RawRecommendation};

/// A raw record that can become a map marker.
pub trait SourceRecord {
    /// The layer every record of this type belongs to.
    const KIND: LayerKind;

    /// Raw `(lat, lng)`, possibly missing.
    fn coordinates(&self) -> (Option<f64>, Option<f64>);

    /// Build the marker for a record whose coordinates passed validation.
    fn to_item(&self, lat: f64, lng: f64) -> MapItem;
}

/// Returns the coordinates if they are usable as a marker location.
pub fn valid_location(lat: Option<f64>, lng: Option<f64>) -> Option<(f64, f64)> {
    let (lat, lng) = (lat?, lng?);
    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }
    if lat == 0.0 && lng == 0.0 {
        return None;
    }
    Some((lat, lng))
}

/// Normalize one source collection. Input order is preserved.
pub fn normalize<R: SourceRecord>(records: &[R]) -> Vec<MapItem> {
    let items: Vec<MapItem> = records
        .iter()
        .filter_map(|record| {
            let (lat, lng) = record.coordinates();
            valid_location(lat, lng).map(|(lat, lng)| record.to_item(lat, lng))
        })
        .collect();
    debug!(
        layer = %R::KIND,
        kept = items.len(),
        dropped = records.len() - items.len(),
        "normalized source"
    );
    items
}

impl SourceRecord for RawGroup {
    const KIND: LayerKind = LayerKind::Group;

    fn coordinates(&self) -> (Option<f64>, Option<f64>) {
        (self.lat, self.lng)
    }

    fn to_item(&self, lat: f64, lng: f64) -> MapItem {
        MapItem::new(
            &self.id,
            lat,
            lng,
            self.name.as_str(),
            self.city.as_str(),
            ItemDetails::Group {
                members: self.total_users,
                events: self.event_count,
                hosts: self.host_count,
                recommendations: self.recommendation_count,
            },
        )
        .with_description(self.description.clone())
    }
}

impl SourceRecord for RawEvent {
    const KIND: LayerKind = LayerKind::Event;

    fn coordinates(&self) -> (Option<f64>, Option<f64>) {
        (self.lat, self.lng)
    }

    fn to_item(&self, lat: f64, lng: f64) -> MapItem {
        MapItem::new(
            &self.id,
            lat,
            lng,
            self.title.as_str(),
            self.city.as_str(),
            ItemDetails::Event {
                date: self.start_date.clone(),
                price: self.price,
            },
        )
        .with_description(self.description.clone())
    }
}

impl SourceRecord for RawHome {
    const KIND: LayerKind = LayerKind::Home;

    fn coordinates(&self) -> (Option<f64>, Option<f64>) {
        (self.lat, self.lng)
    }

    fn to_item(&self, lat: f64, lng: f64) -> MapItem {
        MapItem::new(
            &self.id,
            lat,
            lng,
            self.title.as_str(),
            self.city.as_str(),
            ItemDetails::Home {
                price: self.price,
                photos: self.photos.clone(),
            },
        )
        .with_description(self.description.clone())
    }
}

impl SourceRecord for RawRecommendation {
    const KIND: LayerKind = LayerKind::Recommendation;

    fn coordinates(&self) -> (Option<f64>, Option<f64>) {
        (self.lat, self.lng)
    }

    fn to_item(&self, lat: f64, lng: f64) -> MapItem {
        MapItem::new(
            &self.id,
            lat,
            lng,
            self.title.as_str(),
            self.city.as_str(),
            ItemDetails::Recommendation {
                rating: self.rating,
            },
        )
        .with_description(self.description.clone())
    }
}
