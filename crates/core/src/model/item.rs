//! The unified map marker.
//!
//! Every source record and every synthetic cluster is a [`MapItem`]. The
//! source type lives in the [`ItemDetails`] variant, so it is fixed at
//! creation and carries exactly the attributes that make sense for it.

use serde::ser::{Serialize, SerializeMap, Serializer};
use smol_str::{SmolStr, format_smolstr};

use super::layer::LayerKind;

/// Per-type attributes of a marker.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDetails {
    Group {
        members: u64,
        events: u64,
        hosts: u64,
        recommendations: u64,
    },
    Event {
        date: String,
        price: f64,
    },
    Home {
        price: f64,
        photos: Vec<String>,
    },
    Recommendation {
        rating: f64,
    },
}

impl ItemDetails {
    pub const fn kind(&self) -> LayerKind {
        match self {
            ItemDetails::Group { .. } => LayerKind::Group,
            ItemDetails::Event { .. } => LayerKind::Event,
            ItemDetails::Home { .. } => LayerKind::Home,
            ItemDetails::Recommendation { .. } => LayerKind::Recommendation,
        }
    }
}

/// Members folded into a synthetic cluster marker.
///
/// The first member is the anchor whose fields the cluster adopts. A cluster
/// always represents at least two items.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterInfo {
    members: Vec<MapItem>,
}

impl ClusterInfo {
    /// Returns `None` when fewer than two members are given.
    pub fn new(members: Vec<MapItem>) -> Option<Self> {
        (members.len() >= 2).then_some(Self { members })
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[MapItem] {
        &self.members
    }

    pub fn anchor(&self) -> &MapItem {
        &self.members[0]
    }
}

/// A point on the community map.
///
/// The id, the type details and the cluster membership are set at creation
/// and only readable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MapItem {
    id: SmolStr,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub description: Option<String>,
    pub city: String,
    details: ItemDetails,
    cluster: Option<ClusterInfo>,
}

impl MapItem {
    /// Create a plain (non-cluster) marker. The id is prefixed with the
    /// layer name so ids stay unique once layers are merged.
    pub fn new(
        source_id: &str,
        lat: f64,
        lng: f64,
        title: impl Into<String>,
        city: impl Into<String>,
        details: ItemDetails,
    ) -> Self {
        Self {
            id: format_smolstr!("{}-{}", details.kind(), source_id),
            lat,
            lng,
            title: title.into(),
            description: None,
            city: city.into(),
            details,
            cluster: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    /// Fold `members` into one cluster marker anchored at the first member.
    ///
    /// Returns `None` when fewer than two members are given.
    pub fn cluster_of(members: Vec<MapItem>) -> Option<Self> {
        let info = ClusterInfo::new(members)?;
        let anchor = info.anchor();
        Some(Self {
            id: format_smolstr!("cluster-{}", anchor.id),
            lat: anchor.lat,
            lng: anchor.lng,
            title: anchor.title.clone(),
            description: anchor.description.clone(),
            city: anchor.city.clone(),
            details: anchor.details.clone(),
            cluster: Some(info),
        })
    }

    /// `"{type}-{source id}"`, or `"cluster-{anchor id}"` for clusters.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn details(&self) -> &ItemDetails {
        &self.details
    }

    pub const fn kind(&self) -> LayerKind {
        self.details.kind()
    }

    pub const fn is_cluster(&self) -> bool {
        self.cluster.is_some()
    }

    /// Number of underlying items, present only for cluster markers.
    pub fn cluster_count(&self) -> Option<usize> {
        self.cluster.as_ref().map(ClusterInfo::count)
    }

    pub fn members(&self) -> &[MapItem] {
        self.cluster.as_ref().map(ClusterInfo::members).unwrap_or(&[])
    }

    /// Case-insensitive substring match on title or city.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.city.to_lowercase().contains(needle)
    }
}

impl Serialize for MapItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("type", &self.kind())?;
        map.serialize_entry("lat", &self.lat)?;
        map.serialize_entry("lng", &self.lng)?;
        map.serialize_entry("title", &self.title)?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.serialize_entry("city", &self.city)?;
        match &self.details {
            ItemDetails::Group {
                members,
                events,
                hosts,
                recommendations,
            } => {
                map.serialize_entry("memberCount", members)?;
                map.serialize_entry("eventCount", events)?;
                map.serialize_entry("hostCount", hosts)?;
                map.serialize_entry("recommendationCount", recommendations)?;
            }
            ItemDetails::Event { date, price } => {
                map.serialize_entry("date", date)?;
                map.serialize_entry("price", price)?;
            }
            ItemDetails::Home { price, photos } => {
                map.serialize_entry("price", price)?;
                map.serialize_entry("photos", photos)?;
            }
            ItemDetails::Recommendation { rating } => {
                map.serialize_entry("rating", rating)?;
            }
        }
        map.serialize_entry("isCluster", &self.is_cluster())?;
        if let Some(cluster) = &self.cluster {
            map.serialize_entry("clusterCount", &cluster.count())?;
            map.serialize_entry("items", cluster.members())?;
        }
        map.end()
    }
}
