//! Layer identifiers and the fixed four-slot per-layer record.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::MapError;

/// One of the four independently toggleable map layers.
///
/// Declaration order is the merge precedence: later layers render on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Group,
    Event,
    Home,
    Recommendation,
}

impl LayerKind {
    /// All layers in merge precedence order.
    pub const ALL: [LayerKind; 4] = [
        LayerKind::Group,
        LayerKind::Event,
        LayerKind::Home,
        LayerKind::Recommendation,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LayerKind::Group => "group",
            LayerKind::Event => "event",
            LayerKind::Home => "home",
            LayerKind::Recommendation => "recommendation",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "group" | "groups" => Ok(LayerKind::Group),
            "event" | "events" => Ok(LayerKind::Event),
            "home" | "homes" => Ok(LayerKind::Home),
            "recommendation" | "recommendations" => Ok(LayerKind::Recommendation),
            _ => Err(MapError::UnknownLayer(s.to_string())),
        }
    }
}

/// A value per layer.
///
/// Unlike a map keyed by `LayerKind`, every layer always has a slot, so
/// lookups are infallible and iteration order is the merge precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayerMap<T> {
    pub group: T,
    pub event: T,
    pub home: T,
    pub recommendation: T,
}

impl<T> LayerMap<T> {
    pub const fn new(group: T, event: T, home: T, recommendation: T) -> Self {
        Self {
            group,
            event,
            home,
            recommendation,
        }
    }

    pub const fn get(&self, kind: LayerKind) -> &T {
        match kind {
            LayerKind::Group => &self.group,
            LayerKind::Event => &self.event,
            LayerKind::Home => &self.home,
            LayerKind::Recommendation => &self.recommendation,
        }
    }

    pub const fn get_mut(&mut self, kind: LayerKind) -> &mut T {
        match kind {
            LayerKind::Group => &mut self.group,
            LayerKind::Event => &mut self.event,
            LayerKind::Home => &mut self.home,
            LayerKind::Recommendation => &mut self.recommendation,
        }
    }

    /// Iterate `(kind, value)` pairs in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerKind, &T)> {
        LayerKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn map<U>(self, mut f: impl FnMut(LayerKind, T) -> U) -> LayerMap<U> {
        LayerMap {
            group: f(LayerKind::Group, self.group),
            event: f(LayerKind::Event, self.event),
            home: f(LayerKind::Home, self.home),
            recommendation: f(LayerKind::Recommendation, self.recommendation),
        }
    }
}

impl<T> IntoIterator for LayerMap<T> {
    type Item = (LayerKind, T);
    type IntoIter = std::array::IntoIter<(LayerKind, T), 4>;

    fn into_iter(self) -> Self::IntoIter {
        [
            (LayerKind::Group, self.group),
            (LayerKind::Event, self.event),
            (LayerKind::Home, self.home),
            (LayerKind::Recommendation, self.recommendation),
        ]
        .into_iter()
    }
}
