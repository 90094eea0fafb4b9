//! End-to-end tests: raw JSON sources through render.

use commap_core::layers::LayerStore;
use commap_core::model::{LayerKind, parse_records};
use commap_core::params::ClusterParams;
use commap_core::pipeline::{MapSources, MapState, render};

const THREE_EVENTS: &str = r#"[
    {"id": 1, "lat": 10.0, "lng": 10.0, "title": "Opening Night", "city": "Alpha"},
    {"id": 2, "lat": 10.01, "lng": 10.01, "title": "Workshop", "city": "Alpha"},
    {"id": 3, "lat": 50.0, "lng": 50.0, "title": "Festival", "city": "Omega"}
]"#;

fn three_events() -> MapSources {
    MapSources {
        events: Some(parse_records(THREE_EVENTS).unwrap()),
        ..Default::default()
    }
}

#[test]
fn test_three_events_clustered() {
    let sources = three_events();
    let layers = LayerStore::default();
    let params = ClusterParams::default();
    let out = render(&MapState {
        sources: &sources,
        layers: &layers,
        search: "",
        params: &params,
    });

    assert_eq!(out.items.len(), 2);
    let cluster = &out.items[0];
    assert!(cluster.is_cluster());
    assert_eq!(cluster.cluster_count(), Some(2));
    assert_eq!((cluster.lat, cluster.lng), (10.0, 10.0));
    assert_eq!(out.items[1].id(), "event-3");
    assert_eq!((out.items[1].lat, out.items[1].lng), (50.0, 50.0));
    assert_eq!((out.stats.total, out.stats.visible, out.stats.clusters), (2, 2, 1));
}

#[test]
fn test_three_events_without_clustering() {
    let sources = three_events();
    let mut layers = LayerStore::default();
    layers.toggle_clusters();
    let params = ClusterParams::default();
    let out = render(&MapState {
        sources: &sources,
        layers: &layers,
        search: "",
        params: &params,
    });

    assert_eq!(out.items.len(), 3);
    assert!(out.items.iter().all(|i| !i.is_cluster()));
    assert_eq!(out.stats.clusters, 0);
    assert_eq!(out.stats.total, 3);
}

#[test]
fn test_berlin_search_across_layers() {
    let sources = MapSources {
        groups: Some(
            parse_records(
                r#"[{"id": 1, "lat": 52.52, "lng": 13.405, "name": "Berlin", "totalUsers": 40}]"#,
            )
            .unwrap(),
        ),
        homes: Some(
            parse_records(
                r#"[{"id": 7, "lat": 52.49, "lng": 13.43, "title": "Cozy Loft", "city": "Berlin"}]"#,
            )
            .unwrap(),
        ),
        ..Default::default()
    };
    let layers = LayerStore::default();
    let params = ClusterParams::default();
    let out = render(&MapState {
        sources: &sources,
        layers: &layers,
        search: "berlin",
        params: &params,
    });

    let ids: Vec<_> = out.items.iter().map(|i| i.id()).collect();
    assert_eq!(ids, ["group-1", "home-7"]);
    assert_eq!(out.stats.visible, 2);
}

#[test]
fn test_layers_never_cluster_together() {
    // A group and an event at the same spot stay separate markers.
    let sources = MapSources {
        groups: Some(parse_records(r#"[{"id": 1, "lat": 1.0, "lng": 1.0, "name": "G"}]"#).unwrap()),
        events: Some(
            parse_records(r#"[{"id": 1, "lat": 1.0, "lng": 1.0, "title": "E"}]"#).unwrap(),
        ),
        ..Default::default()
    };
    let layers = LayerStore::default();
    let params = ClusterParams::default();
    let out = render(&MapState {
        sources: &sources,
        layers: &layers,
        search: "",
        params: &params,
    });
    assert_eq!(out.items.len(), 2);
    assert_eq!(out.stats.clusters, 0);
    assert_eq!(out.items[0].kind(), LayerKind::Group);
    assert_eq!(out.items[1].kind(), LayerKind::Event);
}

#[test]
fn test_toggle_recompute_reflects_new_state() {
    let sources = three_events();
    let mut layers = LayerStore::default();
    let params = ClusterParams::default();

    let before = render(&MapState {
        sources: &sources,
        layers: &layers,
        search: "",
        params: &params,
    });
    layers.toggle(LayerKind::Event);
    let hidden = render(&MapState {
        sources: &sources,
        layers: &layers,
        search: "",
        params: &params,
    });
    layers.toggle(LayerKind::Event);
    let after = render(&MapState {
        sources: &sources,
        layers: &layers,
        search: "",
        params: &params,
    });

    assert!(hidden.items.is_empty());
    assert_eq!(hidden.stats.total, 0);
    assert_eq!(before, after);
}

#[test]
fn test_invalid_records_are_silently_dropped() {
    let sources = MapSources {
        recommendations: Some(
            parse_records(
                r#"[
                    {"id": 1, "lat": 0, "lng": 0, "title": "Nowhere"},
                    {"id": 2, "lat": "abc", "lng": 3, "title": "Broken"},
                    {"id": 3, "title": "Missing"},
                    {"id": 4, "lat": 45.0, "lng": 7.6, "title": "Turin Pizza", "rating": 4.8}
                ]"#,
            )
            .unwrap(),
        ),
        ..Default::default()
    };
    let layers = LayerStore::default();
    let params = ClusterParams::default();
    let out = render(&MapState {
        sources: &sources,
        layers: &layers,
        search: "",
        params: &params,
    });
    assert_eq!(out.items.len(), 1);
    assert_eq!(out.items[0].id(), "recommendation-4");
}
