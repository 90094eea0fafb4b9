//! Tests for source normalization.

use commap_core::model::{
    ItemDetails, LayerKind, RawEvent, RawGroup, RawHome, RawRecommendation, parse_records,
};
use commap_core::normalize::normalize;

fn event(id: &str, lat: Option<f64>, lng: Option<f64>) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        lat,
        lng,
        title: format!("Event {id}"),
        ..Default::default()
    }
}

#[test]
fn test_origin_sentinel_is_excluded() {
    let records = vec![
        event("1", Some(0.0), Some(0.0)),
        event("2", Some(38.7), Some(-9.1)),
        event("3", Some(0.0), Some(0.0)),
    ];
    let items = normalize(&records);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id(), "event-2");
}

#[test]
fn test_non_finite_and_missing_coordinates_are_excluded() {
    let records = vec![
        event("nan", Some(f64::NAN), Some(1.0)),
        event("inf", Some(1.0), Some(f64::NEG_INFINITY)),
        event("nolat", None, Some(1.0)),
        event("nolng", Some(1.0), None),
        event("ok", Some(1.0), Some(1.0)),
    ];
    let items = normalize(&records);
    let ids: Vec<_> = items.iter().map(|i| i.id()).collect();
    assert_eq!(ids, ["event-ok"]);
    assert!(items.iter().all(|i| i.lat.is_finite() && i.lng.is_finite()));
}

#[test]
fn test_zero_on_one_axis_is_a_real_location() {
    // Points on the equator or prime meridian are legitimate.
    let items = normalize(&[
        event("eq", Some(0.0), Some(32.5)),
        event("pm", Some(51.4), Some(0.0)),
    ]);
    assert_eq!(items.len(), 2);
}

#[test]
fn test_input_order_is_preserved() {
    let records: Vec<RawEvent> = (0..20)
        .map(|i| event(&i.to_string(), Some(10.0 + i as f64), Some(20.0)))
        .collect();
    let ids: Vec<String> = normalize(&records)
        .iter()
        .map(|i| i.id().to_string())
        .collect();
    let expected: Vec<String> = (0..20).map(|i| format!("event-{i}")).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_every_type_maps_its_fields() {
    let groups: Vec<RawGroup> = parse_records(
        r#"[{"id": 1, "lat": 52.52, "lng": 13.40, "name": "Berlin", "city": "Berlin",
             "totalUsers": 40, "eventCount": 3, "hostCount": 2, "recommendationCount": 5}]"#,
    )
    .unwrap();
    let events: Vec<RawEvent> = parse_records(
        r#"[{"id": 2, "lat": 41.39, "lng": 2.17, "title": "Milonga", "city": "Barcelona",
             "startDate": "2024-07-01T20:00:00Z", "price": 15}]"#,
    )
    .unwrap();
    let homes: Vec<RawHome> = parse_records(
        r#"[{"id": 3, "lat": "45.46", "lng": "9.19", "title": "Cozy Loft", "city": "Milan",
             "price": 40, "photos": ["a.jpg"]}]"#,
    )
    .unwrap();
    let recs: Vec<RawRecommendation> = parse_records(
        r#"[{"id": 4, "lat": 48.2, "lng": 16.37, "title": "Cafe", "city": "Vienna", "rating": 4.5,
             "description": "Great coffee"}]"#,
    )
    .unwrap();

    let g = &normalize(&groups)[0];
    assert_eq!(
        (g.id(), g.title.as_str(), g.kind()),
        ("group-1", "Berlin", LayerKind::Group)
    );
    assert_eq!(
        *g.details(),
        ItemDetails::Group {
            members: 40,
            events: 3,
            hosts: 2,
            recommendations: 5
        }
    );

    let e = &normalize(&events)[0];
    assert_eq!(
        *e.details(),
        ItemDetails::Event {
            date: "2024-07-01T20:00:00Z".into(),
            price: 15.0
        }
    );
    assert_eq!(e.city, "Barcelona");

    let h = &normalize(&homes)[0];
    assert_eq!((h.lat, h.lng), (45.46, 9.19));
    assert_eq!(
        *h.details(),
        ItemDetails::Home {
            price: 40.0,
            photos: vec!["a.jpg".into()]
        }
    );

    let r = &normalize(&recs)[0];
    assert_eq!(*r.details(), ItemDetails::Recommendation { rating: 4.5 });
    assert_eq!(r.description.as_deref(), Some("Great coffee"));
    assert!(!r.is_cluster());
}

#[test]
fn test_empty_collection_normalizes_to_empty() {
    assert!(normalize::<RawHome>(&[]).is_empty());
}
