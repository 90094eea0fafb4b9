//! Tests for row flattening and CSV output.

use commap_core::cluster::cluster_items;
use commap_core::export::{Cell, to_rows, write_csv};
use commap_core::model::{ItemDetails, MapItem};
use commap_core::params::ClusterParams;

fn sample_items() -> Vec<MapItem> {
    vec![
        MapItem::new(
            "1",
            52.52,
            13.405,
            "Berlin",
            "Berlin",
            ItemDetails::Group {
                members: 40,
                events: 3,
                hosts: 2,
                recommendations: 5,
            },
        ),
        MapItem::new(
            "2",
            52.5,
            13.41,
            "Tango, Live",
            "Berlin",
            ItemDetails::Event {
                date: "2024-07-01".into(),
                price: 12.5,
            },
        )
        .with_description(Some("Bring \"shoes\"".into())),
        MapItem::new(
            "3",
            52.53,
            13.38,
            "Cozy Loft",
            "Berlin",
            ItemDetails::Home {
                price: 40.0,
                photos: vec!["loft.jpg".into()],
            },
        ),
        MapItem::new(
            "4",
            48.2,
            16.37,
            "Cafe",
            "Vienna",
            ItemDetails::Recommendation { rating: 4.5 },
        )
        .with_description(Some("Great coffee".into())),
    ]
}

#[test]
fn test_type_specific_columns() {
    let rows = to_rows(&sample_items());
    let keys: Vec<Vec<&str>> = rows.iter().map(|r| r.keys().copied().collect()).collect();
    let common = ["Type", "Title", "City", "Latitude", "Longitude", "Description"];

    assert_eq!(
        keys[0],
        [&common[..], &["Members", "Events", "Hosts", "Recommendations"][..]].concat()
    );
    assert_eq!(keys[1], [&common[..], &["Date", "Price"][..]].concat());
    assert_eq!(keys[2], common);
    assert_eq!(keys[3], [&common[..], &["Rating"][..]].concat());

    assert_eq!(rows[0]["Members"], Cell::Count(40));
    assert_eq!(rows[1]["Price"], Cell::Number(12.5));
    assert_eq!(rows[3]["Type"], Cell::Text("recommendation".into()));
}

#[test]
fn test_cluster_exports_as_single_row() {
    let homes = vec![
        MapItem::new(
            "a",
            1.0,
            1.0,
            "Anchor Home",
            "Porto",
            ItemDetails::Home {
                price: 10.0,
                photos: Vec::new(),
            },
        ),
        MapItem::new(
            "b",
            1.01,
            1.0,
            "Member Home",
            "Porto",
            ItemDetails::Home {
                price: 20.0,
                photos: Vec::new(),
            },
        ),
    ];
    let clustered = cluster_items(homes, &ClusterParams::default());
    let rows = to_rows(&clustered);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Title"], Cell::Text("Anchor Home".into()));
    assert_eq!(rows[0].len(), 6);
}

#[test]
fn test_csv_output() {
    let rows = to_rows(&sample_items());
    let mut out = Vec::new();
    write_csv(&rows, &mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();

    insta::assert_snapshot!(csv.trim_end(), @r#"
    Type,Title,City,Latitude,Longitude,Description,Members,Events,Hosts,Recommendations,Date,Price,Rating
    group,Berlin,Berlin,52.52,13.405,,40,3,2,5,,,
    event,"Tango, Live",Berlin,52.5,13.41,"Bring ""shoes""",,,,,2024-07-01,12.5,
    home,Cozy Loft,Berlin,52.53,13.38,,,,,,,,
    recommendation,Cafe,Vienna,48.2,16.37,Great coffee,,,,,,,4.5
    "#);
}

#[test]
fn test_rows_serialize_to_flat_json() {
    let rows = to_rows(&sample_items()[3..]);
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[0]["Rating"], 4.5);
    assert_eq!(json[0]["Type"], "recommendation");
    assert_eq!(json[0]["Description"], "Great coffee");
}
