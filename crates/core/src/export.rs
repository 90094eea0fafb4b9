//! Tabular export of the render set.
//!
//! Each marker becomes one flat row. Rows share six common columns and append
//! type-specific ones; a cluster exports as a single row built from its own
//! fields, its members are not listed.

use std::borrow::Cow;
use std::fmt;
use std::io::Write;

use chrono::NaiveDate;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::error::Result;
use crate::model::{ItemDetails, MapItem};

pub const COL_TYPE: &str = "Type";
pub const COL_TITLE: &str = "Title";
pub const COL_CITY: &str = "City";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_DESCRIPTION: &str = "Description";
pub const COL_MEMBERS: &str = "Members";
pub const COL_EVENTS: &str = "Events";
pub const COL_HOSTS: &str = "Hosts";
pub const COL_RECOMMENDATIONS: &str = "Recommendations";
pub const COL_DATE: &str = "Date";
pub const COL_PRICE: &str = "Price";
pub const COL_RATING: &str = "Rating";

/// One exported value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Count(u64),
    Number(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Count(n) => write!(f, "{n}"),
            Cell::Number(x) => write!(f, "{x}"),
        }
    }
}

/// Column name to value, in column order.
pub type Row = IndexMap<&'static str, Cell>;

/// Flatten one marker into a row.
pub fn to_row(item: &MapItem) -> Row {
    let mut row = Row::with_capacity(10);
    row.insert(COL_TYPE, Cell::Text(item.kind().to_string()));
    row.insert(COL_TITLE, Cell::Text(item.title.clone()));
    row.insert(COL_CITY, Cell::Text(item.city.clone()));
    row.insert(COL_LATITUDE, Cell::Number(item.lat));
    row.insert(COL_LONGITUDE, Cell::Number(item.lng));
    row.insert(
        COL_DESCRIPTION,
        Cell::Text(item.description.clone().unwrap_or_default()),
    );

    match item.details() {
        ItemDetails::Group {
            members,
            events,
            hosts,
            recommendations,
        } => {
            row.insert(COL_MEMBERS, Cell::Count(*members));
            row.insert(COL_EVENTS, Cell::Count(*events));
            row.insert(COL_HOSTS, Cell::Count(*hosts));
            row.insert(COL_RECOMMENDATIONS, Cell::Count(*recommendations));
        }
        ItemDetails::Event { date, price } => {
            row.insert(COL_DATE, Cell::Text(date.clone()));
            row.insert(COL_PRICE, Cell::Number(*price));
        }
        // Photos are not exported.
        ItemDetails::Home { .. } => {}
        ItemDetails::Recommendation { rating } => {
            row.insert(COL_RATING, Cell::Number(*rating));
        }
    }
    row
}

/// Flatten the render set, one row per marker.
pub fn to_rows(items: &[MapItem]) -> Vec<Row> {
    items.iter().map(to_row).collect()
}

/// Write rows as CSV.
///
/// The header is the union of all row keys in first-seen order; a row
/// lacking a column gets an empty cell. Fields containing a comma, quote or
/// line break are quoted with inner quotes doubled. No rows, no output.
pub fn write_csv<W: Write>(rows: &[Row], mut writer: W) -> Result<()> {
    let header: Vec<&'static str> = rows
        .iter()
        .flat_map(|row| row.keys().copied())
        .unique()
        .collect();
    if header.is_empty() {
        return Ok(());
    }

    writeln!(writer, "{}", header.iter().map(|col| escape_field(col)).join(","))?;
    for row in rows {
        let line = header
            .iter()
            .map(|col| match row.get(col) {
                Some(cell) => escape_field(&cell.to_string()).into_owned(),
                None => String::new(),
            })
            .join(",");
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Date-stamped download name, e.g. `community-map-2024-05-01.csv`.
pub fn export_filename(prefix: &str, date: NaiveDate, extension: &str) -> String {
    format!("{prefix}-{}.{extension}", date.format("%Y-%m-%d"))
}
