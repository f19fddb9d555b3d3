//! CSV export for search results.
//!
//! The file is named `YYYYMMDD_<sanitized-query>.csv` from the local date.
//! One header row, one row per record in invoker order; absent fields are
//! empty cells.

use crate::places::PlaceRecord;
use chrono::{Local, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Column order and header names of the export file.
const HEADERS: [&str; 16] = [
    "name",
    "address",
    "latitude",
    "longitude",
    "phone",
    "website",
    "rating",
    "maps_url",
    "hours_status",
    "hours_monday",
    "hours_tuesday",
    "hours_wednesday",
    "hours_thursday",
    "hours_friday",
    "hours_saturday",
    "hours_sunday",
];

/// One CSV row. Field order must match HEADERS.
#[derive(Serialize)]
struct CsvRow<'a> {
    name: Option<&'a str>,
    address: Option<&'a str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    phone: Option<&'a str>,
    website: Option<&'a str>,
    rating: Option<f64>,
    maps_url: Option<&'a str>,
    hours_status: Option<&'a str>,
    hours_monday: Option<&'a str>,
    hours_tuesday: Option<&'a str>,
    hours_wednesday: Option<&'a str>,
    hours_thursday: Option<&'a str>,
    hours_friday: Option<&'a str>,
    hours_saturday: Option<&'a str>,
    hours_sunday: Option<&'a str>,
}

impl<'a> CsvRow<'a> {
    fn from_record(record: &'a PlaceRecord) -> Self {
        let hours = record.hours.as_ref();
        let day = |weekday: Weekday| -> Option<&'a str> {
            hours
                .and_then(|h| h.weekday.get(&weekday))
                .map(String::as_str)
        };
        Self {
            name: record.name.as_deref(),
            address: record.address.as_deref(),
            latitude: record.lat,
            longitude: record.lon,
            phone: record.phone.as_deref(),
            website: record.website.as_deref(),
            rating: record.rating,
            maps_url: record.maps_url.as_deref(),
            hours_status: hours
                .and_then(|h| h.open_now)
                .map(|open| if open { "Open" } else { "Closed" }),
            hours_monday: day(Weekday::Mon),
            hours_tuesday: day(Weekday::Tue),
            hours_wednesday: day(Weekday::Wed),
            hours_thursday: day(Weekday::Thu),
            hours_friday: day(Weekday::Fri),
            hours_saturday: day(Weekday::Sat),
            hours_sunday: day(Weekday::Sun),
        }
    }
}

/// Export errors.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

/// Sanitize a query into a filename-safe slug.
///
/// Lowercase; whitespace runs become underscores; anything outside
/// `[a-z0-9_-]` is dropped; repeated separators collapse; separators are
/// trimmed from both ends. Applying it twice changes nothing.
pub fn sanitize_query(query: &str) -> String {
    let mut slug = String::with_capacity(query.len());
    let mut last_separator = true; // drops leading separators
    for c in query.to_lowercase().chars() {
        if c.is_whitespace() || c == '_' {
            if !last_separator {
                slug.push('_');
                last_separator = true;
            }
        } else if c == '-' {
            if !last_separator {
                slug.push('-');
                last_separator = true;
            }
        } else if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_separator = false;
        }
    }
    while slug.ends_with(['_', '-']) {
        slug.pop();
    }
    slug
}

/// Derive the export filename for `query` on `date`.
pub fn export_filename(query: &str, date: NaiveDate) -> String {
    let slug = sanitize_query(query);
    let slug = if slug.is_empty() {
        "search".to_string()
    } else {
        slug
    };
    format!("{}_{}.csv", date.format("%Y%m%d"), slug)
}

/// Write `records` to `<output_dir>/YYYYMMDD_<slug>.csv` and return the path.
pub fn write_csv(
    records: &[PlaceRecord],
    query: &str,
    output_dir: &Path,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(export_filename(query, Local::now().date_naive()));
    let file = File::create(&path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(HEADERS)?;
    for record in records {
        writer.serialize(CsvRow::from_record(record))?;
    }
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::OpeningHours;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_basic() {
        assert_eq!(sanitize_query("coffee shops"), "coffee_shops");
        assert_eq!(sanitize_query("Coffee Shops!"), "coffee_shops");
        assert_eq!(sanitize_query("  pizza  "), "pizza");
    }

    #[test]
    fn test_sanitize_collapses_separators() {
        assert_eq!(sanitize_query("a   b"), "a_b");
        assert_eq!(sanitize_query("a--b"), "a-b");
        assert_eq!(sanitize_query("a -_ b"), "a_b");
    }

    #[test]
    fn test_sanitize_drops_specials() {
        assert_eq!(sanitize_query("café & bar"), "caf_bar");
        assert_eq!(sanitize_query("!!!"), "");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for query in [
            "coffee shops",
            "Hiking Trails (Bay Area)",
            "a--b__c",
            "  weird   input!  ",
            "",
        ] {
            let once = sanitize_query(query);
            assert_eq!(sanitize_query(&once), once, "not idempotent for {:?}", query);
        }
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(export_filename("coffee shops", date), "20240101_coffee_shops.csv");
    }

    #[test]
    fn test_export_filename_empty_slug_falls_back() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(export_filename("!!!", date), "20240101_search.csv");
    }

    #[test]
    fn test_headers_match_row_fields() {
        // The header row is written by hand; make sure it stays in sync with
        // the serde field names of CsvRow.
        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .serialize(CsvRow::from_record(&PlaceRecord::default()))
            .unwrap();
        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let serde_header = data.lines().next().unwrap();
        assert_eq!(serde_header, HEADERS.join(","));
    }

    fn full_record() -> PlaceRecord {
        let mut weekday = HashMap::new();
        weekday.insert(Weekday::Mon, "8:00 AM – 6:00 PM".to_string());
        weekday.insert(Weekday::Sun, "Closed".to_string());
        PlaceRecord {
            name: Some("Blue Bottle".into()),
            address: Some("1 Main St, Springfield".into()),
            lat: Some(37.77),
            lon: Some(-122.42),
            phone: Some("(555) 010-0100".into()),
            website: Some("https://bluebottle.example".into()),
            rating: Some(4.5),
            maps_url: Some("https://maps.google.com/?cid=42".into()),
            hours: Some(OpeningHours {
                open_now: Some(true),
                weekday,
            }),
        }
    }

    #[test]
    fn test_write_csv_row_count() {
        let dir = TempDir::new().unwrap();
        let records = vec![full_record(), PlaceRecord::default(), full_record()];

        let path = write_csv(&records, "coffee shops", dir.path()).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().ends_with("_coffee_shops.csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            HEADERS.to_vec(),
        );
        let rows: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), records.len());
    }

    #[test]
    fn test_write_csv_empty_fields_render_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&[PlaceRecord::default()], "bare", dir.path()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), HEADERS.len());
        assert!(rows[0].iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_write_csv_full_record_cells() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&[full_record()], "cells", dir.path()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "Blue Bottle");
        assert_eq!(&row[6], "4.5");
        assert_eq!(&row[8], "Open");
        assert_eq!(&row[9], "8:00 AM – 6:00 PM");
        assert_eq!(&row[10], ""); // Tuesday absent
        assert_eq!(&row[15], "Closed");
    }

    #[test]
    fn test_write_csv_no_records_still_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&[], "empty", dir.path()).unwrap();

        let data = std::fs::read_to_string(&path).unwrap();
        assert_eq!(data.lines().count(), 1);
        assert_eq!(data.lines().next().unwrap(), HEADERS.join(","));
    }
}
