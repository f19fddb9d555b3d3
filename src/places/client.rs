//! Call boundary to the Google Places web service.
//!
//! Two endpoints: Text Search (one listing page per call) and Place Details
//! (the full record for a single place). Requests are plain blocking GETs and
//! failures are surfaced unchanged; ranking, pagination windows, and
//! throttling are the service's contract, not this module's.

use super::types::{OpeningHours, PlaceRecord, SearchError};
use chrono::Weekday;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

/// Fields requested from the details endpoint. Keep in sync with PlaceRecord.
const DETAIL_FIELDS: &str =
    "name,formatted_address,geometry/location,formatted_phone_number,website,rating,url,opening_hours";

/// A freshly issued page token is rejected with INVALID_REQUEST until the
/// service has activated it.
const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);

// ─── Wire format ─────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
pub struct TextSearchResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceSummary>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// A listing as it appears on a text-search page. Enough to identify the
/// place and to stand in for the full record when the details call fails.
#[derive(Deserialize, Debug, Clone)]
pub struct PlaceSummary {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize, Debug)]
pub struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<PlaceDetails>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<HoursPayload>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct HoursPayload {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

/// One page of text-search results.
#[derive(Debug)]
pub struct SearchPage {
    pub summaries: Vec<PlaceSummary>,
    pub next_page_token: Option<String>,
}

// ─── Client ──────────────────────────────────────────────────────

pub struct PlacesClient {
    api_key: String,
}

impl PlacesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Fetch one text-search page: the first when `page_token` is None,
    /// otherwise the page behind the token.
    pub fn text_search(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, SearchError> {
        let mut request = ureq::get(TEXT_SEARCH_URL)
            .set("User-Agent", "mapsweep/0.3")
            .query("key", &self.api_key);
        request = match page_token {
            Some(token) => {
                std::thread::sleep(PAGE_TOKEN_DELAY);
                request.query("pagetoken", token)
            }
            None => request.query("query", query),
        };

        let response = request
            .call()
            .map_err(|e| SearchError::Network(e.to_string()))?;
        let body: TextSearchResponse = response
            .into_json()
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
        parse_search_body(body)
    }

    /// Fetch the full record for one place id.
    pub fn details(&self, place_id: &str) -> Result<PlaceDetails, SearchError> {
        let response = ureq::get(DETAILS_URL)
            .set("User-Agent", "mapsweep/0.3")
            .query("key", &self.api_key)
            .query("place_id", place_id)
            .query("fields", DETAIL_FIELDS)
            .call()
            .map_err(|e| SearchError::Network(e.to_string()))?;
        let body: DetailsResponse = response
            .into_json()
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
        parse_details_body(body)
    }
}

fn parse_search_body(body: TextSearchResponse) -> Result<SearchPage, SearchError> {
    match body.status.as_str() {
        "OK" => Ok(SearchPage {
            summaries: body.results,
            next_page_token: body.next_page_token,
        }),
        "ZERO_RESULTS" => Ok(SearchPage {
            summaries: Vec::new(),
            next_page_token: None,
        }),
        _ => Err(SearchError::Service {
            status: body.status,
            message: body.error_message,
        }),
    }
}

fn parse_details_body(body: DetailsResponse) -> Result<PlaceDetails, SearchError> {
    match body.status.as_str() {
        "OK" => Ok(body.result.unwrap_or_default()),
        _ => Err(SearchError::Service {
            status: body.status,
            message: body.error_message,
        }),
    }
}

// ─── Record shaping ──────────────────────────────────────────────

impl PlaceDetails {
    pub fn into_record(self) -> PlaceRecord {
        let location = self.geometry.map(|g| g.location);
        PlaceRecord {
            name: self.name,
            address: self.formatted_address,
            lat: location.map(|l| l.lat),
            lon: location.map(|l| l.lng),
            phone: self.formatted_phone_number,
            website: self.website,
            rating: self.rating,
            maps_url: self.url,
            hours: self.opening_hours.map(OpeningHours::from),
        }
    }
}

impl PlaceSummary {
    /// Basic record from the listing page alone, used when the details call
    /// fails. Everything the page does not carry stays absent.
    pub fn into_record(self) -> PlaceRecord {
        let location = self.geometry.map(|g| g.location);
        PlaceRecord {
            name: self.name,
            address: self.formatted_address,
            lat: location.map(|l| l.lat),
            lon: location.map(|l| l.lng),
            rating: self.rating,
            ..PlaceRecord::default()
        }
    }
}

impl From<HoursPayload> for OpeningHours {
    fn from(payload: HoursPayload) -> Self {
        Self {
            open_now: payload.open_now,
            weekday: parse_weekday_text(&payload.weekday_text),
        }
    }
}

/// Parse service weekday lines ("Monday: 9:00 AM – 5:00 PM") into a per-day
/// map. Lines that do not start with a recognizable weekday are ignored.
fn parse_weekday_text(lines: &[String]) -> HashMap<Weekday, String> {
    let mut hours = HashMap::new();
    for line in lines {
        if let Some((day, rest)) = line.split_once(':') {
            if let Ok(weekday) = day.trim().parse::<Weekday>() {
                hours.insert(weekday, rest.trim().to_string());
            }
        }
    }
    hours
}
