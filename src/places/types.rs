//! Core types for the place search subsystem.

use chrono::Weekday;
use std::collections::HashMap;
use std::fmt;

/// One Google Maps listing with its available fields.
///
/// Every field the service may omit is optional; absent values stay absent
/// and render as empty CSV cells, never as fabricated data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceRecord {
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    /// Link back to the listing on Google Maps.
    pub maps_url: Option<String>,
    pub hours: Option<OpeningHours>,
}

/// Opening hours: the live open/closed flag plus one line per weekday.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    pub weekday: HashMap<Weekday, String>,
}

/// Search parameters handed to the invoker.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub zip: Option<String>,
    /// Radius in miles around the ZIP code. Only meaningful with `zip`.
    pub distance: Option<u32>,
    pub max_results: usize,
    pub page: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            zip: None,
            distance: None,
            max_results: 20,
            page: 1,
        }
    }
}

/// Search errors.
#[derive(Debug)]
pub enum SearchError {
    MissingApiKey,
    Network(String),
    InvalidResponse(String),
    /// The service answered with a non-OK status of its own.
    Service {
        status: String,
        message: Option<String>,
    },
    /// The service failed mid-walk after some records were collected.
    /// The caller gets the records it already has plus the cause.
    Interrupted {
        records: Vec<PlaceRecord>,
        cause: Box<SearchError>,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "No API key configured. Pass --api-key, set {}, or put {{\"api_key\": \"...\"}} in ~/.mapsweep/config.json",
                crate::config::API_KEY_ENV,
            ),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid service response: {}", msg),
            Self::Service { status, message } => match message {
                Some(msg) => write!(f, "Service error {}: {}", status, msg),
                None => write!(f, "Service error {}", status),
            },
            Self::Interrupted { records, cause } => write!(
                f,
                "Search interrupted after {} record(s): {}",
                records.len(),
                cause,
            ),
        }
    }
}

impl std::error::Error for SearchError {}
