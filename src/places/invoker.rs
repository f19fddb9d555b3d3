//! Search invoker — drives the service calls for one CLI invocation.
//!
//! Flow: format the effective query → walk text-search pages to the requested
//! page → collect summaries until max-results → hydrate each summary via the
//! details call. A failed details call degrades that one place to its summary
//! fields; a failed page fetch after records were collected surfaces as
//! `SearchError::Interrupted` carrying what was already gathered.

use super::client::{PlaceSummary, PlacesClient};
use super::types::{PlaceRecord, SearchError, SearchParams};

pub struct SearchInvoker {
    client: PlacesClient,
}

impl SearchInvoker {
    pub fn new(client: PlacesClient) -> Self {
        Self { client }
    }

    /// Run one search and return the records in service order.
    ///
    /// Zero results is `Ok(vec![])`. A failure before anything was collected
    /// is the plain error; a failure after partial collection is
    /// `SearchError::Interrupted`.
    pub fn search(&self, params: &SearchParams) -> Result<Vec<PlaceRecord>, SearchError> {
        let query =
            format_location_query(&params.query, params.zip.as_deref(), params.distance);
        eprintln!("Searching for: {}", query);
        eprintln!("Please wait, this may take a moment...");

        let (summaries, walk_error) = self.collect_summaries(&query, params);
        if summaries.is_empty() {
            return match walk_error {
                Some(cause) => Err(cause),
                None => Ok(Vec::new()),
            };
        }

        let records = self.hydrate(summaries);
        match walk_error {
            Some(cause) => Err(SearchError::Interrupted {
                records,
                cause: Box::new(cause),
            }),
            None => Ok(records),
        }
    }

    /// Gather listing summaries for the requested page window. Returns what
    /// was collected plus the error that stopped the walk, if any.
    fn collect_summaries(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> (Vec<PlaceSummary>, Option<SearchError>) {
        let mut token: Option<String> = None;

        // Walk forward to the requested page. A page past the end of the
        // token chain is an empty result set, not an error.
        for _ in 1..params.page {
            match self.client.text_search(query, token.as_deref()) {
                Ok(page) => match page.next_page_token {
                    Some(next) => token = Some(next),
                    None => return (Vec::new(), None),
                },
                Err(e) => return (Vec::new(), Some(e)),
            }
        }

        let mut summaries = Vec::new();
        loop {
            let page = match self.client.text_search(query, token.as_deref()) {
                Ok(page) => page,
                Err(e) => return (summaries, Some(e)),
            };
            summaries.extend(page.summaries);
            if summaries.len() >= params.max_results {
                summaries.truncate(params.max_results);
                return (summaries, None);
            }
            match page.next_page_token {
                Some(next) => token = Some(next),
                None => return (summaries, None),
            }
        }
    }

    fn hydrate(&self, summaries: Vec<PlaceSummary>) -> Vec<PlaceRecord> {
        let total = summaries.len();
        let mut records = Vec::with_capacity(total);
        for (i, summary) in summaries.into_iter().enumerate() {
            eprintln!("Processing result {}/{}...", i + 1, total);
            let record = match summary.place_id.clone() {
                Some(place_id) => match self.client.details(&place_id) {
                    Ok(details) => details.into_record(),
                    Err(e) => {
                        eprintln!(
                            "Warning: could not get full details for result {}: {}",
                            i + 1,
                            e,
                        );
                        summary.into_record()
                    }
                },
                None => summary.into_record(),
            };
            records.push(record);
        }
        records
    }
}

/// Fold the ZIP/distance filters into the query text.
///
/// The service takes location context as free text, so:
/// zip only → "{query} near {zip}", zip + distance →
/// "{query} within {distance} miles of {zip}".
pub fn format_location_query(query: &str, zip: Option<&str>, distance: Option<u32>) -> String {
    match (zip, distance) {
        (Some(zip), Some(distance)) => {
            format!("{} within {} miles of {}", query, distance, zip)
        }
        (Some(zip), None) => format!("{} near {}", query, zip),
        _ => query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_plain_query() {
        assert_eq!(format_location_query("coffee shops", None, None), "coffee shops");
    }

    #[test]
    fn test_format_query_with_zip() {
        assert_eq!(
            format_location_query("restaurants", Some("10001"), None),
            "restaurants near 10001",
        );
    }

    #[test]
    fn test_format_query_with_zip_and_distance() {
        assert_eq!(
            format_location_query("hiking trails", Some("94025"), Some(10)),
            "hiking trails within 10 miles of 94025",
        );
    }

    #[test]
    fn test_format_query_distance_without_zip_is_ignored() {
        // The CLI rejects this combination before it gets here.
        assert_eq!(format_location_query("pizza", None, Some(5)), "pizza");
    }

    #[test]
    fn test_default_params() {
        let params = SearchParams::default();
        assert_eq!(params.max_results, 20);
        assert_eq!(params.page, 1);
        assert!(params.zip.is_none());
    }
}
