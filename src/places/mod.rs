//! Place search subsystem.
//!
//! Result ranking, pagination windows, and throttling all live inside the
//! Places web service; this subsystem owns the call boundary and the shaping
//! of responses into `PlaceRecord` values.

pub mod client;
pub mod invoker;
pub mod types;

pub use client::PlacesClient;
pub use invoker::{format_location_query, SearchInvoker};
pub use types::{OpeningHours, PlaceRecord, SearchError, SearchParams};
