//! Query-string codec for `FilterState`.
//!
//! Only fields that differ from their default are written, so the default
//! selection is the empty query and every selection has exactly one
//! canonical encoding. Decoding never fails: a missing or unrecognised value
//! falls back to that field's default.

use crate::filters::state::{DateRange, FilterState, Location, Platform};
use url::form_urlencoded;

pub const SEARCH_KEY: &str = "search";
pub const LOCATION_KEY: &str = "location";
pub const SOURCE_KEY: &str = "source";
pub const DATE_RANGE_KEY: &str = "dateRange";

pub fn encode(state: &FilterState) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if !state.search_term.is_empty() {
        query.append_pair(SEARCH_KEY, &state.search_term);
    }
    if state.location != Default::default() {
        query.append_pair(LOCATION_KEY, state.location.as_str());
    }
    if state.source != Default::default() {
        query.append_pair(SOURCE_KEY, state.source.as_str());
    }
    if state.date_range != Default::default() {
        query.append_pair(DATE_RANGE_KEY, state.date_range.as_str());
    }

    query.finish()
}

/// First occurrence of a key decides its field; later repeats are ignored.
pub fn decode(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut search: Option<String> = None;
    let mut location: Option<Option<Location>> = None;
    let mut source: Option<Option<Platform>> = None;
    let mut date_range: Option<Option<DateRange>> = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            SEARCH_KEY if search.is_none() => search = Some(value.into_owned()),
            LOCATION_KEY if location.is_none() => location = Some(value.parse().ok()),
            SOURCE_KEY if source.is_none() => source = Some(value.parse().ok()),
            DATE_RANGE_KEY if date_range.is_none() => date_range = Some(value.parse().ok()),
            _ => {}
        }
    }

    FilterState {
        search_term: search.unwrap_or_default(),
        location: location.flatten().unwrap_or_default(),
        source: source.flatten().unwrap_or_default(),
        date_range: date_range.flatten().unwrap_or_default(),
    }
}

/// Navigation target for `state` on `path`: bare path when nothing is filtered.
pub fn href(path: &str, state: &FilterState) -> String {
    if state.is_default() {
        return path.to_string();
    }
    format!("{path}?{}", encode(state))
}
