//! In-memory listing filter.
//!
//! Narrows a fetched listing snapshot down to what the current filter
//! selection admits. Four independent rules must all pass:
//!
//! - **text**: case-insensitive substring of the name or description
//! - **location**: exact match, plus the `"Online | <city>"` aliases
//! - **platform**: exact match on the source tag
//! - **date bucket**: start date against one instant of "now"
//!
//! Output keeps input order. Nothing is mutated.

use crate::filters::state::{DateRange, FilterState, Location, Platform};
use crate::listings::model::Listing;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};

/// Prefix the scrapers use for online events that also name a city.
pub const ONLINE_PREFIX: &str = "Online |";

/// Filter with "now" taken once for the whole pass.
pub fn filter_listings<'a>(listings: &'a [Listing], state: &FilterState) -> Vec<&'a Listing> {
    filter_listings_at(listings, state, Utc::now())
}

pub fn filter_listings_at<'a>(
    listings: &'a [Listing],
    state: &FilterState,
    now: DateTime<Utc>,
) -> Vec<&'a Listing> {
    let filter = ListingFilter::new(state, now);
    listings.iter().filter(|l| filter.admits(l)).collect()
}

/// A filter selection compiled against a fixed instant.
#[derive(Debug, Clone)]
pub struct ListingFilter {
    needle: Option<String>,
    location: Location,
    source: Platform,
    window: DateWindow,
}

impl ListingFilter {
    pub fn new(state: &FilterState, now: DateTime<Utc>) -> Self {
        let needle = if state.search_term.is_empty() {
            None
        } else {
            Some(state.search_term.to_lowercase())
        };

        Self {
            needle,
            location: state.location,
            source: state.source,
            window: DateWindow::new(state.date_range, now),
        }
    }

    pub fn admits(&self, listing: &Listing) -> bool {
        self.matches_text(listing)
            && location_matches(self.location, listing.location.as_deref())
            && self.matches_source(listing)
            && self.window.admits(listing.start_date)
    }

    fn matches_text(&self, listing: &Listing) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        listing.name.to_lowercase().contains(needle)
            || listing
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    fn matches_source(&self, listing: &Listing) -> bool {
        self.source == Platform::AllPlatforms || listing.source == self.source.as_str()
    }
}

fn location_matches(filter: Location, listing_location: Option<&str>) -> bool {
    if filter == Location::AllLocations {
        return true;
    }
    let Some(location) = listing_location else {
        return false;
    };

    let wanted = filter.as_str();
    if location == wanted {
        return true;
    }

    if filter == Location::Online {
        location.starts_with(ONLINE_PREFIX)
    } else {
        location.contains(wanted)
    }
}

/// Admissible start dates for a bucket. Ranges are half-open: `[from, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateWindow {
    Any,
    After(DateTime<Utc>),
    AtOrBefore(DateTime<Utc>),
    Between {
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    },
}

impl DateWindow {
    fn new(range: DateRange, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let bounded = |from: DateTime<Utc>, until: Option<NaiveDate>| match until {
            Some(until) => DateWindow::Between {
                from,
                until: start_of(until),
            },
            None => DateWindow::After(from),
        };

        match range {
            DateRange::AnyTime => DateWindow::Any,
            DateRange::Upcoming => DateWindow::After(now),
            DateRange::PastEvents => DateWindow::AtOrBefore(now),
            DateRange::ThisWeek => bounded(now, start_of_next_week(today)),
            DateRange::ThisMonth => bounded(now, first_of_month_after(today, 1)),
            DateRange::NextMonth => match (
                first_of_month_after(today, 1),
                first_of_month_after(today, 2),
            ) {
                (Some(from), Some(until)) => DateWindow::Between {
                    from: start_of(from),
                    until: start_of(until),
                },
                (Some(from), None) => DateWindow::After(start_of(from)),
                _ => DateWindow::Any,
            },
        }
    }

    /// Listings without a start date pass every bucket.
    fn admits(&self, start: Option<DateTime<Utc>>) -> bool {
        let Some(start) = start else {
            return true;
        };

        match *self {
            DateWindow::Any => true,
            DateWindow::After(now) => start > now,
            DateWindow::AtOrBefore(now) => start <= now,
            DateWindow::Between { from, until } => start >= from && start < until,
        }
    }
}

fn start_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Monday after `today`: ISO weeks end on Sunday.
fn start_of_next_week(today: NaiveDate) -> Option<NaiveDate> {
    let days_left = 7 - u64::from(today.weekday().num_days_from_monday());
    today.checked_add_days(Days::new(days_left))
}

fn first_of_month_after(today: NaiveDate, months: u32) -> Option<NaiveDate> {
    today
        .with_day(1)?
        .checked_add_months(Months::new(months))
}
