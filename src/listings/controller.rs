//! Fetch-once listing controller.
//!
//! A controller lives for one mount (one page render). It fetches the
//! snapshot once, keeps it for the rest of its life, and derives the visible
//! subset from the current filter selection on every read, so a filter
//! change never refetches. A failed fetch is recovered only by `retry`,
//! which throws away everything and fetches again.

use crate::filters::state::FilterState;
use crate::listings::client::ListingSource;
use crate::listings::engine::{filter_listings, filter_listings_at};
use crate::listings::model::Listing;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to load hackathons. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum ListingStatus {
    Loading,
    Error(String),
    Ready(Vec<Listing>),
}

/// What the list area should show.
#[derive(Debug, PartialEq)]
pub enum ListingView<'a> {
    Loading,
    Failed(&'a str),
    /// The backend has no hackathons at all.
    Empty,
    /// There are hackathons, but none pass the filters.
    NoMatches,
    Listings(Vec<&'a Listing>),
}

pub struct ListingController<'s> {
    source: &'s dyn ListingSource,
    status: ListingStatus,
    filters: FilterState,
    clock: Option<DateTime<Utc>>,
}

impl<'s> ListingController<'s> {
    pub fn new(source: &'s dyn ListingSource) -> Self {
        Self {
            source,
            status: ListingStatus::Loading,
            filters: FilterState::default(),
            clock: None,
        }
    }

    /// Evaluate date buckets against a fixed instant instead of the wall clock.
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    #[cfg(test)]
    pub fn status(&self) -> &ListingStatus {
        &self.status
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Fetch the snapshot. Mounting a controller that already fetched is a
    /// remount and reloads from scratch.
    pub fn mount(&mut self) {
        if matches!(self.status, ListingStatus::Loading) {
            self.fetch();
        } else {
            self.retry();
        }
    }

    /// Full reload: no part of a previous snapshot survives.
    pub fn retry(&mut self) {
        info!("retrying listing fetch");
        self.status = ListingStatus::Loading;
        self.fetch();
    }

    /// Swap the filter selection. The snapshot is kept; only the visible
    /// subset changes.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn visible(&self) -> Vec<&Listing> {
        match &self.status {
            ListingStatus::Ready(all) => self.filtered(all),
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> ListingView<'_> {
        match &self.status {
            ListingStatus::Loading => ListingView::Loading,
            ListingStatus::Error(msg) => ListingView::Failed(msg),
            ListingStatus::Ready(all) if all.is_empty() => ListingView::Empty,
            ListingStatus::Ready(all) => {
                let visible = self.filtered(all);
                if visible.is_empty() {
                    ListingView::NoMatches
                } else {
                    ListingView::Listings(visible)
                }
            }
        }
    }

    fn fetch(&mut self) {
        self.status = match self.source.fetch_listings() {
            Ok(listings) => ListingStatus::Ready(listings),
            Err(e) => {
                warn!(error = %e, "error fetching hackathons");
                ListingStatus::Error(FETCH_FAILED_MESSAGE.to_string())
            }
        };
    }

    fn filtered<'a>(&self, all: &'a [Listing]) -> Vec<&'a Listing> {
        match self.clock {
            Some(now) => filter_listings_at(all, &self.filters, now),
            None => filter_listings(all, &self.filters),
        }
    }
}
