//! The filter selection shown in the sidebar form and mirrored in the URL.
//!
//! Every enumerated field is a closed Rust enum with a "no constraint"
//! variant as its default, so a `FilterState` can never hold a value outside
//! its domain. The wire strings are the ones the page form submits and the
//! query string carries.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} value: {value:?}")]
pub struct UnknownFilterValue {
    pub field: &'static str,
    pub value: String,
}

impl UnknownFilterValue {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Location {
    #[default]
    AllLocations,
    Mumbai,
    Delhi,
    Bangalore,
    Online,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::AllLocations,
        Location::Mumbai,
        Location::Delhi,
        Location::Bangalore,
        Location::Online,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Location::AllLocations => "all-locations",
            Location::Mumbai => "Mumbai",
            Location::Delhi => "Delhi",
            Location::Bangalore => "Bangalore",
            Location::Online => "Online",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Location::AllLocations => "All Locations",
            other => other.as_str(),
        }
    }
}

impl FromStr for Location {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownFilterValue::new("location", s))
    }
}

/// Platform a hackathon was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    #[default]
    AllPlatforms,
    Unstop,
    Devfolio,
    Devpost,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::AllPlatforms,
        Platform::Unstop,
        Platform::Devfolio,
        Platform::Devpost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::AllPlatforms => "all-platforms",
            Platform::Unstop => "Unstop",
            Platform::Devfolio => "Devfolio",
            Platform::Devpost => "Devpost",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::AllPlatforms => "All Platforms",
            other => other.as_str(),
        }
    }
}

impl FromStr for Platform {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownFilterValue::new("source", s))
    }
}

/// Date bucket a listing's start date is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateRange {
    #[default]
    AnyTime,
    Upcoming,
    PastEvents,
    ThisWeek,
    ThisMonth,
    NextMonth,
}

impl DateRange {
    pub const ALL: [DateRange; 6] = [
        DateRange::AnyTime,
        DateRange::Upcoming,
        DateRange::PastEvents,
        DateRange::ThisWeek,
        DateRange::ThisMonth,
        DateRange::NextMonth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::AnyTime => "any-time",
            DateRange::Upcoming => "upcoming",
            DateRange::PastEvents => "past-events",
            DateRange::ThisWeek => "this-week",
            DateRange::ThisMonth => "this-month",
            DateRange::NextMonth => "next-month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateRange::AnyTime => "Any Time",
            DateRange::Upcoming => "Upcoming",
            DateRange::PastEvents => "Past Events",
            DateRange::ThisWeek => "This Week",
            DateRange::ThisMonth => "This Month",
            DateRange::NextMonth => "Next Month",
        }
    }
}

impl FromStr for DateRange {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRange::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownFilterValue::new("dateRange", s))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete filter selection. `Default` is the "show everything" state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    pub location: Location,
    pub source: Platform,
    pub date_range: DateRange,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}
