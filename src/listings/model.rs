use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One hackathon as served by the backend's `GET /hackathons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    pub registration_link: String,
    pub source: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Listing {
    /// "Jun 15, 2024", or "TBA" when the date is unknown.
    pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
        match date {
            Some(d) => d.format("%b %-d, %Y").to_string(),
            None => "TBA".to_string(),
        }
    }

    pub fn date_span(&self) -> Option<String> {
        let start = self.start_date.as_ref()?;
        let mut span = Self::format_date(Some(start));
        if let Some(end) = &self.end_date {
            span.push_str(" - ");
            span.push_str(&Self::format_date(Some(end)));
        }
        Some(span)
    }

    /// Badge colour classes per platform.
    pub fn source_badge_class(&self) -> &'static str {
        match self.source.to_lowercase().as_str() {
            "unstop" => "bg-blue-100 text-blue-800",
            "devfolio" => "bg-green-100 text-green-800",
            "devpost" => "bg-purple-100 text-purple-800",
            _ => "bg-gray-100 text-gray-800",
        }
    }
}

/// Accepts RFC 3339, a naive ISO-8601 date-time (taken as UTC, which is what
/// the backend stores), or a bare date. Anything else, including numbers and
/// objects, becomes `None` instead of failing the whole listing array.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => parse_timestamp(&s),
        _ => None,
    })
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
