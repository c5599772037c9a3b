use crate::filters::query::{DATE_RANGE_KEY, LOCATION_KEY, SEARCH_KEY, SOURCE_KEY};
use crate::filters::{DateRange, FilterState, Location, Platform};
use maud::{html, Markup};

/// The filter sidebar. Field names are the query keys, so the POST body
/// decodes with the same codec as the address bar.
pub fn filter_form(state: &FilterState) -> Markup {
    html! {
        section class="card filters" {
            h2 { "Filter Hackathons" }
            form method="post" action="/filters" {
                label for="search" { "Search" }
                input
                    type="search"
                    id="search"
                    name=(SEARCH_KEY)
                    placeholder="Search hackathons..."
                    value=(state.search_term);

                label for="location" { "Location" }
                select id="location" name=(LOCATION_KEY) {
                    @for loc in Location::ALL {
                        option value=(loc.as_str()) selected[loc == state.location] { (loc.label()) }
                    }
                }

                label for="source" { "Platform" }
                select id="source" name=(SOURCE_KEY) {
                    @for platform in Platform::ALL {
                        option value=(platform.as_str()) selected[platform == state.source] { (platform.label()) }
                    }
                }

                label for="date-range" { "Date Range" }
                select id="date-range" name=(DATE_RANGE_KEY) {
                    @for range in DateRange::ALL {
                        option value=(range.as_str()) selected[range == state.date_range] { (range.label()) }
                    }
                }

                div class="actions" {
                    button type="submit" class="primary" { "Apply Filters" }
                    button type="submit" formaction="/filters/reset" { "Reset Filters" }
                }
            }
        }
    }
}
