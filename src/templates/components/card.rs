use crate::listings::Listing;
use maud::{html, Markup};

pub fn source_badge(listing: &Listing) -> Markup {
    html! {
        span class=(format!("badge {}", listing.source_badge_class())) { (listing.source) }
    }
}

pub fn hackathon_card(listing: &Listing) -> Markup {
    html! {
        article class="card hackathon" data-id=(listing.id) {
            @if let Some(src) = &listing.image_url {
                div class="card-image" {
                    img src=(src) alt=(listing.name) loading="lazy";
                }
            }
            header class="card-header" {
                h2 { (listing.name) }
                (source_badge(listing))
            }
            @if let Some(location) = &listing.location {
                p class="location" { (location) }
            }
            div class="card-body" {
                @if let Some(description) = &listing.description {
                    p class="description" { (description) }
                }
                @if let Some(span) = listing.date_span() {
                    p class="dates" { (span) }
                }
            }
            footer {
                a class="btn primary" href=(listing.registration_link) target="_blank" rel="noopener noreferrer" {
                    "Register Now"
                }
            }
        }
    }
}
