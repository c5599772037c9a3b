use crate::auth::User;
use maud::{html, Markup};

pub fn user_menu(user: Option<&User>, notifications_enabled: bool) -> Markup {
    let Some(user) = user else {
        return html! {
            a href="/auth/sign-in" class="btn" { "Sign In" }
        };
    };

    html! {
        div class="user-menu" {
            button #enable-notifications .btn .icon .enabled[notifications_enabled]
                type="button"
                title=(if notifications_enabled { "Notifications enabled" } else { "Enable notifications" })
            {
                @if notifications_enabled { "🔔" } @else { "🔕" }
            }

            details class="profile" {
                summary {
                    @if let Some(photo) = &user.photo_url {
                        img class="avatar" src=(photo) alt=(user.display_label());
                    } @else {
                        span class="avatar" { (user.initials()) }
                    }
                    span class="name" { (user.display_label()) }
                }
                div class="menu" {
                    @if let Some(name) = &user.display_name {
                        strong { (name) }
                    }
                    @if let Some(email) = &user.email {
                        small { (email) }
                    }
                    form method="post" action="/auth/sign-out" {
                        button type="submit" class="danger" { "Sign out" }
                    }
                }
            }
        }
    }
}
