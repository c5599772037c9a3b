// templates/pages/home.rs

use crate::auth::User;
use crate::filters::{query, FilterState};
use crate::listings::ListingView;
use crate::templates::{desktop_layout, filter_form, hackathon_card, user_menu};
use maud::{html, Markup, PreEscaped};

pub struct HomeVm<'a> {
    pub filters: &'a FilterState,
    pub view: ListingView<'a>,
    pub user: Option<&'a User>,
    pub notifications_enabled: bool,
    /// One-shot notice, e.g. after signing in.
    pub notice: Option<&'static str>,
    /// Start the enable flow as soon as the page loads.
    pub auto_enable: bool,
    pub push: PushSettings<'a>,
}

/// Handed to the page script through data attributes.
pub struct PushSettings<'a> {
    pub vapid_key: Option<&'a str>,
    pub token_attempts: u32,
    pub retry_delay_ms: u64,
}

pub fn home_page(vm: &HomeVm) -> Markup {
    desktop_layout(
        "HackRadar - Find Hackathons",
        user_menu(vm.user, vm.notifications_enabled),
        html! {
            main {
                @if let Some(notice) = vm.notice {
                    div class="notice flash" role="status" { (notice) }
                }
                p class="intro" {
                    "Discover upcoming hackathons from Unstop, Devfolio, and Devpost all in one place."
                }
                div class="layout" {
                    aside { (filter_form(vm.filters)) }
                    section id="listings" { (listing_area(vm)) }
                }
            }
            @if vm.user.is_some() {
                div id="push-config"
                    data-vapid-key=[vm.push.vapid_key]
                    data-token-attempts=(vm.push.token_attempts)
                    data-retry-delay-ms=(vm.push.retry_delay_ms)
                    data-auto-enable=[vm.auto_enable.then_some("true")]
                    hidden {}
                script { (PreEscaped(ENABLE_SCRIPT)) }
            }
        },
    )
}

fn listing_area(vm: &HomeVm) -> Markup {
    match &vm.view {
        ListingView::Loading => html! {
            div class="notice loading" aria-busy="true" { "Loading hackathons…" }
        },
        ListingView::Failed(message) => html! {
            div class="notice error" {
                h3 { "Error" }
                p { (message) }
                // a fresh GET mounts a new controller, which refetches
                a class="btn" href=(query::href("/", vm.filters)) { "Try Again" }
            }
        },
        ListingView::Empty => html! {
            div class="notice" {
                h3 { "No Hackathons Found" }
                p { "Check back later for upcoming hackathons." }
            }
        },
        ListingView::NoMatches => html! {
            div class="notice" {
                h3 { "No Matching Hackathons" }
                p { "Try adjusting or resetting your filters." }
            }
        },
        ListingView::Listings(listings) => html! {
            p class="count" { (listings.len()) " hackathons" }
            div class="grid" {
                @for listing in listings {
                    (hackathon_card(listing))
                }
            }
        },
    }
}

/// Runs the browser half of enabling notifications: the permission prompt,
/// then up to `data-token-attempts` push-subscription attempts with a fixed
/// `data-retry-delay-ms` pause between them. The outcome, including how many
/// attempts were made, is posted back as a form.
const ENABLE_SCRIPT: &str = r#"
(function () {
  var btn = document.getElementById('enable-notifications');
  var cfg = document.getElementById('push-config');
  if (!btn || !cfg) return;
  var maxAttempts = Math.max(1, parseInt(cfg.dataset.tokenAttempts, 10) || 3);
  var delayMs = parseInt(cfg.dataset.retryDelayMs, 10) || 0;

  async function acquireToken() {
    if (!cfg.dataset.vapidKey) return '';
    var reg = await navigator.serviceWorker.register('/push-sw.js');
    await navigator.serviceWorker.ready;
    var sub = (await reg.pushManager.getSubscription()) || (await reg.pushManager.subscribe({
      userVisibleOnly: true,
      applicationServerKey: cfg.dataset.vapidKey
    }));
    return sub ? JSON.stringify(sub) : '';
  }

  async function enable() {
    var permission = 'default', token = '', attempts = 0;
    try {
      permission = await Notification.requestPermission();
    } catch (e) {
      console.error('Error requesting notification permission:', e);
    }
    if (permission === 'granted') {
      while (attempts < maxAttempts) {
        attempts += 1;
        try {
          token = await acquireToken();
        } catch (e) {
          console.error('Error getting notification token (attempt ' + attempts + '):', e);
        }
        if (token || attempts >= maxAttempts) break;
        await new Promise(function (resolve) { setTimeout(resolve, delayMs); });
      }
    }
    var resp = await fetch('/notifications/enable', {
      method: 'POST',
      body: new URLSearchParams({ permission: permission, token: token, attempts: String(attempts) })
    });
    var data = await resp.json().catch(function () {
      return { enabled: false, message: 'Failed to enable notifications. Please try again later.' };
    });
    alert(data.message);
    if (data.enabled) {
      btn.classList.add('enabled');
      btn.title = 'Notifications enabled';
    }
  }

  btn.addEventListener('click', enable);
  if (cfg.dataset.autoEnable === 'true') enable();
})();
"#;

/// Service worker that shows pushed hackathon notifications.
pub const PUSH_WORKER_SCRIPT: &str = r#"
self.addEventListener('push', function (event) {
  var data = {};
  try { data = event.data ? event.data.json() : {}; } catch (e) {}
  var n = data.notification || data;
  event.waitUntil(self.registration.showNotification(n.title || 'New Hackathon Notification', {
    body: n.body || 'Check out the latest hackathons!',
    tag: 'hackathon-notification',
    data: data.data || {}
  }));
});
self.addEventListener('notificationclick', function (event) {
  event.notification.close();
  var link = (event.notification.data && event.notification.data.link) || '/';
  event.waitUntil(clients.openWindow(link));
});
"#;
