use crate::auth::proxy::user_from_headers;
use crate::auth::{Flash, FLASH_COOKIE};
use crate::context::AppContext;
use crate::errors::ServerError;
use crate::filters::{query, FilterFormController, FilterState, RequestAddressBar};
use crate::listings::ListingController;
use crate::notifications::{BrowserReport, EnableOutcome, PushError};
use crate::responses::{
    html_response, json_response, see_other, see_other_with_cookies, text_response, ResultResp,
};
use crate::templates::pages::home::PUSH_WORKER_SCRIPT;
use crate::templates::pages::{home_page, HomeVm, PushSettings};
use astra::Request;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Read;
use tracing::{debug, info, warn};

pub const SESSION_COOKIE: &str = "session";

// Form and JSON bodies here are tiny.
const MAX_BODY_BYTES: u64 = 64 * 1024;

pub fn handle(mut req: Request, ctx: &AppContext) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => home(&req, ctx),
        ("POST", "/filters") => {
            let body = read_body(&mut req)?;
            apply_filters(&req, query::decode(&body))
        }
        ("POST", "/filters/reset") => reset_filters(&req),

        ("GET", "/auth/sign-in") => sign_in(&req, ctx),
        ("POST", "/auth/sign-out") => sign_out(&req, ctx),

        ("POST", "/notifications/enable") => {
            let body = read_body(&mut req)?;
            enable_notifications(&req, ctx, &body)
        }
        ("POST", "/api/notifications/subscribe") => {
            let body = read_body(&mut req)?;
            proxy_subscribe(ctx, &body)
        }
        ("GET", "/push-sw.js") => {
            text_response(200, &mime::APPLICATION_JAVASCRIPT, PUSH_WORKER_SCRIPT)
        }

        ("GET", "/healthz") => text_response(200, &mime::TEXT_PLAIN_UTF_8, "ok"),
        _ => Err(ServerError::NotFound),
    }
}

/// One page load: seed the filters from the address bar, fetch the
/// snapshot, render whatever subset passes.
fn home(req: &Request, ctx: &AppContext) -> ResultResp {
    let now = Utc::now();
    let token = session_token(req);
    let user = token.and_then(|t| ctx.sessions.current_user(t, now.timestamp()));
    let notifications_enabled =
        token.is_some_and(|t| ctx.sessions.notifications_enabled(t, now.timestamp()));

    // shown once, then cleared
    let flash_cookie = cookie_value(req, FLASH_COOKIE);
    let flash = flash_cookie.and_then(|v| v.parse::<Flash>().ok());
    let cookies = match flash_cookie {
        Some(_) => vec![Flash::clear_cookie()],
        None => Vec::new(),
    };

    let mut listings = ListingController::new(ctx.listings.as_ref()).with_clock(now);
    {
        let bar = RequestAddressBar::new(req.uri().query());
        let mut form = FilterFormController::new(bar, |state: &FilterState| {
            listings.set_filters(state.clone())
        });
        form.mount();
    }
    listings.mount();

    let vm = HomeVm {
        filters: listings.filters(),
        view: listings.view(),
        user: user.as_ref(),
        notifications_enabled,
        notice: flash.map(Flash::notice),
        auto_enable: flash == Some(Flash::SignedIn) && user.is_some() && !notifications_enabled,
        push: PushSettings {
            vapid_key: ctx.config.vapid_key.as_deref(),
            token_attempts: ctx.enabler.max_attempts(),
            retry_delay_ms: u64::try_from(ctx.enabler.retry_delay().as_millis())
                .unwrap_or(u64::MAX),
        },
    };
    html_response(home_page(&vm), &cookies)
}

/// The submitted fields are typed into the form one by one, then submitted.
fn apply_filters(req: &Request, edited: FilterState) -> ResultResp {
    let mut form = filter_form(req);
    form.mount();
    form.set_search_term(edited.search_term);
    form.set_location(edited.location);
    form.set_source(edited.source);
    form.set_date_range(edited.date_range);
    form.submit();
    redirect_to_navigation(form.address_bar())
}

fn reset_filters(req: &Request) -> ResultResp {
    let mut form = filter_form(req);
    form.mount();
    form.reset();
    redirect_to_navigation(form.address_bar())
}

fn filter_form(req: &Request) -> FilterFormController<RequestAddressBar, fn(&FilterState)> {
    FilterFormController::new(
        RequestAddressBar::new(req.uri().query()),
        log_filters as fn(&FilterState),
    )
}

fn log_filters(state: &FilterState) {
    debug!(
        search = %state.search_term,
        location = %state.location,
        source = %state.source,
        date_range = %state.date_range,
        "filter selection"
    );
}

fn redirect_to_navigation(bar: &RequestAddressBar) -> ResultResp {
    let target = bar.navigation().ok_or(ServerError::InternalError)?;
    info!(%target, "filters applied");
    see_other(target)
}

fn sign_in(req: &Request, ctx: &AppContext) -> ResultResp {
    let user = user_from_headers(req).ok_or_else(|| {
        ServerError::Unauthorized("Failed to sign in. Please try again.".to_string())
    })?;

    let token = ctx.sessions.sign_in(user, Utc::now().timestamp());
    let session = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        ctx.sessions.ttl_secs()
    );
    see_other_with_cookies("/", &[session, Flash::SignedIn.set_cookie()])
}

fn sign_out(req: &Request, ctx: &AppContext) -> ResultResp {
    if let Some(token) = session_token(req) {
        ctx.sessions.sign_out(token);
    }
    let expired = format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0");
    see_other_with_cookies("/", &[expired, Flash::SignedOut.set_cookie()])
}

#[derive(Serialize)]
struct EnableReply {
    enabled: bool,
    subscribed: bool,
    message: &'static str,
}

fn enable_notifications(req: &Request, ctx: &AppContext, body: &str) -> ResultResp {
    let now = Utc::now().timestamp();
    let ticket = session_token(req).and_then(|t| Some((t, ctx.sessions.begin_enable(t, now)?)));
    let Some((token, ticket)) = ticket else {
        return json_response(
            401,
            &EnableReply {
                enabled: false,
                subscribed: false,
                message: "Please sign in to enable notifications.",
            },
        );
    };

    let report = BrowserReport::from_form(body);
    let outcome = ctx.enabler.enable(&report, ctx.subscriber.as_ref());

    if !ctx.sessions.finish_enable(token, ticket, outcome.is_enabled()) {
        info!("a newer notification request superseded this one");
    }

    let subscribed = matches!(
        outcome,
        EnableOutcome::Enabled {
            subscribed: true,
            ..
        }
    );
    json_response(
        200,
        &EnableReply {
            enabled: outcome.is_enabled(),
            subscribed,
            message: outcome.notice(),
        },
    )
}

/// Same-origin pass-through to the backend's topic subscription.
fn proxy_subscribe(ctx: &AppContext, body: &str) -> ResultResp {
    let internal = || json_response(500, &json!({ "error": "Internal server error" }));

    let payload: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "subscribe request body is not JSON");
            return internal();
        }
    };

    let Some(token) = payload.get("token").and_then(Value::as_str) else {
        return json_response(400, &json!({ "error": "Missing token", "status": 400 }));
    };
    let topic = payload
        .get("topic")
        .and_then(Value::as_str)
        .unwrap_or(ctx.enabler.topic());

    match ctx.subscriber.subscribe(token, topic) {
        Ok(data) => json_response(200, &data),
        Err(PushError::Status(status)) => json_response(
            status,
            &json!({ "error": "Error subscribing to topic", "status": status }),
        ),
        Err(e) => {
            warn!(error = %e, "error in notifications subscribe proxy");
            internal()
        }
    }
}

fn session_token(req: &Request) -> Option<&str> {
    cookie_value(req, SESSION_COOKIE)
}

fn cookie_value<'r>(req: &'r Request, name: &str) -> Option<&'r str> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

fn read_body(req: &mut Request) -> Result<String, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read body: {e}")))?;

    String::from_utf8(buf).map_err(|_| ServerError::BadRequest("body is not UTF-8".into()))
}
