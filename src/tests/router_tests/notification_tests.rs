use crate::config::AppConfig;
use crate::context::AppContext;
use crate::notifications::PushError;
use crate::router::handle;
use crate::tests::utils::{
    body_string, ctx_serving, get, header, post_form, post_json, session_cookie, test_ctx,
    FakeListings, FakeSubscriber,
};
use astra::Body;
use http::Method;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn signed_in_cookie(ctx: &crate::context::AppContext) -> String {
    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/auth/sign-in")
        .header("X-Auth-Request-User", "gh|42")
        .body(Body::empty())
        .unwrap();
    session_cookie(&handle(req, ctx).unwrap())
}

fn json_body(resp: astra::Response) -> Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}

fn ctx_with(subscriber: FakeSubscriber) -> (crate::context::AppContext, Arc<FakeSubscriber>) {
    let subscriber = Arc::new(subscriber);
    let ctx = test_ctx(
        Arc::new(FakeListings::serving(vec![])),
        subscriber.clone(),
    );
    (ctx, subscriber)
}

#[test]
fn enable_requires_a_session() {
    let ctx = ctx_serving(vec![]);
    let resp = handle(
        post_form("/notifications/enable", "permission=granted&token=t", None),
        &ctx,
    )
    .unwrap();

    assert_eq!(resp.status(), 401);
    let body = json_body(resp);
    assert_eq!(body["enabled"], false);
    assert_eq!(body["message"], "Please sign in to enable notifications.");
}

#[test]
fn granted_with_token_subscribes_to_topic() {
    let (ctx, subscriber) = ctx_with(FakeSubscriber::default());
    let cookie = signed_in_cookie(&ctx);

    let resp = handle(
        post_form(
            "/notifications/enable",
            "permission=granted&token=fcm-123",
            Some(cookie.as_str()),
        ),
        &ctx,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(header(&resp, "Content-Type").starts_with("application/json"));
    let body = json_body(resp);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["subscribed"], true);
    assert_eq!(body["message"], "Notifications enabled!");
    assert_eq!(
        subscriber.calls.lock().unwrap().as_slice(),
        &[("fcm-123".to_string(), "new_hackathons".to_string())]
    );

    // the bell shows as enabled on the next page load
    let page = http::Request::builder()
        .uri("/")
        .header("Cookie", cookie.as_str())
        .body(Body::empty())
        .unwrap();
    let html = body_string(handle(page, &ctx).unwrap());
    assert!(html.contains(r#"class="btn icon enabled""#));
}

#[test]
fn denied_permission_reports_failure_without_subscribing() {
    let (ctx, subscriber) = ctx_with(FakeSubscriber::default());
    let cookie = signed_in_cookie(&ctx);

    let resp = handle(
        post_form("/notifications/enable", "permission=denied", Some(cookie.as_str())),
        &ctx,
    )
    .unwrap();

    let body = json_body(resp);
    assert_eq!(body["enabled"], false);
    assert_eq!(
        body["message"],
        "Failed to enable notifications. Please try again later."
    );
    assert!(subscriber.calls.lock().unwrap().is_empty());
}

#[test]
fn missing_token_after_retries_reports_failure() {
    let (ctx, subscriber) = ctx_with(FakeSubscriber::default());
    let cookie = signed_in_cookie(&ctx);

    let resp = handle(
        post_form("/notifications/enable", "permission=granted&token=", Some(cookie.as_str())),
        &ctx,
    )
    .unwrap();

    assert_eq!(json_body(resp)["enabled"], false);
    assert!(subscriber.calls.lock().unwrap().is_empty());
}

#[test]
fn tokenless_report_answers_without_waiting_out_retries() {
    // default config: 3 attempts, 1s apart
    let config = AppConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config.notifications.retry_delay, Duration::from_millis(1000));
    let subscriber = Arc::new(FakeSubscriber::default());
    let ctx = AppContext::new(
        config,
        Arc::new(FakeListings::serving(vec![])),
        subscriber.clone(),
    );
    let cookie = signed_in_cookie(&ctx);

    let start = Instant::now();
    let resp = handle(
        post_form(
            "/notifications/enable",
            "permission=granted&token=&attempts=3",
            Some(cookie.as_str()),
        ),
        &ctx,
    )
    .unwrap();

    assert!(start.elapsed() < Duration::from_millis(500));
    assert_eq!(json_body(resp)["enabled"], false);
    assert!(subscriber.calls.lock().unwrap().is_empty());
}

#[test]
fn token_found_on_a_later_attempt_is_accepted() {
    let (ctx, subscriber) = ctx_with(FakeSubscriber::default());
    let cookie = signed_in_cookie(&ctx);

    let resp = handle(
        post_form(
            "/notifications/enable",
            "permission=granted&token=fcm-9&attempts=2",
            Some(cookie.as_str()),
        ),
        &ctx,
    )
    .unwrap();

    assert_eq!(json_body(resp)["enabled"], true);
    assert_eq!(subscriber.calls.lock().unwrap().len(), 1);
}

#[test]
fn page_receives_the_retry_policy() {
    let ctx = ctx_serving(vec![]);
    let cookie = signed_in_cookie(&ctx);
    let html = body_string(handle(crate::tests::utils::get_with_cookie("/", &cookie), &ctx).unwrap());

    assert!(html.contains(r#"data-token-attempts="3""#));
    assert!(html.contains(r#"data-retry-delay-ms="0""#));
}

#[test]
fn topic_failure_still_counts_as_enabled() {
    let (ctx, _) = ctx_with(FakeSubscriber {
        fail_with: Some(PushError::Status(500)),
        ..Default::default()
    });
    let cookie = signed_in_cookie(&ctx);

    let resp = handle(
        post_form("/notifications/enable", "permission=granted&token=t", Some(cookie.as_str())),
        &ctx,
    )
    .unwrap();

    let body = json_body(resp);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["subscribed"], false);
}

#[test]
fn proxy_forwards_token_and_topic() {
    let (ctx, subscriber) = ctx_with(FakeSubscriber::default());

    let resp = handle(
        post_json(
            "/api/notifications/subscribe",
            r#"{"token":"abc","topic":"weekly"}"#,
        ),
        &ctx,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(json_body(resp)["success"], true);
    assert_eq!(
        subscriber.calls.lock().unwrap().as_slice(),
        &[("abc".to_string(), "weekly".to_string())]
    );
}

#[test]
fn proxy_passes_backend_status_through() {
    let (ctx, _) = ctx_with(FakeSubscriber {
        fail_with: Some(PushError::Status(503)),
        ..Default::default()
    });

    let resp = handle(
        post_json("/api/notifications/subscribe", r#"{"token":"abc"}"#),
        &ctx,
    )
    .unwrap();

    assert_eq!(resp.status(), 503);
    let body = json_body(resp);
    assert_eq!(body["error"], "Error subscribing to topic");
    assert_eq!(body["status"], 503);
}

#[test]
fn proxy_hides_transport_failures_behind_500() {
    let (ctx, _) = ctx_with(FakeSubscriber {
        fail_with: Some(PushError::Transport("connection refused".into())),
        ..Default::default()
    });

    let resp = handle(
        post_json("/api/notifications/subscribe", r#"{"token":"abc"}"#),
        &ctx,
    )
    .unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(json_body(resp)["error"], "Internal server error");

    let resp = handle(post_json("/api/notifications/subscribe", "not json"), &ctx).unwrap();
    assert_eq!(resp.status(), 500);
}

#[test]
fn service_worker_is_served_as_javascript() {
    let ctx = ctx_serving(vec![]);
    let resp = handle(get("/push-sw.js"), &ctx).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(header(&resp, "Content-Type").contains("javascript"));
    assert!(body_string(resp).contains("showNotification"));
}
