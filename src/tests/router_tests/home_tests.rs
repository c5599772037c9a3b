use crate::router::handle;
use crate::tests::utils::{
    body_string, ctx_serving, get, header, listing, starting_in, test_ctx, FakeListings,
    FakeSubscriber,
};
use std::sync::Arc;

#[test]
fn home_lists_every_hackathon_without_filters() {
    let ctx = ctx_serving(vec![
        listing(1, "RustConf Hack", "Devpost"),
        listing(2, "Mumbai Makers", "Unstop"),
    ]);

    let resp = handle(get("/"), &ctx).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(header(&resp, "Content-Type").starts_with("text/html"));

    let body = body_string(resp);
    assert!(body.contains("RustConf Hack"));
    assert!(body.contains("Mumbai Makers"));
    assert!(body.contains("Register Now"));
    assert!(body.contains("Sign In"));
}

#[test]
fn source_query_filters_listings_and_selects_option() {
    let ctx = ctx_serving(vec![
        listing(1, "RustConf Hack", "Devpost"),
        listing(2, "Mumbai Makers", "Unstop"),
    ]);

    let body = body_string(handle(get("/?source=Devpost"), &ctx).unwrap());

    assert!(body.contains("RustConf Hack"));
    assert!(!body.contains("Mumbai Makers"));
    assert!(body.contains(r#"<option value="Devpost" selected>"#));
}

#[test]
fn search_and_date_range_combine() {
    let mut online = listing(1, "AI Sprint", "Devfolio");
    online.location = Some("Online | Worldwide".into());
    let ctx = ctx_serving(vec![
        starting_in(online, 10),
        starting_in(listing(2, "AI Retro", "Devfolio"), -10),
        starting_in(listing(3, "Web Jam", "Devfolio"), 10),
    ]);

    let body = body_string(handle(get("/?search=ai&dateRange=upcoming"), &ctx).unwrap());

    assert!(body.contains("AI Sprint"));
    assert!(!body.contains("AI Retro"));
    assert!(!body.contains("Web Jam"));
    assert!(body.contains(r#"value="ai""#));
}

#[test]
fn unknown_query_values_fall_back_to_defaults() {
    let ctx = ctx_serving(vec![listing(1, "RustConf Hack", "Devpost")]);

    let body = body_string(handle(get("/?source=Myspace&location=Mars&x=1"), &ctx).unwrap());

    assert!(body.contains("RustConf Hack"));
    assert!(body.contains(r#"<option value="all-platforms" selected>"#));
    assert!(body.contains(r#"<option value="all-locations" selected>"#));
}

#[test]
fn no_matches_is_distinct_from_empty_backend() {
    let ctx = ctx_serving(vec![listing(1, "RustConf Hack", "Devpost")]);
    let body = body_string(handle(get("/?source=Unstop"), &ctx).unwrap());
    assert!(body.contains("No Matching Hackathons"));

    let ctx = ctx_serving(vec![]);
    let body = body_string(handle(get("/"), &ctx).unwrap());
    assert!(body.contains("No Hackathons Found"));
}

#[test]
fn failing_backend_renders_error_with_retry_link() {
    let source = Arc::new(FakeListings::failing(503));
    let ctx = test_ctx(source.clone(), Arc::new(FakeSubscriber::default()));

    let resp = handle(get("/?source=Devpost"), &ctx).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Failed to load hackathons. Please try again later."));
    assert!(body.contains("Try Again"));
    assert!(body.contains(r#"href="/?source=Devpost""#));
    assert_eq!(*source.calls.lock().unwrap(), 1);
}

#[test]
fn each_page_load_fetches_once() {
    let source = Arc::new(FakeListings::serving(vec![listing(1, "A", "Devpost")]));
    let ctx = test_ctx(source.clone(), Arc::new(FakeSubscriber::default()));

    handle(get("/"), &ctx).unwrap();
    handle(get("/?source=Devpost"), &ctx).unwrap();

    assert_eq!(*source.calls.lock().unwrap(), 2);
}

#[test]
fn unknown_route_is_not_found() {
    let ctx = ctx_serving(vec![]);
    let err = handle(get("/does-not-exist"), &ctx).unwrap_err();
    assert_eq!(err.status(), 404);
}

#[test]
fn health_check_answers_ok() {
    let ctx = ctx_serving(vec![]);
    let resp = handle(get("/healthz"), &ctx).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(resp), "ok");
}
