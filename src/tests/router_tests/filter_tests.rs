use crate::router::handle;
use crate::tests::utils::{ctx_serving, header, post_form};

#[test]
fn apply_redirects_to_canonical_query() {
    let ctx = ctx_serving(vec![]);

    let req = post_form(
        "/filters",
        "search=ai+ml&location=all-locations&source=Devpost&dateRange=any-time",
        None,
    );
    let resp = handle(req, &ctx).unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/?search=ai+ml&source=Devpost");
}

#[test]
fn applying_defaults_redirects_to_bare_path() {
    let ctx = ctx_serving(vec![]);

    let req = post_form(
        "/filters",
        "search=&location=all-locations&source=all-platforms&dateRange=any-time",
        None,
    );
    let resp = handle(req, &ctx).unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/");
}

#[test]
fn reset_redirects_home() {
    let ctx = ctx_serving(vec![]);
    let resp = handle(post_form("/filters/reset", "source=Devpost", None), &ctx).unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/");
}
