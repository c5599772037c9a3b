use crate::router::handle;
use crate::tests::utils::{
    body_string, ctx_serving, get, get_with_cookie, header, post_form, session_cookie,
    set_cookies,
};
use astra::{Body, Request};
use http::Method;

fn proxied_sign_in() -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri("/auth/sign-in")
        .header("X-Auth-Request-User", "gh|1815")
        .header("X-Auth-Request-Email", "ada@example.com")
        .header("X-Auth-Request-Preferred-Username", "Ada Lovelace")
        .body(Body::empty())
        .unwrap()
}

#[test]
fn sign_in_sets_session_cookie_and_redirects() {
    let ctx = ctx_serving(vec![]);

    let resp = handle(proxied_sign_in(), &ctx).unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/");
    let set_cookie = header(&resp, "Set-Cookie");
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=604800"));
}

#[test]
fn sign_in_without_proxy_headers_is_unauthorized() {
    let ctx = ctx_serving(vec![]);
    let err = handle(get("/auth/sign-in"), &ctx).unwrap_err();
    assert_eq!(err.status(), 401);
}

#[test]
fn signed_in_user_appears_until_sign_out() {
    let ctx = ctx_serving(vec![]);
    let cookie = session_cookie(&handle(proxied_sign_in(), &ctx).unwrap());

    let body = body_string(handle(get_with_cookie("/", &cookie), &ctx).unwrap());
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains("AL"));
    assert!(body.contains("ada@example.com"));
    assert!(body.contains("Sign out"));
    assert!(body.contains("enable-notifications"));

    let resp = handle(post_form("/auth/sign-out", "", Some(cookie.as_str())), &ctx).unwrap();
    assert_eq!(resp.status(), 303);
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));

    // the old cookie no longer identifies anyone
    let body = body_string(handle(get_with_cookie("/", &cookie), &ctx).unwrap());
    assert!(!body.contains("Ada Lovelace"));
    assert!(body.contains("Sign In"));
}

#[test]
fn unknown_cookie_renders_anonymous_page() {
    let ctx = ctx_serving(vec![]);
    let body = body_string(handle(get_with_cookie("/", "session=forged"), &ctx).unwrap());
    assert!(body.contains("Sign In"));
    assert!(!body.contains("push-config"));
}

#[test]
fn sign_in_shows_a_notice_once_and_starts_enabling() {
    let ctx = ctx_serving(vec![]);
    let resp = handle(proxied_sign_in(), &ctx).unwrap();
    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 2);
    assert!(cookies[1].starts_with("flash=signed-in;"));

    let session = session_cookie(&resp);
    let both = format!("{session}; flash=signed-in");
    let resp = handle(get_with_cookie("/", &both), &ctx).unwrap();
    assert!(header(&resp, "Set-Cookie").starts_with("flash=;"));
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));

    let body = body_string(resp);
    assert!(body.contains("Signed in successfully!"));
    assert!(body.contains(r#"data-auto-enable="true""#));

    // the browser dropped the flash cookie; nothing is shown again
    let body = body_string(handle(get_with_cookie("/", &session), &ctx).unwrap());
    assert!(!body.contains("Signed in successfully!"));
    assert!(!body.contains("data-auto-enable"));
}

#[test]
fn sign_out_shows_a_notice() {
    let ctx = ctx_serving(vec![]);
    let session = session_cookie(&handle(proxied_sign_in(), &ctx).unwrap());

    let resp = handle(post_form("/auth/sign-out", "", Some(session.as_str())), &ctx).unwrap();
    let cookies = set_cookies(&resp);
    assert!(cookies[0].starts_with("session=;"));
    assert!(cookies[1].starts_with("flash=signed-out;"));

    let body = body_string(handle(get_with_cookie("/", "flash=signed-out"), &ctx).unwrap());
    assert!(body.contains("Signed out successfully!"));
    assert!(!body.contains("data-auto-enable"));
}

#[test]
fn unknown_flash_is_cleared_without_a_notice() {
    let ctx = ctx_serving(vec![]);
    let resp = handle(get_with_cookie("/", "flash=bogus"), &ctx).unwrap();
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));
    assert!(!body_string(resp).contains("successfully"));
}
