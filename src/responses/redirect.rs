use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

/// 303 so the browser follows a form POST with a GET.
pub fn see_other(location: &str) -> ResultResp {
    see_other_with_cookies(location, &[])
}

/// 303 that also sets cookies, one `Set-Cookie` header each.
pub fn see_other_with_cookies(location: &str, cookies: &[String]) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(303)
        .header("Location", location);
    for cookie in cookies {
        builder = builder.header("Set-Cookie", cookie.as_str());
    }
    builder
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
