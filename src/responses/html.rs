use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use maud::Markup;

/// 200 page, plus one `Set-Cookie` header per entry in `cookies`.
pub fn html_response(markup: Markup, cookies: &[String]) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref());
    for cookie in cookies {
        builder = builder.header("Set-Cookie", cookie.as_str());
    }
    builder
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}
