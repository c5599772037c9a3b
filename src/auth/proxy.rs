// src/auth/proxy.rs
use crate::auth::identity::User;
use astra::Request;

pub const USER_HEADER: &str = "x-auth-request-user";
pub const EMAIL_HEADER: &str = "x-auth-request-email";
pub const NAME_HEADER: &str = "x-auth-request-preferred-username";
pub const AVATAR_HEADER: &str = "x-auth-request-avatar";

/// Identity asserted by the authenticating proxy in front of us.
/// `None` when the request did not pass through it.
pub fn user_from_headers(req: &Request) -> Option<User> {
    let uid = header(req, USER_HEADER)?;

    Some(User {
        uid,
        display_name: header(req, NAME_HEADER),
        email: header(req, EMAIL_HEADER),
        photo_url: header(req, AVATAR_HEADER),
    })
}

fn header(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
