//! Defines functions for storing the backend API token in a private cookie.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, api::ApiToken, auth::token::Token};

pub(crate) const COOKIE_TOKEN: &str = "token";
/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);
/// How long the auth cookie lasts if the user selects "remember me" at log-in.
pub const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);

/// Add an auth cookie holding `api_token` to the cookie jar.
///
/// Sets the initial expiry of the cookie to `duration` from the current time.
///
/// # Errors
///
/// Returns:
/// - [Error::DateError] if adding `duration` to the current time overflows.
/// - [Error::JSONSerializationError] if the token could not be serialized.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    api_token: ApiToken,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expires_at = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or(Error::DateError)?;

    set_auth_cookie_expiry(jar, api_token, expires_at)
}

fn set_auth_cookie_expiry(
    jar: PrivateCookieJar,
    api_token: ApiToken,
    expires_at: OffsetDateTime,
) -> Result<PrivateCookieJar, Error> {
    let token_string = Token {
        api_token,
        expires_at,
    }
    .to_cookie_value()?;

    Ok(jar.add(
        Cookie::build((COOKIE_TOKEN, token_string))
            .expires(expires_at)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(removal_cookie())
}

/// An auth cookie that deletes the client's copy when sent in a response.
///
/// The value is never read back, so it does not need to go through a private jar.
pub(crate) fn removal_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_TOKEN, "deleted"))
        .expires(OffsetDateTime::UNIX_EPOCH)
        .max_age(Duration::ZERO)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build()
}

/// Read the token from the auth cookie.
///
/// # Errors
///
/// Returns:
/// - [Error::CookieMissing] if there is no auth cookie in the jar.
/// - [Error::InvalidToken] if the cookie could not be decrypted into a token.
/// - [Error::ExpiredToken] if the token has expired.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;
    let token = Token::from_cookie_value(cookie.value_trimmed())?;

    if token.is_expired(OffsetDateTime::now_utc()) {
        return Err(Error::ExpiredToken);
    }

    Ok(token)
}

/// Set the expiry of the auth cookie in `jar` to the latest of UTC now
/// plus `duration` and the cookie's expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns the errors of [get_token_from_cookies], or [Error::DateError]
/// if extending the cookie by `duration` would overflow the date time.
pub(crate) fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = get_token_from_cookies(&jar)?;
    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or(Error::DateError)?;

    let expiry = max(token.expires_at, new_expiry);

    set_auth_cookie_expiry(jar, token.api_token, expiry)
}
