//! The value stored in the auth cookie.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, api::ApiToken};

/// The contents of the auth cookie: the backend API token and when the session ends.
///
/// Stored as JSON, with the expiry as an RFC 3339 timestamp.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Token {
    pub api_token: ApiToken,

    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl Token {
    /// Whether the session has ended at `now`.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }

    /// Serialize the token for the cookie value.
    ///
    /// # Errors
    /// Returns [Error::JSONSerializationError] if the expiry cannot be formatted.
    pub fn to_cookie_value(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|error| Error::JSONSerializationError(error.to_string()))
    }

    /// Parse a token from a decrypted cookie value.
    ///
    /// # Errors
    /// Returns [Error::InvalidToken] if `value` is not a serialized token.
    pub fn from_cookie_value(value: &str) -> Result<Self, Error> {
        serde_json::from_str(value).map_err(|error| Error::InvalidToken(error.to_string()))
    }
}
