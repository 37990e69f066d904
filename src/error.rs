//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use axum_htmx::HxRedirect;

use crate::{
    alert::Alert, auth::removal_cookie, endpoints, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The auth token cookie could not be deserialized.
    #[error("the auth token is invalid: {0}")]
    InvalidToken(String),

    /// The auth token in the cookie has expired.
    #[error("the auth token has expired")]
    ExpiredToken,

    /// Extending the cookie expiry would overflow the date time, or the new
    /// expiry could not be formatted.
    #[error("could not compute the auth cookie expiry")]
    DateError,

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error occurs when the backend responds with 404.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The backend did not accept the API token, or no token was given.
    ///
    /// The user has to log in again.
    #[error("the backend rejected the API token")]
    Unauthenticated,

    /// The backend refused the request because of the data sent with it,
    /// e.g., wrong credentials or an email that is already taken.
    ///
    /// The message comes from the backend and is safe to show to the user.
    #[error("{0}")]
    Rejected(String),

    /// The backend responded with an unexpected error status.
    #[error("the backend responded with status {status}: {message}")]
    Api {
        /// The HTTP status code of the backend response.
        status: u16,
        /// The message in the backend response body.
        message: String,
    },

    /// The backend could not be reached.
    #[error("could not reach the backend: {0}")]
    ApiUnavailable(String),

    /// The backend response body did not have the expected shape.
    #[error("unexpected response from the backend: {0}")]
    UnexpectedResponse(String),

    /// Tried to update a wallet that does not exist
    #[error("tried to update a wallet that does not exist")]
    UpdateMissingWallet,

    /// Tried to delete a wallet that does not exist
    #[error("tried to delete a wallet that does not exist")]
    DeleteMissingWallet,

    /// Tried to add a transaction to a wallet that does not exist
    #[error("tried to add a transaction to a wallet that does not exist")]
    AddToMissingWallet,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that does not exist")]
    DeleteMissingTransaction,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::Unauthenticated
            | Error::CookieMissing
            | Error::ExpiredToken
            | Error::InvalidToken(_) => (
                CookieJar::new().add(removal_cookie()),
                Redirect::to(endpoints::LOG_IN_VIEW),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::ApiUnavailable(error) => {
                tracing::error!("Could not reach the backend: {error}");
                InternalServerError {
                    description: "Could not reach the server",
                    fix: "The wallet service is not responding. Try again later.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// Session errors become an htmx redirect to the log-in page instead of an alert.
    pub fn into_alert_response(self) -> Response {
        if self.is_session_error() {
            return (
                CookieJar::new().add(removal_cookie()),
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response();
        }

        let (status_code, alert) = self.into_alert();

        (status_code, alert.into_html()).into_response()
    }

    /// The alert to show the user for this error and the matching HTTP status code.
    pub fn into_alert(self) -> (StatusCode, Alert) {
        match self {
            Error::Rejected(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::ErrorSimple { message },
            ),
            Error::Api { status, message } => {
                tracing::error!("The backend responded with status {status}: {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: message,
                    },
                )
            }
            Error::ApiUnavailable(error) => {
                tracing::error!("Could not reach the backend: {error}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::Error {
                        message: "Could not reach the server".to_owned(),
                        details: "The wallet service is not responding. Try again later."
                            .to_owned(),
                    },
                )
            }
            Error::UpdateMissingWallet => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update wallet".to_owned(),
                    details: "The wallet could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingWallet => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete wallet".to_owned(),
                    details: "The wallet could not be found. \
                    Try refreshing the page to see if the wallet has already been deleted."
                        .to_owned(),
                },
            ),
            Error::AddToMissingWallet => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not add transaction".to_owned(),
                    details: "The wallet could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete transaction".to_owned(),
                    details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                        .to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        }
    }

    /// Whether the user has to log in again after this error.
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            Error::Unauthenticated | Error::CookieMissing | Error::ExpiredToken | Error::InvalidToken(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{StatusCode, header::SET_COOKIE},
        response::{IntoResponse, Response},
    };
    use axum_extra::extract::cookie::Cookie;
    use axum_htmx::HX_REDIRECT;
    use time::Duration;

    use crate::{
        Error, endpoints,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[track_caller]
    fn assert_clears_auth_cookie(response: &Response) {
        let header = response
            .headers()
            .get(SET_COOKIE)
            .expect("Response has no Set-Cookie header")
            .to_str()
            .unwrap();
        let cookie = Cookie::parse(header).unwrap();

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn unauthenticated_page_load_redirects_to_log_in() {
        let response = Error::Unauthenticated.into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::LOG_IN_VIEW
        );
        assert_clears_auth_cookie(&response);
    }

    #[test]
    fn not_found_renders_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unauthenticated_alert_is_hx_redirect() {
        let response = Error::Unauthenticated.into_alert_response();

        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::LOG_IN_VIEW
        );
        assert_clears_auth_cookie(&response);
    }

    #[tokio::test]
    async fn rejected_alert_shows_backend_message() {
        let response = Error::Rejected("The email has already been taken.".to_owned())
            .into_alert_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(
            text.contains("The email has already been taken."),
            "want alert to contain backend message, got {text:?}"
        );
    }
}
