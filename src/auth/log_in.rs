//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The credentials are checked by the backend, this module only stores the token it hands out.

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error,
    alert::ALERT_CONTAINER_ID,
    api::{ApiClient, ApiToken},
    auth::{
        REMEMBER_ME_COOKIE_DURATION, invalidate_auth_cookie, normalize_redirect_url,
        set_auth_cookie,
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FormInput, base, link, log_in_register, submit_button},
    schema::{FieldErrors, LogInForm},
};

/// Shown when the backend rejects the credentials without a message of its own.
pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect email or password.";

fn log_in_form(email: &str, errors: &FieldErrors, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error={"#" (ALERT_CONTAINER_ID)}
            hx-indicator="#indicator"
            hx-disabled-elt="#password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            (FormInput {
                type_: "email",
                placeholder: "name@example.com",
                autofocus: true,
                error_message: errors.get("email"),
                ..FormInput::text("Email", "email", "email", email)
            }.into_html())

            // The password is never sent back to the client.
            (FormInput {
                type_: "password",
                placeholder: "••••••••",
                error_message: errors.get("password"),
                ..FormInput::text("Password", "password", "password", "")
            }.into_html())

            div class="flex items-center gap-x-3"
            {
                input
                    type="checkbox"
                    name="remember_me"
                    id="remember_me"
                    tabindex="0"
                    class="rounded-xs";

                label
                    for="remember_me"
                    class="block text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Keep me logged in for one week"
                }
            }

            (submit_button("submit-button", "indicator", "Log in", BUTTON_PRIMARY_STYLE))

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                (link(endpoints::REGISTER_VIEW, "Register here"))
            }
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// The query string of the log-in page.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    /// The page to go to after logging in.
    pub redirect_url: Option<String>,
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let log_in_form = log_in_form("", &FieldErrors::default(), redirect_url.as_deref());
    let content = log_in_register(
        "Log in to your account",
        "Enter your email and password to manage your wallets.",
        &log_in_form,
    );

    base("Log In", &content).into_response()
}

/// The state needed to start a session at log-in or registration.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The client for the backend that checks the credentials.
    pub api: ApiClient,
}

impl FromRef<AppState> for SessionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            api: state.api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<SessionState> for Key {
    fn from_ref(state: &SessionState) -> Self {
        state.cookie_key.clone()
    }
}

/// Store `api_token` in the auth cookie and send the client on to `redirect_url`.
///
/// If the cookie cannot be set, the client is sent to the internal error page instead.
pub(super) fn start_session(
    jar: PrivateCookieJar,
    api_token: ApiToken,
    cookie_duration: Duration,
    redirect_url: &str,
) -> Response {
    match set_auth_cookie(jar.clone(), api_token, cookie_duration) {
        Ok(updated_jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(redirect_url.to_owned()),
            updated_jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error setting auth cookie: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                invalidate_auth_cookie(jar),
            )
                .into_response()
        }
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the auth cookie is set and the client is
/// redirected to the wallets page, or the page given by `redirect_url`.
/// Otherwise, the form is returned with the email kept, the password cleared,
/// and either inline validation errors or an alert explaining the problem.
///
/// Empty fields are caught before the backend is contacted.
pub async fn post_log_in(
    State(state): State<SessionState>,
    jar: PrivateCookieJar,
    Form(form): Form<LogInForm>,
) -> Response {
    let redirect_url = parse_redirect_url(form.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();

    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return log_in_form(&form.email, &errors, redirect_url).into_response(),
    };

    let session = match state.api.login(&credentials).await {
        Ok(session) => session,
        Err(error) => {
            let error = match error {
                Error::Unauthenticated => Error::Rejected(INVALID_CREDENTIALS_ERROR_MSG.to_owned()),
                error => error,
            };
            let (_, alert) = error.into_alert();

            return html! {
                (log_in_form(&form.email, &FieldErrors::default(), redirect_url))
                (alert.into_html())
            }
            .into_response();
        }
    };

    tracing::info!("User {} logged in", session.user.id);

    let cookie_duration = if form.remember_me() {
        REMEMBER_ME_COOKIE_DURATION
    } else {
        state.cookie_duration
    };

    start_session(
        jar,
        session.token,
        cookie_duration,
        redirect_url.unwrap_or(endpoints::WALLETS_VIEW),
    )
}
