//! Log-out route handler that revokes the backend token, invalidates the auth cookie, and redirects users.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    api::ApiClient,
    auth::{cookie::get_token_from_cookies, invalidate_auth_cookie},
    endpoints,
};

/// Revoke the token at the backend, invalidate the auth cookie and redirect the client to the log-in page.
///
/// The cookie is invalidated even if the backend could not revoke the token.
pub async fn get_log_out(State(api): State<ApiClient>, jar: PrivateCookieJar) -> Response {
    if let Ok(token) = get_token_from_cookies(&jar) {
        if let Err(error) = api.logout(&token.api_token).await {
            tracing::warn!("Could not revoke API token at log out: {error}");
        }
    }

    let jar = invalidate_auth_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}
