use axum::{body::Body, http::StatusCode, response::Response};
use axum_htmx::HX_REDIRECT;

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

/// Assert that an htmx response sends the client to `endpoint`.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    let location = response
        .headers()
        .get(HX_REDIRECT)
        .unwrap_or_else(|| panic!("want HX-Redirect to {endpoint}, got no header"));

    assert_eq!(location, endpoint);
}
