//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the global alert container defined in [crate::html::base].
//! The markup uses an htmx out-of-band swap, so an alert can be returned on its
//! own (e.g., as the target of `hx-target-error`) or alongside another fragment
//! such as a re-rendered form.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// The ID of the element that alerts are swapped into.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// A transient notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message with extra details.
    Success { message: String, details: String },
    /// A success message.
    SuccessSimple { message: String },
    /// An error message with extra details.
    Error { message: String, details: String },
    /// An error message.
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::Success { message, details } => (false, message, Some(details)),
            Alert::SuccessSimple { message } => (false, message, None),
            Alert::Error { message, details } => (true, message, Some(details)),
            Alert::ErrorSimple { message } => (true, message, None),
        };

        let style = if is_error {
            "flex items-start gap-3 p-4 text-sm text-red-800 rounded-lg bg-red-50 \
            dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800 shadow-lg"
        } else {
            "flex items-start gap-3 p-4 text-sm text-green-800 rounded-lg bg-green-50 \
            dark:bg-gray-800 dark:text-green-400 border border-green-300 dark:border-green-800 shadow-lg"
        };
        let role = if is_error { "alert" } else { "status" };

        html!(
            div
                id=(ALERT_CONTAINER_ID)
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(style) role=(role)
                {
                    div class="flex-1"
                    {
                        p class="font-medium" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty()) {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="ms-auto font-bold"
                        onclick="this.closest('[role]').remove()"
                    {
                        "×"
                    }
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::OK, Html(self.into_html().into_string())).into_response()
    }
}
