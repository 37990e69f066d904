//! The registration page for creating a new account with the backend.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};

use crate::{
    alert::ALERT_CONTAINER_ID,
    auth::log_in::{SessionState, start_session},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FormInput, base, link, log_in_register, submit_button},
    schema::{FieldErrors, MAX_TEXT_LENGTH, MIN_PASSWORD_LENGTH, RegisterForm},
};

fn registration_form(form: &RegisterForm, errors: &FieldErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::REGISTER_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error={"#" (ALERT_CONTAINER_ID)}
            hx-indicator="#indicator"
            hx-disabled-elt="#password, #password_confirmation, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (FormInput {
                placeholder: "Your name",
                autofocus: true,
                max_length: Some(MAX_TEXT_LENGTH),
                error_message: errors.get("name"),
                ..FormInput::text("Name", "name", "name", &form.name)
            }.into_html())

            (FormInput {
                type_: "email",
                placeholder: "name@example.com",
                error_message: errors.get("email"),
                ..FormInput::text("Email", "email", "email", &form.email)
            }.into_html())

            (FormInput {
                type_: "password",
                placeholder: "••••••••",
                description: Some("At least 8 characters."),
                error_message: errors.get("password"),
                ..FormInput::text("Password", "password", "password", &form.password)
            }.into_html())

            // The confirmation has to be typed again after a failed attempt.
            (FormInput {
                type_: "password",
                placeholder: "••••••••",
                error_message: errors.get("password_confirmation"),
                ..FormInput::text(
                    "Confirm Password",
                    "password_confirmation",
                    "password_confirmation",
                    "",
                )
            }.into_html())

            (submit_button("submit-button", "indicator", "Create account", BUTTON_PRIMARY_STYLE))

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                (link(endpoints::LOG_IN_VIEW, "Log in here"))
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form(&RegisterForm::default(), &FieldErrors::default());
    let content = log_in_register(
        "Create an account",
        &format!(
            "Pick a password with at least {MIN_PASSWORD_LENGTH} characters to get started."
        ),
        &registration_form,
    );

    base("Register", &content).into_response()
}

/// Handler for registration requests via the POST method.
///
/// On success the new user is logged in and redirected to the wallets page.
/// Otherwise the form is returned with inline validation errors, or with an
/// alert carrying the reason the backend gave, e.g., the email is already taken.
pub async fn register_user(
    State(state): State<SessionState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(errors) => return registration_form(&form, &errors).into_response(),
    };

    match state.api.register(&registration).await {
        Ok(session) => {
            tracing::info!("Registered user {}", session.user.id);
            start_session(
                jar,
                session.token,
                state.cookie_duration,
                endpoints::WALLETS_VIEW,
            )
        }
        Err(error) => {
            let (_, alert) = error.into_alert();

            html! {
                (registration_form(&form, &FieldErrors::default()))
                (alert.into_html())
            }
            .into_response()
        }
    }
}
