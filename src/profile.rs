//! The profile settings page where users change their name and email.

use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    alert::{ALERT_CONTAINER_ID, Alert},
    api::{ApiClient, ApiToken},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FormInput, PAGE_CONTAINER_STYLE, base, submit_button},
    navigation::NavBar,
    schema::{FieldErrors, MAX_TEXT_LENGTH, ProfileForm},
};

fn profile_form(profile: &ProfileForm, errors: &FieldErrors) -> Markup {
    html! {
        form
            hx-put=(endpoints::PROFILE_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error={"#" (ALERT_CONTAINER_ID)}
            hx-indicator="#profile-indicator"
            hx-disabled-elt="#profile-submit"
            class="w-full space-y-4 md:space-y-6"
        {
            (FormInput {
                max_length: Some(MAX_TEXT_LENGTH),
                description: Some("The name shown in the app."),
                error_message: errors.get("name"),
                ..FormInput::text("Name", "name", "name", &profile.name)
            }.into_html())

            (FormInput {
                type_: "email",
                description: Some("The email you log in with."),
                error_message: errors.get("email"),
                ..FormInput::text("Email", "email", "email", &profile.email)
            }.into_html())

            (submit_button("profile-submit", "profile-indicator", "Save", BUTTON_PRIMARY_STYLE))
        }
    }
}

fn profile_view(profile: &ProfileForm) -> Markup {
    let nav_bar = NavBar::new(endpoints::PROFILE_VIEW).into_html();
    let form = profile_form(profile, &FieldErrors::default());

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                header class="space-y-1"
                {
                    h1 class="text-xl font-bold" { "Profile" }
                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Update your account's profile information and email address."
                    }
                }

                div class="p-6 rounded-xl bg-white dark:bg-gray-800 shadow-sm" { (form) }
            }
        }
    };

    base("Profile", &content)
}

/// Render the profile page with the current name and email of the user.
pub async fn get_profile_page(
    State(api): State<ApiClient>,
    Extension(api_token): Extension<ApiToken>,
) -> Result<Response, Error> {
    let user = api.get_user(&api_token).await?;
    let profile = ProfileForm {
        name: user.name,
        email: user.email,
    };

    Ok(profile_view(&profile).into_response())
}

/// Handle profile form submissions.
///
/// The form is always sent back: with the saved values and a success alert,
/// with inline errors if validation failed, or with the submitted values and an
/// error alert if the backend refused the update.
pub async fn update_profile_endpoint(
    State(api): State<ApiClient>,
    Extension(api_token): Extension<ApiToken>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(errors) => return profile_form(&form, &errors).into_response(),
    };

    match api.update_profile(&api_token, &profile).await {
        Ok(user) => {
            let saved = ProfileForm {
                name: user.name,
                email: user.email,
            };
            let alert = Alert::SuccessSimple {
                message: "Profile updated successfully".to_owned(),
            };

            html! {
                (profile_form(&saved, &FieldErrors::default()))
                (alert.into_html())
            }
            .into_response()
        }
        Err(error) if error.is_session_error() => error.into_alert_response(),
        Err(error) => {
            let (_, alert) = error.into_alert();

            html! {
                (profile_form(&form, &FieldErrors::default()))
                (alert.into_html())
            }
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Form,
        extract::State,
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_htmx::HX_REDIRECT;
    use scraper::Selector;

    use crate::{
        api::ApiToken,
        endpoints,
        schema::ProfileForm,
        test_utils::{
            FakeApi, TEST_EMAIL, TEST_NAME, assert_form_input_with_value, assert_hx_endpoint,
            assert_input_error_message, assert_valid_html, must_get_form, parse_html_document,
            parse_html_fragment,
        },
    };

    use super::{get_profile_page, update_profile_endpoint};

    fn profile(name: &str, email: &str) -> ProfileForm {
        ProfileForm {
            name: name.to_owned(),
            email: email.to_owned(),
        }
    }

    #[tokio::test]
    async fn profile_page_shows_current_user() {
        let api = FakeApi::start().await;

        let response = get_profile_page(State(api.client()), Extension(api.token()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::PROFILE_API, "hx-put");
        assert_form_input_with_value(&form, "name", "text", TEST_NAME);
        assert_form_input_with_value(&form, "email", "email", TEST_EMAIL);
    }

    #[tokio::test]
    async fn profile_page_with_revoked_token_redirects_to_log_in() {
        let api = FakeApi::start().await;

        let response = get_profile_page(State(api.client()), Extension(ApiToken::new("revoked")))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::LOG_IN_VIEW
        );
    }

    #[tokio::test]
    async fn update_profile_shows_success_alert() {
        let api = FakeApi::start().await;

        let response = update_profile_endpoint(
            State(api.client()),
            Extension(api.token()),
            Form(profile("Alicia", "alicia@example.com")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "name", "text", "Alicia");
        assert_form_input_with_value(&form, "email", "email", "alicia@example.com");

        let alert = html
            .select(&Selector::parse("[role=status]").unwrap())
            .next()
            .expect("No success alert found")
            .text()
            .collect::<String>();
        assert!(alert.contains("Profile updated successfully"));
        assert_eq!(api.data().user.name, "Alicia");
    }

    #[tokio::test]
    async fn invalid_email_fails_before_calling_backend() {
        let api = FakeApi::start().await;

        let response = update_profile_endpoint(
            State(api.client()),
            Extension(api.token()),
            Form(profile("Alicia", "not an email")),
        )
        .await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_input_error_message(&form, "email", "Enter a valid email address");
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn taken_email_keeps_values_and_shows_alert() {
        let api = FakeApi::start().await;

        let response = update_profile_endpoint(
            State(api.client()),
            Extension(api.token()),
            Form(profile("Alicia", "taken@example.com")),
        )
        .await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "email", "email", "taken@example.com");
        let alert = html
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No error alert found")
            .text()
            .collect::<String>();
        assert!(alert.contains("The email has already been taken."));
        assert_eq!(api.data().user.email, TEST_EMAIL);
    }

    #[tokio::test]
    async fn update_profile_with_revoked_token_redirects_to_log_in() {
        let api = FakeApi::start().await;

        let response = update_profile_endpoint(
            State(api.client()),
            Extension(ApiToken::new("revoked")),
            Form(profile("Alicia", "alicia@example.com")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::LOG_IN_VIEW
        );
    }
}
