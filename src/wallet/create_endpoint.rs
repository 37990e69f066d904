//! Defines the endpoint for creating a wallet.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    api::{ApiClient, ApiToken},
    endpoints,
    schema::AddWalletForm,
    wallet::dialogs::add_wallet_form,
};

/// A route handler for creating a new wallet, redirects to the wallets page on success.
///
/// Invalid input re-renders the form inside the dialog without contacting the backend.
pub async fn create_wallet_endpoint(
    State(api): State<ApiClient>,
    Extension(api_token): Extension<ApiToken>,
    Form(form): Form<AddWalletForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => return add_wallet_form(&form, &errors).into_response(),
    };

    match api.add_wallet(&api_token, &payload).await {
        Ok(wallet) => {
            tracing::info!("Created wallet {}", wallet.id);
            (
                HxRedirect(endpoints::WALLETS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not create wallet: {error}");
            error.into_alert_response()
        }
    }
}
