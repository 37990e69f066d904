//! Defines the endpoint for renaming a wallet or changing its currency.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    api::{ApiClient, ApiToken},
    endpoints::{self, format_endpoint},
    schema::UpdateWalletForm,
    wallet::{WalletId, dialogs::update_wallet_form},
};

/// A route handler for updating a wallet, redirects to the wallet page on success.
pub async fn update_wallet_endpoint(
    Path(wallet_id): Path<WalletId>,
    State(api): State<ApiClient>,
    Extension(api_token): Extension<ApiToken>,
    Form(form): Form<UpdateWalletForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => return update_wallet_form(wallet_id, &form, &errors).into_response(),
    };

    match api.update_wallet(&api_token, wallet_id, &payload).await {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::WALLET_VIEW, wallet_id)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::NotFound) => Error::UpdateMissingWallet.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not update wallet {wallet_id}: {error}");
            error.into_alert_response()
        }
    }
}
