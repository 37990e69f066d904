//! Defines the endpoint for adding a transaction to a wallet.

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
    schema::AddTransactionForm,
    transaction::dialog::add_transaction_form,
    wallet::WalletId,
};

/// A route handler for adding a transaction, redirects to the wallet page on success.
///
/// The backend creates the category when the user has not used the name before.
pub async fn create_transaction_endpoint(
    Path(wallet_id): Path<WalletId>,
    State(api): State<ApiClient>,
    Extension(api_token): Extension<ApiToken>,
    Form(form): Form<AddTransactionForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => return add_transaction_form(wallet_id, &form, &errors).into_response(),
    };

    match api.add_transaction(&api_token, wallet_id, &payload).await {
        Ok(transaction) => {
            tracing::info!(
                "Added transaction {} to wallet {wallet_id}",
                transaction.id
            );
            (
                HxRedirect(format_endpoint(endpoints::WALLET_VIEW, wallet_id)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(Error::NotFound) => Error::AddToMissingWallet.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not add transaction to wallet {wallet_id}: {error}");
            error.into_alert_response()
        }
    }
}
