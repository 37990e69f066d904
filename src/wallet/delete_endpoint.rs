//! Defines the endpoint for deleting a wallet.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    api::{ApiClient, ApiToken},
    endpoints,
    wallet::WalletId,
};

/// A route handler for deleting a wallet and its transactions.
///
/// Redirects to the wallets page since the wallet page no longer exists.
pub async fn delete_wallet_endpoint(
    Path(wallet_id): Path<WalletId>,
    State(api): State<ApiClient>,
    Extension(api_token): Extension<ApiToken>,
) -> Response {
    match api.delete_wallet(&api_token, wallet_id).await {
        Ok(()) => {
            tracing::info!("Deleted wallet {wallet_id}");
            (
                HxRedirect(endpoints::WALLETS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(Error::NotFound) => Error::DeleteMissingWallet.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete wallet {wallet_id}: {error}");
            error.into_alert_response()
        }
    }
}
