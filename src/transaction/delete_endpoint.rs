//! Defines the endpoint for deleting a transaction.

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
    endpoints::{self, format_endpoint},
    transaction::TransactionId,
    wallet::WalletId,
};

/// A route handler for deleting a transaction, reloads the wallet page on success
/// so the balance and category totals are up to date.
pub async fn delete_transaction_endpoint(
    Path((wallet_id, transaction_id)): Path<(WalletId, TransactionId)>,
    State(api): State<ApiClient>,
    Extension(api_token): Extension<ApiToken>,
) -> Response {
    match api.delete_transaction(&api_token, transaction_id).await {
        Ok(()) => (
            HxRedirect(format_endpoint(endpoints::WALLET_VIEW, wallet_id)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::NotFound) => Error::DeleteMissingTransaction.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
