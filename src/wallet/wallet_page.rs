//! The page for a single wallet: its balance, the dialogs for changing it,
//! the per-category summary and its transactions.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    api::{ApiClient, ApiToken},
    endpoints,
    html::{
        BUTTON_OUTLINE_STYLE, BUTTON_PRIMARY_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
        dialog_trigger,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::{
        ADD_TRANSACTION_DIALOG_ID, Category, add_transaction_dialog, category_summary,
        transactions_table,
    },
    wallet::{
        Wallet, WalletId,
        dialogs::{
            DELETE_WALLET_DIALOG_ID, UPDATE_WALLET_DIALOG_ID, delete_wallet_dialog,
            update_wallet_dialog,
        },
    },
};

/// The state needed for the wallet page.
#[derive(Debug, Clone)]
pub struct WalletPageState {
    pub api: ApiClient,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for WalletPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

fn wallet_view(wallet: &Wallet, categories: &[Category], local_offset: UtcOffset) -> Markup {
    let nav_bar = NavBar::new(endpoints::WALLETS_VIEW).into_html();
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                a href=(endpoints::WALLETS_VIEW) class=(LINK_STYLE) { "← All wallets" }

                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    div
                    {
                        h1 class="text-xl font-bold" { (wallet.name) }
                        p class="text-3xl tabular-nums" data-wallet-balance="true"
                        {
                            (wallet.formatted_balance())
                        }
                    }

                    div class="flex gap-2"
                    {
                        (dialog_trigger(UPDATE_WALLET_DIALOG_ID, "Edit", BUTTON_OUTLINE_STYLE))
                        (dialog_trigger(DELETE_WALLET_DIALOG_ID, "Delete", BUTTON_OUTLINE_STYLE))
                    }
                }

                (category_summary(&wallet.transactions, &wallet.currency))

                section class="space-y-4"
                {
                    h2 class="text-lg font-semibold" { "Transactions" }

                    (transactions_table(wallet, local_offset))

                    div class="w-56"
                    {
                        (dialog_trigger(ADD_TRANSACTION_DIALOG_ID, "Add transaction", BUTTON_PRIMARY_STYLE))
                    }
                }
            }

            (update_wallet_dialog(wallet))
            (delete_wallet_dialog(wallet))
            (add_transaction_dialog(wallet.id, categories, today))
        }
    };

    base(&wallet.name, &content)
}

/// Render the page for the wallet with `wallet_id`.
///
/// The wallet and the user's categories are fetched together.
pub async fn get_wallet_page(
    Path(wallet_id): Path<WalletId>,
    State(state): State<WalletPageState>,
    Extension(api_token): Extension<ApiToken>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let (wallet, categories) = tokio::try_join!(
        state.api.get_wallet(&api_token, wallet_id),
        state.api.list_categories(&api_token),
    )?;

    Ok(wallet_view(&wallet, &categories, local_offset).into_response())
}
