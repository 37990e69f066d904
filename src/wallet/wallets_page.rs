//! Displays the user's wallets and their balances.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    api::{ApiClient, ApiToken},
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base, dialog_trigger},
    navigation::NavBar,
    wallet::{
        Wallet,
        dialogs::{ADD_WALLET_DIALOG_ID, add_wallet_dialog},
    },
};

fn wallet_card(wallet: &Wallet) -> Markup {
    let wallet_url = format_endpoint(endpoints::WALLET_VIEW, wallet.id);

    html! {
        li
        {
            a href=(wallet_url) class=(CARD_STYLE) data-wallet-card="true"
            {
                span class="text-lg font-semibold truncate" { (wallet.name) }
                span class="text-2xl tabular-nums" { (wallet.formatted_balance()) }
                span class="text-xs text-gray-500 dark:text-gray-400" { (wallet.currency) }
            }
        }
    }
}

fn wallets_view(wallets: &[Wallet]) -> Markup {
    let nav_bar = NavBar::new(endpoints::WALLETS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full space-y-4"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Wallets" }

                    div class="w-48"
                    {
                        (dialog_trigger(ADD_WALLET_DIALOG_ID, "Create wallet", BUTTON_PRIMARY_STYLE))
                    }
                }

                @if wallets.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "You do not have any wallets yet. Create one to start recording transactions."
                    }
                } @else {
                    ul class="flex flex-wrap gap-4"
                    {
                        @for wallet in wallets {
                            (wallet_card(wallet))
                        }
                    }
                }
            }

            (add_wallet_dialog())
        }
    };

    base("Wallets", &content)
}

/// Render the list of the user's wallets with the dialog for creating a wallet.
pub async fn get_wallets_page(
    State(api): State<ApiClient>,
    Extension(api_token): Extension<ApiToken>,
) -> Result<Response, Error> {
    let wallets = api.list_wallets(&api_token).await?;

    Ok(wallets_view(&wallets).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        api::ApiToken,
        endpoints,
        test_utils::{FakeApi, assert_valid_html, parse_html_document},
        wallet::dialogs::ADD_WALLET_DIALOG_ID,
    };

    use super::get_wallets_page;

    #[tokio::test]
    async fn lists_wallets_with_formatted_balances() {
        let api = FakeApi::start().await;
        let savings = api.add_wallet("Savings", "1234.5", "EUR");
        api.add_wallet("Travel", "-12", "USD");

        let response = get_wallets_page(State(api.client()), Extension(api.token()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let cards = document
            .select(&Selector::parse("a[data-wallet-card]").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(cards.len(), 2, "want 2 wallet cards, got {}", cards.len());
        assert_eq!(
            cards[0].value().attr("href"),
            Some(format!("/dashboard/{savings}").as_str())
        );

        let first_card = cards[0].text().collect::<String>();
        assert!(first_card.contains("Savings"), "got {first_card:?}");
        assert!(first_card.contains("1.234,50 €"), "got {first_card:?}");
        let second_card = cards[1].text().collect::<String>();
        assert!(second_card.contains("-12,00 $"), "got {second_card:?}");
    }

    #[tokio::test]
    async fn page_contains_closed_add_wallet_dialog() {
        let api = FakeApi::start().await;

        let response = get_wallets_page(State(api.client()), Extension(api.token()))
            .await
            .into_response();

        let document = parse_html_document(response).await;
        let dialog = document
            .select(&Selector::parse(&format!("dialog#{ADD_WALLET_DIALOG_ID}")).unwrap())
            .next()
            .expect("No add wallet dialog");
        assert!(dialog.value().attr("open").is_none());

        let trigger = document
            .select(&Selector::parse("button[aria-haspopup=dialog]").unwrap())
            .next()
            .expect("No dialog trigger");
        assert!(
            trigger
                .value()
                .attr("onclick")
                .unwrap_or_default()
                .contains(ADD_WALLET_DIALOG_ID)
        );
    }

    #[tokio::test]
    async fn revoked_token_redirects_to_log_in() {
        let api = FakeApi::start().await;

        let response = get_wallets_page(State(api.client()), Extension(ApiToken::new("revoked")))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::LOG_IN_VIEW
        );
    }
}
