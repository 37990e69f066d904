//! The dialogs for creating, updating and deleting wallets.
//!
//! Each form swaps itself out on validation errors, so the dialog stays open
//! with the messages under the fields. Errors from the backend go to the alert
//! container instead.

use maud::{Markup, html};

use crate::{
    alert::ALERT_CONTAINER_ID,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DANGER_STYLE, BUTTON_PRIMARY_STYLE, FORM_DESCRIPTION_STYLE, FORM_ERROR_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, FormInput, dialog, submit_button,
    },
    money::{CURRENCIES, DEFAULT_CURRENCY},
    schema::{AddWalletForm, FieldErrors, MAX_TEXT_LENGTH, UpdateWalletForm},
    wallet::{Wallet, WalletId},
};

pub const ADD_WALLET_DIALOG_ID: &str = "add-wallet-dialog";
pub const UPDATE_WALLET_DIALOG_ID: &str = "update-wallet-dialog";
pub const DELETE_WALLET_DIALOG_ID: &str = "delete-wallet-dialog";

/// Matches the balance rule of the add wallet form so browsers can flag mistakes early.
const BALANCE_INPUT_PATTERN: &str = r"-?\d+(\.\d{1,2})?";

fn currency_select(selected: &str, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label for="currency" class=(FORM_LABEL_STYLE) { "Currency" }

            select
                id="currency"
                name="currency"
                class=(FORM_TEXT_INPUT_STYLE)
                aria-invalid[error_message.is_some()]
            {
                @for currency in CURRENCIES {
                    option value=(currency) selected[currency == selected] { (currency) }
                }
            }

            p class=(FORM_DESCRIPTION_STYLE) { "The currency for the wallet." }

            @if let Some(error_message) = error_message {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }
        }
    }
}

/// The form inside the add wallet dialog.
pub fn add_wallet_form(form: &AddWalletForm, errors: &FieldErrors) -> Markup {
    let balance = form.balance.as_deref().unwrap_or_default();
    let currency = form
        .currency
        .as_deref()
        .filter(|currency| !currency.is_empty())
        .unwrap_or(DEFAULT_CURRENCY);

    html! {
        form
            hx-post=(endpoints::WALLETS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error={"#" (ALERT_CONTAINER_ID)}
            hx-indicator="#add-wallet-indicator"
            hx-disabled-elt="#add-wallet-submit"
            class="space-y-4"
        {
            (FormInput {
                placeholder: "My Wallet",
                description: Some("The name to identify the wallet."),
                max_length: Some(MAX_TEXT_LENGTH),
                autofocus: true,
                error_message: errors.get("name"),
                ..FormInput::text("Name", "wallet-name", "name", &form.name)
            }.into_html())

            (FormInput {
                placeholder: "0.00",
                description: Some("The initial balance for the wallet."),
                required: false,
                pattern: Some(BALANCE_INPUT_PATTERN),
                error_message: errors.get("balance"),
                ..FormInput::text("Balance", "balance", "balance", balance)
            }.into_html())

            (currency_select(currency, errors.get("currency")))

            (submit_button("add-wallet-submit", "add-wallet-indicator", "Create wallet", BUTTON_PRIMARY_STYLE))
        }
    }
}

/// The dialog for creating a wallet, closed until its trigger is clicked.
pub fn add_wallet_dialog() -> Markup {
    dialog(
        ADD_WALLET_DIALOG_ID,
        "Create a new wallet",
        "You can create a new wallet by entering the name, the currency and the initial balance.",
        &add_wallet_form(&AddWalletForm::default(), &FieldErrors::default()),
    )
}

/// The form inside the update wallet dialog.
pub fn update_wallet_form(
    wallet_id: WalletId,
    form: &UpdateWalletForm,
    errors: &FieldErrors,
) -> Markup {
    let endpoint = format_endpoint(endpoints::WALLET_API, wallet_id);

    html! {
        form
            hx-patch=(endpoint)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error={"#" (ALERT_CONTAINER_ID)}
            hx-indicator="#update-wallet-indicator"
            hx-disabled-elt="#update-wallet-submit"
            class="space-y-4"
        {
            (FormInput {
                description: Some("The name to identify the wallet."),
                max_length: Some(MAX_TEXT_LENGTH),
                error_message: errors.get("name"),
                ..FormInput::text("Name", "wallet-name", "name", &form.name)
            }.into_html())

            (currency_select(&form.currency, errors.get("currency")))

            (submit_button("update-wallet-submit", "update-wallet-indicator", "Save changes", BUTTON_PRIMARY_STYLE))
        }
    }
}

/// The dialog for renaming `wallet` or changing its currency.
pub fn update_wallet_dialog(wallet: &Wallet) -> Markup {
    let form = UpdateWalletForm {
        name: wallet.name.clone(),
        currency: wallet.currency.clone(),
    };

    dialog(
        UPDATE_WALLET_DIALOG_ID,
        "Update wallet",
        "Change the name or the currency of the wallet.",
        &update_wallet_form(wallet.id, &form, &FieldErrors::default()),
    )
}

/// The dialog asking the user to confirm deleting `wallet`.
pub fn delete_wallet_dialog(wallet: &Wallet) -> Markup {
    let endpoint = format_endpoint(endpoints::WALLET_API, wallet.id);
    let description = format!(
        "The wallet \"{}\" and all of its transactions will be deleted. This cannot be undone.",
        wallet.name
    );

    let form = html! {
        form
            hx-delete=(endpoint)
            hx-target-error={"#" (ALERT_CONTAINER_ID)}
            hx-indicator="#delete-wallet-indicator"
            hx-disabled-elt="#delete-wallet-submit"
            class="mb-2"
        {
            (submit_button("delete-wallet-submit", "delete-wallet-indicator", "Delete wallet", BUTTON_DANGER_STYLE))
        }
    };

    dialog(DELETE_WALLET_DIALOG_ID, "Delete wallet", &description, &form)
}
