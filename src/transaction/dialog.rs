//! The dialog for adding a transaction to a wallet.

use maud::{Markup, html};
use time::Date;

use crate::{
    alert::ALERT_CONTAINER_ID,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FormInput, dialog, submit_button},
    schema::{AddTransactionForm, FieldErrors, MAX_TEXT_LENGTH},
    transaction::Category,
    wallet::WalletId,
};

pub const ADD_TRANSACTION_DIALOG_ID: &str = "add-transaction-dialog";
/// The `<datalist>` with the names of the user's categories.
pub const CATEGORIES_DATALIST_ID: &str = "category-names";

const AMOUNT_INPUT_PATTERN: &str = r"\d*(\.\d{1,2})?";

/// The form inside the add transaction dialog.
///
/// The category suggestions live outside the form, so a re-rendered form
/// keeps using them.
pub fn add_transaction_form(
    wallet_id: WalletId,
    form: &AddTransactionForm,
    errors: &FieldErrors,
) -> Markup {
    let endpoint = format_endpoint(endpoints::WALLET_TRANSACTIONS_API, wallet_id);

    html! {
        form
            hx-post=(endpoint)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error={"#" (ALERT_CONTAINER_ID)}
            hx-indicator="#add-transaction-indicator"
            hx-disabled-elt="#add-transaction-submit"
            class="space-y-4"
        {
            (FormInput {
                placeholder: "Groceries",
                description: Some("Pick an existing category or type a new one."),
                max_length: Some(MAX_TEXT_LENGTH),
                list: Some(CATEGORIES_DATALIST_ID),
                error_message: errors.get("category_name"),
                ..FormInput::text("Category", "category_name", "category_name", &form.category_name)
            }.into_html())

            (FormInput {
                placeholder: "0.00",
                pattern: Some(AMOUNT_INPUT_PATTERN),
                error_message: errors.get("amount"),
                ..FormInput::text("Amount", "amount", "amount", &form.amount)
            }.into_html())

            (FormInput {
                placeholder: "Optional",
                required: false,
                max_length: Some(MAX_TEXT_LENGTH),
                error_message: errors.get("description"),
                ..FormInput::text(
                    "Description",
                    "description",
                    "description",
                    form.description.as_deref().unwrap_or_default(),
                )
            }.into_html())

            (FormInput {
                type_: "date",
                error_message: errors.get("date"),
                ..FormInput::text("Date", "date", "date", &form.date)
            }.into_html())

            (submit_button("add-transaction-submit", "add-transaction-indicator", "Add transaction", BUTTON_PRIMARY_STYLE))
        }
    }
}

/// The dialog for adding a transaction dated `today` by default.
pub fn add_transaction_dialog(wallet_id: WalletId, categories: &[Category], today: Date) -> Markup {
    let form = AddTransactionForm {
        date: today.to_string(),
        ..Default::default()
    };

    let body = html! {
        datalist id=(CATEGORIES_DATALIST_ID)
        {
            @for category in categories {
                option value=(category.name) {}
            }
        }

        (add_transaction_form(wallet_id, &form, &FieldErrors::default()))
    };

    dialog(
        ADD_TRANSACTION_DIALOG_ID,
        "Add transaction",
        "Record money coming into or going out of this wallet.",
        &body,
    )
}
