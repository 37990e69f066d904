//! HTML rendering for the transactions of a wallet.

use maud::{Markup, html};
use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    alert::ALERT_CONTAINER_ID,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE,
    },
    money,
    transaction::Transaction,
    wallet::Wallet,
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

fn amount_class(amount: &str) -> &'static str {
    if amount.trim_start().starts_with('-') {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}

fn transaction_row(
    transaction: &Transaction,
    currency: &str,
    wallet: &Wallet,
    local_offset: UtcOffset,
) -> Markup {
    let delete_url = format_endpoint(
        &format_endpoint(endpoints::WALLET_TRANSACTION_API, wallet.id),
        transaction.id,
    );
    let date = transaction
        .local_date(local_offset)
        .and_then(|date| date.format(DATE_FORMAT).ok());
    let description = transaction.description.as_deref().unwrap_or_default();
    let (short_description, tooltip) = format_description(description);
    let confirm_message = format!(
        "Are you sure you want to delete the transaction '{}' of {}? This cannot be undone.",
        transaction.category_name,
        money::format_money(&transaction.amount, currency),
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(date) = date {
                    time datetime=(date) { (date) }
                } @else {
                    // Shown as sent when the format is unknown.
                    (transaction.date)
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category_name) }
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (short_description) }
            td class={ "px-6 py-4 text-right tabular-nums " (amount_class(&transaction.amount)) }
            {
                (money::format_money(&transaction.amount, currency))
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-confirm=(confirm_message)
                    hx-target-error={"#" (ALERT_CONTAINER_ID)}
                    hx-disabled-elt="this"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

/// The table of the transactions in `wallet`, or a notice if it has none.
///
/// Dates are shown in the timezone with `local_offset`.
pub fn transactions_table(wallet: &Wallet, local_offset: UtcOffset) -> Markup {
    if wallet.transactions.is_empty() {
        return empty_state();
    }

    html! {
        section class="w-full overflow-x-auto dark:bg-gray-800"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for transaction in &wallet.transactions {
                        @let currency = transaction.currency.as_deref().unwrap_or(&wallet.currency);
                        (transaction_row(transaction, currency, wallet, local_offset))
                    }
                }
            }
        }
    }
}

fn empty_state() -> Markup {
    html! {
        section
            class="flex flex-col items-center gap-2 p-8 text-center rounded-lg
                border border-dashed border-gray-300 dark:border-gray-600"
            data-empty-state="true"
        {
            h2 class="text-lg font-semibold text-gray-900 dark:text-white" { "No transactions" }
            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                "No transactions found. Click the button below to add a new transaction."
            }
        }
    }
}
