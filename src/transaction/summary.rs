//! The per-category totals shown above the transaction table.

use maud::{Markup, html};

use crate::{
    html::{CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE},
    money,
    transaction::{Transaction, summarize_by_category},
};

/// The total and number of transactions per category, largest total first.
///
/// Renders nothing when there are no transactions.
pub fn category_summary(transactions: &[Transaction], currency: &str) -> Markup {
    let summaries = summarize_by_category(transactions);

    html! {
        @if !summaries.is_empty() {
            section class="w-full space-y-2" data-category-summary="true"
            {
                h2 class="text-lg font-semibold" { "By category" }

                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class="px-6 py-3 text-right" { "Transactions" }
                            th scope="col" class="px-6 py-3 text-right" { "Total" }
                        }
                    }

                    tbody
                    {
                        @for summary in &summaries {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE)
                                {
                                    span class=(CATEGORY_BADGE_STYLE) { (summary.category_name) }
                                }
                                td class="px-6 py-4 text-right tabular-nums" { (summary.count) }
                                td class="px-6 py-4 text-right tabular-nums"
                                {
                                    (money::format_decimal(summary.total, currency))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{test_utils::assert_valid_html, transaction::Transaction};

    use super::category_summary;

    fn transaction(id: i64, category_name: &str, amount: &str) -> Transaction {
        Transaction {
            id,
            user_id: None,
            category_id: None,
            category_name: category_name.to_owned(),
            wallet_id: 1,
            amount: amount.to_owned(),
            description: None,
            date: "2024-05-01".to_owned(),
            created_at: None,
            updated_at: None,
            currency: None,
        }
    }

    #[test]
    fn summary_lists_largest_total_first() {
        let transactions = vec![
            transaction(1, "Food", "10.00"),
            transaction(2, "Rent", "800"),
            transaction(3, "Food", "2.50"),
        ];

        let html = Html::parse_fragment(&category_summary(&transactions, "EUR").into_string());
        assert_valid_html(&html);

        let rows = html
            .select(&Selector::parse("tbody tr").unwrap())
            .map(|row| {
                row.select(&Selector::parse("td").unwrap())
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        assert_eq!(
            rows,
            vec![
                vec!["Rent".to_owned(), "1".to_owned(), "800,00 €".to_owned()],
                vec!["Food".to_owned(), "2".to_owned(), "12,50 €".to_owned()],
            ]
        );
    }

    #[test]
    fn no_transactions_renders_nothing() {
        assert_eq!(category_summary(&[], "EUR").into_string(), "");
    }
}
