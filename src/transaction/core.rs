use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{money, user::UserID, wallet::WalletId};

pub type TransactionId = i64;
pub type CategoryId = i64;

/// A dated, categorized movement of money in a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default)]
    pub user_id: Option<UserID>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// The name of the category, resolved by the backend.
    #[serde(default)]
    pub category_name: String,
    pub wallet_id: WalletId,
    /// The amount as a decimal string, e.g., "12.50".
    pub amount: String,
    #[serde(default)]
    pub description: Option<String>,
    /// When the transaction happened, as sent by the backend.
    pub date: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// The currency of the wallet the transaction belongs to.
    #[serde(default)]
    pub currency: Option<String>,
}

impl Transaction {
    /// The date of the transaction in the timezone with `local_offset`.
    ///
    /// Returns `None` if the backend sent a date in an unknown format.
    pub fn local_date(&self, local_offset: UtcOffset) -> Option<Date> {
        parse_timestamp(&self.date).map(|timestamp| timestamp.to_offset(local_offset).date())
    }
}

/// A label the user groups transactions with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default)]
    pub user_id: Option<UserID>,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 timestamps, "YYYY-MM-DD HH:MM:SS" in UTC and plain dates.
pub fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    if let Ok(timestamp) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(timestamp);
    }

    if let Ok(timestamp) = PrimitiveDateTime::parse(
        text,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Some(timestamp.assume_utc());
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// The total and number of transactions for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category_name: String,
    pub total: Decimal,
    pub count: usize,
}

/// Group `transactions` by category, largest total first.
///
/// Ties are broken by category name. Amounts that are not decimal numbers
/// count towards the number of transactions but not the total. Totals that
/// do not fit in a [Decimal] stop at [Decimal::MAX] or [Decimal::MIN].
pub fn summarize_by_category(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut summaries: HashMap<&str, CategorySummary> = HashMap::new();

    for transaction in transactions {
        let summary = summaries
            .entry(transaction.category_name.as_str())
            .or_insert_with(|| CategorySummary {
                category_name: transaction.category_name.clone(),
                total: Decimal::ZERO,
                count: 0,
            });

        summary.count += 1;
        let Some(amount) = money::parse_amount(&transaction.amount) else {
            continue;
        };

        summary.total = summary.total.checked_add(amount).unwrap_or_else(|| {
            tracing::warn!(
                "Total for category {:?} overflowed at transaction {}",
                summary.category_name,
                transaction.id
            );
            summary.total.saturating_add(amount)
        });
    }

    let mut summaries: Vec<CategorySummary> = summaries.into_values().collect();
    summaries.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });

    summaries
}
