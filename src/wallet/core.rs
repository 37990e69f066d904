use serde::{Deserialize, Serialize};

use crate::{money, transaction::Transaction};

pub type WalletId = i64;

/// A named account holding a balance in a single currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// The backend ID of the wallet.
    pub id: WalletId,
    /// The name chosen by the user.
    pub name: String,
    /// The current balance as a decimal string, e.g., "1234.50".
    pub balance: String,
    /// The ISO 4217 currency code, e.g., "EUR".
    pub currency: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// The transactions in the order the backend returned them.
    ///
    /// Wallet lists do not include transactions, so this is empty for those.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Wallet {
    /// The balance formatted for display, e.g., "1.234,50 €".
    pub fn formatted_balance(&self) -> String {
        money::format_money(&self.balance, &self.currency)
    }
}
