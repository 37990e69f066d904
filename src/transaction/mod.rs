//! Transactions and the categories they are grouped by.
//!
//! This module contains:
//! - The `Transaction` and `Category` models sent by the backend
//! - The table and per-category summary shown on the wallet page
//! - The add transaction dialog and the endpoints for adding and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod dialog;
mod summary;
mod table;

pub use core::{Category, Transaction, TransactionId, summarize_by_category};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use dialog::{ADD_TRANSACTION_DIALOG_ID, add_transaction_dialog};
pub use summary::category_summary;
pub use table::transactions_table;
