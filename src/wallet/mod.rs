//! Wallets: the list of the user's wallets, the page for a single wallet and
//! the dialogs and endpoints for creating, updating and deleting them.

mod core;
mod create_endpoint;
mod delete_endpoint;
pub(crate) mod dialogs;
mod edit_endpoint;
mod wallet_page;
mod wallets_page;

pub use core::{Wallet, WalletId};
pub use create_endpoint::create_wallet_endpoint;
pub use delete_endpoint::delete_wallet_endpoint;
pub use edit_endpoint::update_wallet_endpoint;
pub use wallet_page::get_wallet_page;
pub use wallets_page::get_wallets_page;
