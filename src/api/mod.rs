//! The external backend that owns users, wallets and transactions.

mod client;

pub use client::{ApiClient, ApiToken};
