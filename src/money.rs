//! Currency codes and display formatting for decimal money amounts.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// The ISO 4217 codes a wallet can be created with.
pub const CURRENCIES: [&str; 10] = [
    "EUR", "USD", "GBP", "CHF", "JPY", "PLN", "SEK", "NOK", "DKK", "CZK",
];

/// The currency used when the user does not pick one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Whether `code` is one of the [CURRENCIES].
pub fn is_supported_currency(code: &str) -> bool {
    CURRENCIES.contains(&code)
}

/// The symbol shown after an amount, e.g., "€" for "EUR".
///
/// Codes without a well known symbol are shown as the code itself.
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "JPY" => "¥",
        other => other,
    }
}

fn fraction_digits(code: &str) -> u32 {
    match code {
        "JPY" => 0,
        _ => 2,
    }
}

/// Parse a decimal amount string such as "1234.5" or "-12".
///
/// A leading "." is accepted (".5" is half a unit) and an empty string is zero.
pub fn parse_amount(amount: &str) -> Option<Decimal> {
    let amount = amount.trim();

    match amount {
        "" => Some(Decimal::ZERO),
        _ if amount.starts_with('.') => Decimal::from_str(&format!("0{amount}")).ok(),
        _ if amount.starts_with("-.") => Decimal::from_str(&format!("-0{}", &amount[1..])).ok(),
        _ => Decimal::from_str(amount).ok(),
    }
}

/// Format `amount` in `currency` with German number formatting, e.g., "1.234,56 €".
///
/// Amounts are rounded half away from zero to the currency's minor unit.
/// If `amount` is not a decimal number, it is returned unchanged.
pub fn format_money(amount: &str, currency: &str) -> String {
    match parse_amount(amount) {
        Some(value) => format_decimal(value, currency),
        None => amount.to_owned(),
    }
}

/// Format an already parsed amount, see [format_money].
pub fn format_decimal(value: Decimal, currency: &str) -> String {
    let digits = fraction_digits(currency);
    let rounded = value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = format!("{:.*}", digits as usize, rounded.abs());
    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let mut number = group_thousands(integer);
    if let Some(fraction) = fraction {
        number.push(',');
        number.push_str(fraction);
    }

    format!("{sign}{number} {}", currency_symbol(currency))
}

/// Insert a "." between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    grouped
}
