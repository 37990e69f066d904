//! Validation of the submitted forms.
//!
//! Each form is deserialized into a raw struct of strings which is then
//! validated into the payload sent to the backend. Validation failures are
//! collected per field in [FieldErrors] so that the form can be re-rendered
//! with a message next to each offending input, without calling the backend.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::money::{self, DEFAULT_CURRENCY};

/// The longest name, category or description the backend accepts.
pub const MAX_TEXT_LENGTH: usize = 255;
/// The shortest password allowed at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// The initial balance of a wallet when the user does not give one.
pub const DEFAULT_BALANCE: &str = "0.00";

pub const AMOUNT_FORMAT_MESSAGE: &str = "Amount must be a number with up to two decimal places";
pub const AMOUNT_ZERO_MESSAGE: &str = "Amount must not be zero";
pub const AMOUNT_TOO_LARGE_MESSAGE: &str = "Amount is too large";
pub const CATEGORY_REQUIRED_MESSAGE: &str = "Category is required";
pub const INVALID_DATE_MESSAGE: &str = "Invalid date";

static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*(\.\d{1,2})?$").expect("amount pattern is a valid regex"));
static BALANCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+(\.\d{1,2})?$").expect("balance pattern is a valid regex")
});
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Validation messages keyed by form field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Record `message` for `field`, keeping the first message if there already is one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// The message for `field`, if it failed validation.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// The number of user-perceived characters in `text`.
pub fn char_count(text: &str) -> usize {
    text.graphemes(true).count()
}

fn check_text(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
    required: bool,
) {
    if required && value.is_empty() {
        errors.add(field, format!("{label} is required"));
    } else if char_count(value) > MAX_TEXT_LENGTH {
        errors.add(
            field,
            format!("{label} must be at most {MAX_TEXT_LENGTH} characters"),
        );
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.add("email", "Enter a valid email address");
    }
}

fn check_currency(errors: &mut FieldErrors, currency: &str) {
    if !money::is_supported_currency(currency) {
        errors.add("currency", format!("Unsupported currency \"{currency}\""));
    }
}

/// The log-in form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LogInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Set to "on" when the "remember me" checkbox is ticked.
    #[serde(default)]
    pub remember_me: Option<String>,
    /// The page to go to after logging in.
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// The credentials sent to the backend to log in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LogInForm {
    pub fn remember_me(&self) -> bool {
        self.remember_me.is_some()
    }

    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.email.is_empty() {
            errors.add("email", "Email is required");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }

        errors.into_result(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// The registration form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

/// The details sent to the backend to create an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();

        check_text(&mut errors, "name", "Name", name, true);
        check_email(&mut errors, &self.email);

        if char_count(&self.password) < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }

        if self.password != self.password_confirmation {
            errors.add("password_confirmation", "Passwords do not match");
        }

        errors.into_result(Registration {
            name: name.to_owned(),
            email: self.email.clone(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
        })
    }
}

/// The profile settings form, also used as the payload sent to the backend.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileForm, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();

        check_text(&mut errors, "name", "Name", name, true);
        check_email(&mut errors, &self.email);

        errors.into_result(ProfileForm {
            name: name.to_owned(),
            email: self.email.clone(),
        })
    }
}

/// The form for creating a wallet.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AddWalletForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
}

/// The request body for creating a wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddWalletPayload {
    pub name: String,
    pub currency: String,
    pub balance: String,
}

/// Treat a missing or blank field as unspecified.
fn specified(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl AddWalletForm {
    /// Validate the form, filling in the default currency and balance
    /// when they are not specified.
    pub fn validate(&self) -> Result<AddWalletPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();
        let currency = specified(&self.currency).unwrap_or(DEFAULT_CURRENCY);
        let balance = specified(&self.balance).unwrap_or(DEFAULT_BALANCE);

        check_text(&mut errors, "name", "Name", name, true);
        check_currency(&mut errors, currency);

        if !BALANCE_PATTERN.is_match(balance) {
            errors.add(
                "balance",
                "Balance must be a number with up to two decimal places",
            );
        }

        errors.into_result(AddWalletPayload {
            name: name.to_owned(),
            currency: currency.to_owned(),
            balance: balance.to_owned(),
        })
    }
}

/// The form for renaming a wallet or changing its currency.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateWalletForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency: String,
}

/// The request body for updating a wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateWalletPayload {
    pub name: String,
    pub currency: String,
}

impl UpdateWalletForm {
    pub fn validate(&self) -> Result<UpdateWalletPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();

        check_text(&mut errors, "name", "Name", name, true);
        check_currency(&mut errors, &self.currency);

        errors.into_result(UpdateWalletPayload {
            name: name.to_owned(),
            currency: self.currency.clone(),
        })
    }
}

/// The form for adding a transaction to a wallet.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AddTransactionForm {
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: String,
}

/// The request body for adding a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddTransactionPayload {
    pub category_name: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// An ISO 8601 timestamp in UTC with millisecond precision.
    pub date: String,
}

impl AddTransactionForm {
    pub fn validate(&self) -> Result<AddTransactionPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        let category_name = self.category_name.trim();

        if category_name.is_empty() {
            errors.add("category_name", CATEGORY_REQUIRED_MESSAGE);
        } else {
            check_text(&mut errors, "category_name", "Category", category_name, true);
        }

        if let Err(message) = validate_amount(&self.amount) {
            errors.add("amount", message);
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty());
        if let Some(description) = description {
            check_text(&mut errors, "description", "Description", description, false);
        }

        let date = match normalize_date(&self.date) {
            Some(date) => date,
            None => {
                errors.add("date", INVALID_DATE_MESSAGE);
                String::new()
            }
        };

        errors.into_result(AddTransactionPayload {
            category_name: category_name.to_owned(),
            amount: self.amount.clone(),
            description: description.map(str::to_owned),
            date,
        })
    }
}

/// Check that `amount` is an unsigned number with at most two decimal
/// places that is not zero.
///
/// The leading digits are optional, so ".5" is accepted. The empty string
/// matches the pattern but counts as zero.
pub fn validate_amount(amount: &str) -> Result<Decimal, &'static str> {
    if !AMOUNT_PATTERN.is_match(amount) {
        return Err(AMOUNT_FORMAT_MESSAGE);
    }

    match money::parse_amount(amount) {
        Some(value) if value.is_zero() => Err(AMOUNT_ZERO_MESSAGE),
        Some(value) => Ok(value),
        // Matches the pattern, so only too many digits for a `Decimal` get here.
        None => Err(AMOUNT_TOO_LARGE_MESSAGE),
    }
}

/// Convert a date ("2024-05-01") or RFC 3339 timestamp into a UTC timestamp
/// such as "2024-05-01T00:00:00.000Z".
///
/// Dates without a time are taken to be midnight UTC.
pub fn normalize_date(value: &str) -> Option<String> {
    let value = value.trim();

    let timestamp = match OffsetDateTime::parse(value, &Rfc3339) {
        Ok(timestamp) => timestamp.to_offset(UtcOffset::UTC),
        Err(_) => Date::parse(value, format_description!("[year]-[month]-[day]"))
            .ok()?
            .midnight()
            .assume_utc(),
    };

    timestamp
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .ok()
}
