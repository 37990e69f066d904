//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/dashboard/{wallet_id}', use [format_endpoint].

/// The root route which redirects to the wallets page or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users, lists the user's wallets.
pub const WALLETS_VIEW: &str = "/dashboard";
/// The page for a single wallet and its transactions.
pub const WALLET_VIEW: &str = "/dashboard/{wallet_id}";
/// The page for editing the user's name and email.
pub const PROFILE_VIEW: &str = "/settings/profile";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for registering a new user.
pub const REGISTER_API: &str = "/api/register";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route for updating the user's profile.
pub const PROFILE_API: &str = "/api/profile";
/// The route to create a wallet.
pub const WALLETS_API: &str = "/api/wallets";
/// The route to update or delete a wallet.
pub const WALLET_API: &str = "/api/wallets/{wallet_id}";
/// The route to add a transaction to a wallet.
pub const WALLET_TRANSACTIONS_API: &str = "/api/wallets/{wallet_id}/transactions";
/// The route to delete a transaction from a wallet.
pub const WALLET_TRANSACTION_API: &str = "/api/wallets/{wallet_id}/transactions/{transaction_id}";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/wallets/{wallet_id}', '{wallet_id}' is the parameter.
///
/// Paths with more than one parameter can be filled by calling this function
/// once per parameter, from left to right.
///
/// This function assumes that an endpoint path only contains ASCII characters.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::WALLETS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::WALLET_VIEW);
        assert_endpoint_is_valid_uri(endpoints::PROFILE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::REGISTER_VIEW);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::LOG_IN_API);
        assert_endpoint_is_valid_uri(endpoints::REGISTER_API);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
        assert_endpoint_is_valid_uri(endpoints::PROFILE_API);
        assert_endpoint_is_valid_uri(endpoints::WALLETS_API);
        assert_endpoint_is_valid_uri(endpoints::WALLET_API);
        assert_endpoint_is_valid_uri(endpoints::WALLET_TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::WALLET_TRANSACTION_API);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn fills_two_parameters_left_to_right() {
        let formatted_path = format_endpoint(
            &format_endpoint(endpoints::WALLET_TRANSACTION_API, 3),
            42,
        );

        assert_eq!(formatted_path, "/api/wallets/3/transactions/42");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
