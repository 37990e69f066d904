//! A typed client for the backend JSON API.

use std::{fmt, time::Duration};

use reqwest::{Method, RequestBuilder, Response, StatusCode, header::ACCEPT};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    Error,
    schema::{
        AddTransactionPayload, AddWalletPayload, Credentials, ProfileForm, Registration,
        UpdateWalletPayload,
    },
    transaction::{Category, Transaction, TransactionId},
    user::User,
    wallet::{Wallet, WalletId},
};

const USER_AGENT: &str = concat!("pocketbook/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The bearer token the backend issued for the logged in user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(********)")
    }
}

/// The backend response to a successful log in or registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub token: ApiToken,
    pub user: User,
}

/// The body of a backend error response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// The backend may wrap resources in a `data` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Sends requests to the backend API.
///
/// Cloning is cheap, the clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`, e.g., "http://localhost:8000".
    ///
    /// # Errors
    /// Returns [Error::ApiUnavailable] if the HTTP client could not be built.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| Error::ApiUnavailable(error.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The URL the client sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&ApiToken>) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!("Sending {method} {url}");

        let request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");

        match token {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    /// Send `request` and map error statuses to [Error].
    async fn execute(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request
            .send()
            .await
            .map_err(|error| Error::ApiUnavailable(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_owned(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => Error::Unauthenticated,
            StatusCode::NOT_FOUND => Error::NotFound,
            StatusCode::UNPROCESSABLE_ENTITY => Error::Rejected(message),
            status => Error::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Send `request` and deserialize the JSON response body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let response = self.execute(request).await?;

        response
            .json::<Envelope<T>>()
            .await
            .map(Envelope::into_inner)
            .map_err(|error| Error::UnexpectedResponse(error.to_string()))
    }

    /// Send `request`, ignoring the response body.
    async fn send_empty(&self, request: RequestBuilder) -> Result<(), Error> {
        self.execute(request).await.map(|_| ())
    }

    /// Exchange the user's credentials for an API token.
    ///
    /// # Errors
    /// Returns [Error::Rejected] if the credentials are wrong.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, Error> {
        self.send(self.request(Method::POST, "/api/login", None).json(credentials))
            .await
    }

    /// Create a new account and log in to it.
    ///
    /// # Errors
    /// Returns [Error::Rejected] if, e.g., the email is already taken.
    pub async fn register(&self, registration: &Registration) -> Result<Session, Error> {
        self.send(
            self.request(Method::POST, "/api/register", None)
                .json(registration),
        )
        .await
    }

    /// Revoke `token`.
    pub async fn logout(&self, token: &ApiToken) -> Result<(), Error> {
        self.send_empty(self.request(Method::POST, "/api/logout", Some(token)))
            .await
    }

    /// The user the token belongs to.
    pub async fn get_user(&self, token: &ApiToken) -> Result<User, Error> {
        self.send(self.request(Method::GET, "/api/user", Some(token)))
            .await
    }

    /// Change the name and email of the logged in user.
    pub async fn update_profile(
        &self,
        token: &ApiToken,
        profile: &ProfileForm,
    ) -> Result<User, Error> {
        self.send(
            self.request(Method::PUT, "/api/user/profile-information", Some(token))
                .json(profile),
        )
        .await
    }

    /// The user's wallets, without their transactions.
    pub async fn list_wallets(&self, token: &ApiToken) -> Result<Vec<Wallet>, Error> {
        self.send(self.request(Method::GET, "/api/wallets", Some(token)))
            .await
    }

    /// Create a wallet, responds with the created wallet.
    pub async fn add_wallet(
        &self,
        token: &ApiToken,
        payload: &AddWalletPayload,
    ) -> Result<Wallet, Error> {
        self.send(
            self.request(Method::POST, "/api/wallets", Some(token))
                .json(payload),
        )
        .await
    }

    /// A wallet with its transactions.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no wallet with `wallet_id`.
    pub async fn get_wallet(&self, token: &ApiToken, wallet_id: WalletId) -> Result<Wallet, Error> {
        self.send(self.request(
            Method::GET,
            &format!("/api/wallets/{wallet_id}"),
            Some(token),
        ))
        .await
    }

    /// Rename a wallet or change its currency.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no wallet with `wallet_id`.
    pub async fn update_wallet(
        &self,
        token: &ApiToken,
        wallet_id: WalletId,
        payload: &UpdateWalletPayload,
    ) -> Result<Wallet, Error> {
        self.send(
            self.request(
                Method::PATCH,
                &format!("/api/wallets/{wallet_id}"),
                Some(token),
            )
            .json(payload),
        )
        .await
    }

    /// Delete a wallet and its transactions.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no wallet with `wallet_id`.
    pub async fn delete_wallet(&self, token: &ApiToken, wallet_id: WalletId) -> Result<(), Error> {
        self.send_empty(self.request(
            Method::DELETE,
            &format!("/api/wallets/{wallet_id}"),
            Some(token),
        ))
        .await
    }

    /// The categories the user has used so far.
    pub async fn list_categories(&self, token: &ApiToken) -> Result<Vec<Category>, Error> {
        self.send(self.request(Method::GET, "/api/categories", Some(token)))
            .await
    }

    /// Add a transaction to a wallet.
    ///
    /// The backend creates the category if the user has not used its name before.
    pub async fn add_transaction(
        &self,
        token: &ApiToken,
        wallet_id: WalletId,
        payload: &AddTransactionPayload,
    ) -> Result<Transaction, Error> {
        self.send(
            self.request(
                Method::POST,
                &format!("/api/wallets/{wallet_id}/transactions"),
                Some(token),
            )
            .json(payload),
        )
        .await
    }

    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction with `transaction_id`.
    pub async fn delete_transaction(
        &self,
        token: &ApiToken,
        transaction_id: TransactionId,
    ) -> Result<(), Error> {
        self.send_empty(self.request(
            Method::DELETE,
            &format!("/api/transactions/{transaction_id}"),
            Some(token),
        ))
        .await
    }
}
