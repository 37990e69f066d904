//! An in-process stand-in for the backend API, served on an ephemeral port.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    api::{ApiClient, ApiToken},
    transaction::{Category, Transaction, TransactionId},
    user::{User, UserID},
    wallet::{Wallet, WalletId},
};

pub(crate) const TEST_NAME: &str = "Alice";
pub(crate) const TEST_EMAIL: &str = "alice@example.com";
pub(crate) const TEST_PASSWORD: &str = "correct horse";
const TEST_TOKEN: &str = "1|test-token";
const TIMESTAMP: &str = "2024-05-01T08:00:00.000000Z";

#[derive(Debug)]
pub(crate) struct FakeApiData {
    pub user: User,
    pub password: String,
    pub tokens: Vec<String>,
    pub other_emails: Vec<String>,
    pub wallets: Vec<Wallet>,
    pub categories: Vec<Category>,
    pub next_id: i64,
    /// The number of requests the backend has received.
    pub request_count: usize,
    /// When set, every authenticated request fails with this status.
    pub fail_with: Option<StatusCode>,
}

impl FakeApiData {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type SharedData = Arc<Mutex<FakeApiData>>;

/// A running fake backend and the client to talk to it.
pub(crate) struct FakeApi {
    data: SharedData,
    client: ApiClient,
}

impl FakeApi {
    /// Start the fake backend with one registered user and no wallets.
    pub(crate) async fn start() -> Self {
        let data = Arc::new(Mutex::new(FakeApiData {
            user: User {
                id: UserID::new(1),
                name: TEST_NAME.to_owned(),
                email: TEST_EMAIL.to_owned(),
            },
            password: TEST_PASSWORD.to_owned(),
            tokens: vec![TEST_TOKEN.to_owned()],
            other_emails: vec!["taken@example.com".to_owned()],
            wallets: Vec::new(),
            categories: Vec::new(),
            next_id: 100,
            request_count: 0,
            fail_with: None,
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind fake backend");
        let address = listener
            .local_addr()
            .expect("Could not get fake backend address");
        let router = fake_router(data.clone());

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Fake backend stopped");
        });

        let client = ApiClient::new(&format!("http://{address}"))
            .expect("Could not create client for fake backend");

        Self { data, client }
    }

    pub(crate) fn client(&self) -> ApiClient {
        self.client.clone()
    }

    /// The token of the registered user.
    pub(crate) fn token(&self) -> ApiToken {
        ApiToken::new(TEST_TOKEN)
    }

    /// App state that sends backend requests to this fake.
    pub(crate) fn app_state(&self) -> AppState {
        AppState::new("foobar", "Etc/UTC", self.client())
    }

    pub(crate) fn data(&self) -> MutexGuard<'_, FakeApiData> {
        self.data.lock().expect("Could not lock fake backend data")
    }

    pub(crate) fn request_count(&self) -> usize {
        self.data().request_count
    }

    /// Make every authenticated request fail with `status`.
    pub(crate) fn fail_with(&self, status: StatusCode) {
        self.data().fail_with = Some(status);
    }

    pub(crate) fn add_wallet(&self, name: &str, balance: &str, currency: &str) -> WalletId {
        let mut data = self.data();
        let id = data.next_id();

        data.wallets.push(Wallet {
            id,
            name: name.to_owned(),
            balance: balance.to_owned(),
            currency: currency.to_owned(),
            created_at: Some(TIMESTAMP.to_owned()),
            updated_at: Some(TIMESTAMP.to_owned()),
            transactions: Vec::new(),
        });

        id
    }

    pub(crate) fn add_transaction(
        &self,
        wallet_id: WalletId,
        category_name: &str,
        amount: &str,
        date: &str,
    ) -> TransactionId {
        let mut data = self.data();
        let transaction = new_transaction(&mut data, wallet_id, category_name, amount, None, date);
        let id = transaction.id;

        data.wallets
            .iter_mut()
            .find(|wallet| wallet.id == wallet_id)
            .expect("No wallet with the given ID")
            .transactions
            .push(transaction);

        id
    }

    pub(crate) fn wallet(&self, wallet_id: WalletId) -> Option<Wallet> {
        self.data()
            .wallets
            .iter()
            .find(|wallet| wallet.id == wallet_id)
            .cloned()
    }
}

fn new_transaction(
    data: &mut FakeApiData,
    wallet_id: WalletId,
    category_name: &str,
    amount: &str,
    description: Option<String>,
    date: &str,
) -> Transaction {
    let category_id = match data
        .categories
        .iter()
        .find(|category| category.name == category_name)
    {
        Some(category) => category.id,
        None => {
            let id = data.next_id();
            data.categories.push(Category {
                id,
                user_id: Some(data.user.id),
                name: category_name.to_owned(),
                created_at: Some(TIMESTAMP.to_owned()),
                updated_at: Some(TIMESTAMP.to_owned()),
            });
            id
        }
    };

    let currency = data
        .wallets
        .iter()
        .find(|wallet| wallet.id == wallet_id)
        .map(|wallet| wallet.currency.clone());

    Transaction {
        id: data.next_id(),
        user_id: Some(data.user.id),
        category_id: Some(category_id),
        category_name: category_name.to_owned(),
        wallet_id,
        amount: amount.to_owned(),
        description,
        date: date.to_owned(),
        created_at: Some(TIMESTAMP.to_owned()),
        updated_at: Some(TIMESTAMP.to_owned()),
        currency,
    }
}

fn fake_router(data: SharedData) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/logout", post(logout))
        .route("/api/user", get(get_user))
        .route("/api/user/profile-information", put(update_profile))
        .route("/api/wallets", get(list_wallets).post(add_wallet))
        .route(
            "/api/wallets/{wallet_id}",
            get(get_wallet).patch(update_wallet).delete(delete_wallet),
        )
        .route("/api/wallets/{wallet_id}/transactions", post(add_transaction))
        .route("/api/transactions/{transaction_id}", delete(delete_transaction))
        .route("/api/categories", get(list_categories))
        .layer(middleware::from_fn_with_state(data.clone(), count_requests))
        .with_state(data)
}

async fn count_requests(State(data): State<SharedData>, request: Request, next: Next) -> Response {
    data.lock().expect("Could not lock fake backend data").request_count += 1;

    next.run(request).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Check the bearer token and lock the data.
fn authenticate<'a>(
    data: &'a SharedData,
    headers: &HeaderMap,
) -> Result<MutexGuard<'a, FakeApiData>, Response> {
    let data = data.lock().expect("Could not lock fake backend data");

    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if data.tokens.iter().any(|known| known == token) => {}
        _ => return Err(error(StatusCode::UNAUTHORIZED, "Unauthenticated.")),
    }

    if let Some(status) = data.fail_with {
        return Err(error(status, "Server Error"));
    }

    Ok(data)
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

async fn login(State(data): State<SharedData>, Json(body): Json<Value>) -> Response {
    let data = data.lock().expect("Could not lock fake backend data");

    if field(&body, "email") != data.user.email || field(&body, "password") != data.password {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "These credentials do not match our records.",
        );
    }

    Json(json!({ "token": TEST_TOKEN, "user": data.user })).into_response()
}

async fn register(State(data): State<SharedData>, Json(body): Json<Value>) -> Response {
    let mut data = data.lock().expect("Could not lock fake backend data");
    let email = field(&body, "email");

    if email == data.user.email || data.other_emails.iter().any(|taken| taken == email) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "The email has already been taken.",
        );
    }

    data.user = User {
        id: UserID::new(data.next_id()),
        name: field(&body, "name").to_owned(),
        email: email.to_owned(),
    };
    data.password = field(&body, "password").to_owned();

    (
        StatusCode::CREATED,
        Json(json!({ "token": TEST_TOKEN, "user": data.user })),
    )
        .into_response()
}

async fn logout(State(data): State<SharedData>, headers: HeaderMap) -> Response {
    let mut data = match authenticate(&data, &headers) {
        Ok(data) => data,
        Err(response) => return response,
    };

    data.tokens.clear();

    StatusCode::NO_CONTENT.into_response()
}

async fn get_user(State(data): State<SharedData>, headers: HeaderMap) -> Response {
    match authenticate(&data, &headers) {
        Ok(data) => Json(json!(data.user)).into_response(),
        Err(response) => response,
    }
}

async fn update_profile(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = match authenticate(&data, &headers) {
        Ok(data) => data,
        Err(response) => return response,
    };
    let email = field(&body, "email");

    if data.other_emails.iter().any(|taken| taken == email) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "The email has already been taken.",
        );
    }

    data.user.name = field(&body, "name").to_owned();
    data.user.email = email.to_owned();

    Json(json!(data.user)).into_response()
}

async fn list_wallets(State(data): State<SharedData>, headers: HeaderMap) -> Response {
    let data = match authenticate(&data, &headers) {
        Ok(data) => data,
        Err(response) => return response,
    };

    let wallets: Vec<Value> = data
        .wallets
        .iter()
        .map(|wallet| {
            json!({
                "id": wallet.id,
                "name": wallet.name,
                "balance": wallet.balance,
                "currency": wallet.currency,
                "created_at": wallet.created_at,
                "updated_at": wallet.updated_at,
            })
        })
        .collect();

    Json(json!(wallets)).into_response()
}

async fn add_wallet(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = match authenticate(&data, &headers) {
        Ok(data) => data,
        Err(response) => return response,
    };

    let wallet = Wallet {
        id: data.next_id(),
        name: field(&body, "name").to_owned(),
        balance: field(&body, "balance").to_owned(),
        currency: field(&body, "currency").to_owned(),
        created_at: Some(TIMESTAMP.to_owned()),
        updated_at: Some(TIMESTAMP.to_owned()),
        transactions: Vec::new(),
    };
    data.wallets.push(wallet.clone());

    (StatusCode::CREATED, Json(json!(wallet))).into_response()
}

async fn get_wallet(
    State(data): State<SharedData>,
    Path(wallet_id): Path<WalletId>,
    headers: HeaderMap,
) -> Response {
    let data = match authenticate(&data, &headers) {
        Ok(data) => data,
        Err(response) => return response,
    };

    match data.wallets.iter().find(|wallet| wallet.id == wallet_id) {
        // Single resources are wrapped the way Laravel API resources are.
        Some(wallet) => Json(json!({ "data": wallet })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Wallet not found."),
    }
}

async fn update_wallet(
    State(data): State<SharedData>,
    Path(wallet_id): Path<WalletId>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = match authenticate(&data, &headers) {
        Ok(data) => data,
        Err(response) => return response,
    };

    match data.wallets.iter_mut().find(|wallet| wallet.id == wallet_id) {
        Some(wallet) => {
            wallet.name = field(&body, "name").to_owned();
            wallet.currency = field(&body, "currency").to_owned();
            Json(json!(wallet)).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Wallet not found."),
    }
}

async fn delete_wallet(
    State(data): State<SharedData>,
    Path(wallet_id): Path<WalletId>,
    headers: HeaderMap,
) -> Response {
    let mut data = match authenticate(&data, &headers) {
        Ok(data) => data,
        Err(response) => return response,
    };

    let count = data.wallets.len();
    data.wallets.retain(|wallet| wallet.id != wallet_id);

    if data.wallets.len() == count {
        error(StatusCode::NOT_FOUND, "Wallet not found.")
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn list_categories(State(data): State<SharedData>, headers: HeaderMap) -> Response {
    match authenticate(&data, &headers) {
        Ok(data) => Json(json!(data.categories)).into_response(),
        Err(response) => response,
    }
}

async fn add_transaction(
    State(data): State<SharedData>,
    Path(wallet_id): Path<WalletId>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = match authenticate(&data, &headers) {
        Ok(data) => data,
        Err(response) => return response,
    };

    if !data.wallets.iter().any(|wallet| wallet.id == wallet_id) {
        return error(StatusCode::NOT_FOUND, "Wallet not found.");
    }

    let description = body
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let transaction = new_transaction(
        &mut data,
        wallet_id,
        field(&body, "category_name"),
        field(&body, "amount"),
        description,
        field(&body, "date"),
    );

    if let Some(wallet) = data.wallets.iter_mut().find(|wallet| wallet.id == wallet_id) {
        wallet.transactions.push(transaction.clone());
    }

    (StatusCode::CREATED, Json(json!(transaction))).into_response()
}

async fn delete_transaction(
    State(data): State<SharedData>,
    Path(transaction_id): Path<TransactionId>,
    headers: HeaderMap,
) -> Response {
    let mut data = match authenticate(&data, &headers) {
        Ok(data) => data,
        Err(response) => return response,
    };

    let mut found = false;
    for wallet in data.wallets.iter_mut() {
        let count = wallet.transactions.len();
        wallet
            .transactions
            .retain(|transaction| transaction.id != transaction_id);
        found |= wallet.transactions.len() != count;
    }

    if found {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Transaction not found.")
    }
}
