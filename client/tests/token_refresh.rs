//! Integration coverage for the HTTP adapter, refresh-and-retry, and login.
//!
//! A wiremock server stands in for the banking backend so requests travel
//! through reqwest exactly as they do in production.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use banking_client::api::BankingApi;
use banking_client::cli::{App, Command};
use banking_client::domain::ports::{AccountsApi, AuthApi, MemorySessionStorage, SessionStorage};
use banking_client::domain::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use banking_client::domain::{LoginCredentials, Role, User, UserId};
use banking_client::outbound::http::{ReqwestTransport, TRACE_ID_HEADER};
use banking_client::stores::{AccountStore, AuthStore};
use banking_client::{AuthenticatedClient, ErrorCode, SessionHandle};
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_for(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

fn customer() -> User {
    User {
        id: UserId::new(1),
        username: "alice".to_owned(),
        role: Role::Customer,
        active: true,
    }
}

fn transport(server: &MockServer) -> Arc<ReqwestTransport> {
    let base = Url::parse(&format!("{}/api", server.uri())).expect("mock server url");
    Arc::new(ReqwestTransport::new(base, Duration::from_secs(5)).expect("http client"))
}

fn api(server: &MockServer, session: &SessionHandle) -> Arc<BankingApi<ReqwestTransport>> {
    let client = AuthenticatedClient::new(transport(server), session.clone());
    Arc::new(BankingApi::new(client))
}

fn signed_in(storage: Arc<MemorySessionStorage>) -> SessionHandle {
    let session = SessionHandle::restore(storage).expect("restore");
    session
        .establish("stale-access", "refresh-1", customer())
        .expect("establish");
    session
}

fn accounts_body() -> Value {
    json!([{"id": 1, "accountNumber": "100012345678", "balance": 500.00}])
}

#[rstest]
#[tokio::test]
async fn expired_token_is_refreshed_once_and_the_request_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/accounts/1"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "fresh-access"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/accounts/1"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemorySessionStorage::new());
    let session = signed_in(storage.clone());
    let accounts: Arc<dyn AccountsApi> = api(&server, &session);
    let mut store = AccountStore::new(accounts);

    store.fetch_accounts(UserId::new(1)).await.expect("fetch succeeds");

    let listed = store.accounts().items();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|a| a.balance), Some(Decimal::new(50000, 2)));
    assert!(!store.accounts().is_loading());
    assert_eq!(
        session.access_token().as_deref().map(String::as_str),
        Some("fresh-access")
    );
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), Ok(Some("fresh-access".to_owned())));
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), Ok(Some("refresh-1".to_owned())));
}

#[rstest]
#[tokio::test]
async fn failed_refresh_clears_the_session_and_surfaces_the_refresh_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/accounts/1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Refresh token revoked"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemorySessionStorage::new());
    let session = signed_in(storage.clone());
    let accounts: Arc<dyn AccountsApi> = api(&server, &session);
    let mut store = AccountStore::new(accounts);

    let err = store
        .fetch_accounts(UserId::new(1))
        .await
        .expect_err("refresh fails");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), "Refresh token revoked");
    assert!(!session.is_authenticated());
    assert!(storage.is_empty());
}

#[rstest]
#[tokio::test]
async fn missing_refresh_token_clears_the_session_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/accounts/1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Token expired"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let storage = Arc::new(MemorySessionStorage::new());
    storage.set(ACCESS_TOKEN_KEY, "stale-access").expect("seed");
    let session = SessionHandle::restore(storage.clone()).expect("restore");
    let accounts: Arc<dyn AccountsApi> = api(&server, &session);
    let mut store = AccountStore::new(accounts);

    let err = store
        .fetch_accounts(UserId::new(1))
        .await
        .expect_err("unauthorised");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "Token expired");
    assert!(storage.is_empty());
}

#[rstest]
#[case(Role::Customer, "/dashboard")]
#[case(Role::Banker, "/banker/dashboard")]
#[case(Role::Admin, "/admin/dashboard")]
#[tokio::test]
async fn login_establishes_the_session_and_lands_by_role(
    #[case] role: Role,
    #[case] landing: &str,
) {
    let server = MockServer::start().await;
    let access = token_for(&json!({
        "userId": 42,
        "username": "sam",
        "role": role.as_str(),
        "active": true
    }));
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "sam", "password": "Secret#123", "role": role.as_str()})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accessToken": access, "refreshToken": "refresh-42"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemorySessionStorage::new());
    let session = SessionHandle::restore(storage.clone()).expect("restore");
    let auth: Arc<dyn AuthApi> = api(&server, &session);
    let mut store = AuthStore::new(auth, session.clone());
    let credentials =
        LoginCredentials::try_from_parts("sam", "Secret#123", role).expect("credentials");

    let route = store.login(&credentials).await.expect("login succeeds");

    assert_eq!(route, landing);
    assert_eq!(session.user().map(|user| user.role), Some(role));
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), Ok(Some(access)));
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), Ok(Some("refresh-42".to_owned())));
    let user: User = serde_json::from_str(
        &storage.get(USER_KEY).expect("read").expect("user stored"),
    )
    .expect("user json");
    assert_eq!(user.id, UserId::new(42));

    store.logout();
    assert!(storage.is_empty());
    assert!(!session.is_authenticated());
}

#[rstest]
#[tokio::test]
async fn rejected_login_does_not_attempt_a_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = SessionHandle::in_memory();
    let auth: Arc<dyn AuthApi> = api(&server, &session);
    let mut store = AuthStore::new(auth, session);
    let credentials =
        LoginCredentials::try_from_parts("sam", "wrong", Role::Customer).expect("credentials");

    let err = store.login(&credentials).await.expect_err("rejected");

    assert_eq!(err.message(), "Invalid credentials");
}

#[rstest]
#[tokio::test]
async fn requests_carry_trace_and_bearer_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/accounts/1"))
        .and(header_exists(TRACE_ID_HEADER))
        .and(header("authorization", "Bearer stale-access"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let session = signed_in(Arc::new(MemorySessionStorage::new()));
    let accounts = api(&server, &session);

    let listed = accounts
        .fetch_accounts(UserId::new(1))
        .await
        .expect("fetch succeeds");

    assert_eq!(listed.len(), 1);
}

#[rstest]
#[tokio::test]
async fn accounts_command_prints_formatted_balances() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/accounts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "accountNumber": "100012345678", "balance": 500.00},
            {"id": 2, "accountNumber": "100087654321", "balance": "123456.5"}
        ])))
        .mount(&server)
        .await;

    let session = signed_in(Arc::new(MemorySessionStorage::new()));
    let app = App::new(transport(&server), session);
    let mut out = Vec::new();

    app.run(Command::Accounts, &mut out).await.expect("command runs");

    let report = String::from_utf8(out).expect("utf-8 report");
    assert!(report.contains("1000 1234 5678"), "{report}");
    assert!(report.contains("₹500.00"), "{report}");
    assert!(report.contains("Total balance: ₹1,23,956.50"), "{report}");
}
