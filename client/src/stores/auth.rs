//! Auth store: login, registration, and logout against the session handle.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::AuthApi;
use crate::domain::{
    DomainError, LoginCredentials, Registration, SessionHandle, User, decode_access_token,
    default_dashboard,
};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Phase of the last auth operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A login or registration is in flight.
    Loading,
    /// The last login or registration succeeded.
    Succeeded,
    /// The last login or registration failed.
    Failed(DomainError),
}

/// State for the sign-in and sign-up pages.
pub struct AuthStore {
    api: Arc<dyn AuthApi>,
    session: SessionHandle,
    state: AuthState,
    register_success: bool,
}

impl AuthStore {
    /// Store writing signed-in identities into `session`.
    pub fn new(api: Arc<dyn AuthApi>, session: SessionHandle) -> Self {
        Self {
            api,
            session,
            state: AuthState::Idle,
            register_success: false,
        }
    }

    /// Phase of the last operation.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Failure of the last operation, if it failed.
    pub fn error(&self) -> Option<&DomainError> {
        match &self.state {
            AuthState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Whether the last registration went through.
    pub fn register_success(&self) -> bool {
        self.register_success
    }

    /// Signed-in user, read from the session.
    pub fn user(&self) -> Option<User> {
        self.session.user()
    }

    /// Whether the session holds an access token.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Sign in and return the dashboard route for the signed-in role.
    ///
    /// The identity is decoded from the issued access token and written to
    /// the session together with both tokens.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state. A token whose
    /// payload cannot be decoded fails the login without touching the
    /// session.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<&'static str, DomainError> {
        self.state = AuthState::Loading;
        let tokens = match self.api.login(credentials).await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(username = credentials.username(), error = %err, "login failed");
                return Err(self.failed(err.into_store_error(LOGIN_FAILED)));
            }
        };

        let claims = match decode_access_token(&tokens.access_token) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(username = credentials.username(), error = %err, "issued token is unreadable");
                return Err(self.failed(DomainError::internal(LOGIN_FAILED)));
            }
        };

        let user = claims.to_user();
        let role = user.role;
        if let Err(err) = self
            .session
            .establish(&tokens.access_token, &tokens.refresh_token, user)
        {
            warn!(error = %err, "session was not persisted; it lasts until exit");
        }

        info!(user_id = %claims.user_id, %role, "signed in");
        self.state = AuthState::Succeeded;
        Ok(default_dashboard(role))
    }

    /// Create an account for a new user.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn register(&mut self, registration: &Registration) -> Result<(), DomainError> {
        self.state = AuthState::Loading;
        self.register_success = false;
        match self.api.register(registration).await {
            Ok(()) => {
                debug!(username = registration.username(), "registered");
                self.state = AuthState::Succeeded;
                self.register_success = true;
                Ok(())
            }
            Err(err) => {
                warn!(username = registration.username(), error = %err, "registration failed");
                Err(self.failed(err.into_store_error(REGISTRATION_FAILED)))
            }
        }
    }

    /// Sign out, clearing the session from memory and durable storage.
    ///
    /// Storage failures are logged; the in-memory session is always cleared.
    pub fn logout(&mut self) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "session storage was not fully cleared");
        }
        self.state = AuthState::Idle;
        self.register_success = false;
        info!("signed out");
    }

    /// Drop a recorded failure.
    pub fn clear_error(&mut self) {
        if self.error().is_some() {
            self.state = AuthState::Idle;
        }
    }

    /// Forget a completed registration.
    pub fn clear_register_success(&mut self) {
        self.register_success = false;
    }

    fn failed(&mut self, error: DomainError) -> DomainError {
        self.state = AuthState::Failed(error.clone());
        error
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::claims::fixtures::token_for;
    use crate::domain::navigation::{ADMIN_DASHBOARD, BANKER_DASHBOARD, CUSTOMER_DASHBOARD};
    use crate::domain::ports::{
        ApiError, MemorySessionStorage, MockAuthApi, SessionStorage, TransportError,
    };
    use crate::domain::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
    use crate::domain::validation::RegisterForm;
    use crate::domain::{ErrorCode, Role, TokenPair, UserId};
    use rstest::rstest;
    use serde_json::json;
    use zeroize::Zeroizing;

    fn tokens_for(role: Role) -> TokenPair {
        TokenPair {
            access_token: token_for(&json!({
                "userId": 7,
                "username": "alice",
                "role": role.as_str(),
                "active": true
            })),
            refresh_token: "refresh-7".to_owned(),
        }
    }

    fn credentials(role: Role) -> LoginCredentials {
        LoginCredentials::try_from_parts("alice", "Secret#123", role).expect("valid credentials")
    }

    fn store_with(api: MockAuthApi) -> (AuthStore, Arc<MemorySessionStorage>) {
        let storage = Arc::new(MemorySessionStorage::new());
        let session = SessionHandle::restore(storage.clone()).expect("restore empty");
        (AuthStore::new(Arc::new(api), session), storage)
    }

    #[rstest]
    #[case(Role::Customer, CUSTOMER_DASHBOARD)]
    #[case(Role::Banker, BANKER_DASHBOARD)]
    #[case(Role::Admin, ADMIN_DASHBOARD)]
    #[tokio::test]
    async fn login_lands_on_role_dashboard(#[case] role: Role, #[case] landing: &str) {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .withf(move |creds| creds.username() == "alice" && creds.role() == role)
            .times(1)
            .returning(move |_| Ok(tokens_for(role)));
        let (mut store, _) = store_with(api);

        let route = store.login(&credentials(role)).await.expect("login succeeds");

        assert_eq!(route, landing);
        assert_eq!(store.state(), &AuthState::Succeeded);
        assert_eq!(store.user().map(|user| user.role), Some(role));
    }

    #[rstest]
    #[tokio::test]
    async fn login_persists_tokens_and_decoded_user() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .returning(|_| Ok(tokens_for(Role::Customer)));
        let (mut store, storage) = store_with(api);

        store
            .login(&credentials(Role::Customer))
            .await
            .expect("login succeeds");

        let access = storage.get(ACCESS_TOKEN_KEY).expect("read").expect("access stored");
        assert_eq!(access, tokens_for(Role::Customer).access_token);
        assert_eq!(storage.get(REFRESH_TOKEN_KEY), Ok(Some("refresh-7".to_owned())));
        let user: User = serde_json::from_str(
            &storage.get(USER_KEY).expect("read").expect("user stored"),
        )
        .expect("user json");
        assert_eq!(user.id, UserId::new(7));
        assert_eq!(user.username, "alice");
        assert!(store.is_authenticated());
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_login_keeps_session_empty() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .returning(|_| Err(ApiError::status(401, Some("Invalid credentials".to_owned()))));
        let (mut store, storage) = store_with(api);

        let err = store
            .login(&credentials(Role::Customer))
            .await
            .expect_err("login rejected");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid credentials");
        assert_eq!(store.error(), Some(&err));
        assert!(storage.is_empty());
        store.clear_error();
        assert_eq!(store.state(), &AuthState::Idle);
    }

    #[rstest]
    #[tokio::test]
    async fn unreadable_token_fails_login() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| {
            Ok(TokenPair {
                access_token: "opaque".to_owned(),
                refresh_token: "r".to_owned(),
            })
        });
        let (mut store, storage) = store_with(api);

        let err = store
            .login(&credentials(Role::Customer))
            .await
            .expect_err("token unreadable");

        assert_eq!(err.message(), LOGIN_FAILED);
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn logout_clears_every_key() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| Ok(tokens_for(Role::Banker)));
        let (mut store, storage) = store_with(api);
        store.login(&credentials(Role::Banker)).await.expect("login");
        assert_eq!(storage.len(), 3);

        store.logout();

        assert!(storage.is_empty());
        assert!(!store.is_authenticated());
        assert_eq!(store.user(), None);
    }

    fn registration() -> Registration {
        RegisterForm {
            username: "new_user".to_owned(),
            password: Zeroizing::new("Secret#123".to_owned()),
            confirm_password: Zeroizing::new("Secret#123".to_owned()),
            role: Some(Role::Customer),
        }
        .validate()
        .expect("valid registration")
    }

    #[rstest]
    #[tokio::test]
    async fn registration_sets_success_flag() {
        let mut api = MockAuthApi::new();
        api.expect_register()
            .withf(|reg| reg.username() == "new_user")
            .times(1)
            .returning(|_| Ok(()));
        let (mut store, storage) = store_with(api);

        store.register(&registration()).await.expect("register");

        assert!(store.register_success());
        assert!(storage.is_empty());
        store.clear_register_success();
        assert!(!store.register_success());
    }

    #[rstest]
    #[tokio::test]
    async fn registration_network_failure_uses_fallback() {
        let mut api = MockAuthApi::new();
        api.expect_register()
            .returning(|_| Err(TransportError::timeout("deadline elapsed").into()));
        let (mut store, _) = store_with(api);

        let err = store.register(&registration()).await.expect_err("fails");

        assert_eq!(err.code(), ErrorCode::Network);
        assert_eq!(err.message(), REGISTRATION_FAILED);
        assert!(!store.register_success());
    }
}
