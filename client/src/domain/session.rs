//! Session state and its explicitly passed handle.
//!
//! The session holds the access token, refresh token, and decoded user. It
//! lives in memory behind a [`SessionHandle`] and is mirrored to durable
//! storage under three fixed keys so a restarted client resumes signed in.
//! Only login, logout, and token refresh mutate it.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::ports::{MemorySessionStorage, SessionStorage, SessionStorageError};
use super::user::User;

/// Durable key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Durable key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Durable key holding the JSON-serialised user.
pub const USER_KEY: &str = "user";

/// Point-in-time copy of the session.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    access_token: Option<Zeroizing<String>>,
    refresh_token: Option<Zeroizing<String>>,
    user: Option<User>,
}

impl Session {
    /// Current bearer token.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().map(String::as_str)
    }

    /// Current refresh token.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().map(String::as_str)
    }

    /// Signed-in user.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether an access token is held.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

fn secret(value: Option<String>) -> Option<Zeroizing<String>> {
    value
        .filter(|token| !token.trim().is_empty())
        .map(Zeroizing::new)
}

/// Shared handle to the session, cloned into the client and the stores.
///
/// Clones share the same state and storage.
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<Session>>,
    storage: Arc<dyn SessionStorage>,
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("session", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Load the session persisted in `storage`.
    ///
    /// A stored user that no longer parses is dropped with a warning rather
    /// than failing the restore.
    ///
    /// # Errors
    ///
    /// Propagates storage read failures.
    pub fn restore(storage: Arc<dyn SessionStorage>) -> Result<Self, SessionStorageError> {
        let access_token = secret(storage.get(ACCESS_TOKEN_KEY)?);
        let refresh_token = secret(storage.get(REFRESH_TOKEN_KEY)?);
        let user = match storage.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(error = %err, "ignoring unreadable stored user");
                    None
                }
            },
            None => None,
        };

        debug!(
            authenticated = access_token.is_some(),
            has_user = user.is_some(),
            "session restored"
        );
        Ok(Self {
            state: Arc::new(RwLock::new(Session {
                access_token,
                refresh_token,
                user,
            })),
            storage,
        })
    }

    /// Empty session backed by in-memory storage.
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(RwLock::new(Session::default())),
            storage: Arc::new(MemorySessionStorage::new()),
        }
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current bearer token.
    pub fn access_token(&self) -> Option<Zeroizing<String>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .clone()
    }

    /// Current refresh token.
    pub fn refresh_token(&self) -> Option<Zeroizing<String>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token
            .clone()
    }

    /// Signed-in user.
    pub fn user(&self) -> Option<User> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    /// Whether an access token is held.
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    /// Replace the whole session after a successful login.
    ///
    /// Memory is updated first; the durable mirror is written afterwards.
    ///
    /// # Errors
    ///
    /// Returns the first storage write failure.
    pub fn establish(
        &self,
        access_token: &str,
        refresh_token: &str,
        user: User,
    ) -> Result<(), SessionStorageError> {
        let serialised = serde_json::to_string(&user)
            .map_err(|err| SessionStorageError::corrupt(err.to_string()))?;
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state = Session {
                access_token: Some(Zeroizing::new(access_token.to_owned())),
                refresh_token: Some(Zeroizing::new(refresh_token.to_owned())),
                user: Some(user),
            };
        }

        self.storage.set(ACCESS_TOKEN_KEY, access_token)?;
        self.storage.set(REFRESH_TOKEN_KEY, refresh_token)?;
        self.storage.set(USER_KEY, &serialised)
    }

    /// Store a freshly minted access token, keeping the refresh token and user.
    ///
    /// # Errors
    ///
    /// Returns the storage write failure; memory is updated regardless.
    pub fn replace_access_token(&self, access_token: &str) -> Result<(), SessionStorageError> {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.access_token = Some(Zeroizing::new(access_token.to_owned()));
        }
        self.storage.set(ACCESS_TOKEN_KEY, access_token)
    }

    /// Drop every session field from memory and durable storage.
    ///
    /// Memory is always cleared and every key removal is attempted.
    ///
    /// # Errors
    ///
    /// Returns the first removal failure.
    pub fn clear(&self) -> Result<(), SessionStorageError> {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state = Session::default();
        }

        let mut first_error = None;
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, error = %err, "failed to remove session key");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
