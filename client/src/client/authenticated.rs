//! Bearer injection with one silent token refresh on 401.
//!
//! Every request reads the access token from the session at send time. When
//! the backend rejects it, the client refreshes once through
//! `POST /auth/refresh`, stores the new token, and re-issues the original
//! request once. Refreshes are serialised behind a gate: a request that
//! reaches the gate after another one already replaced its token retries with
//! the current token instead of refreshing again.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::SessionHandle;
use crate::domain::ports::{ApiError, ApiRequest, ApiResponse, ApiTransport};

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

/// Client that authenticates requests with the session's access token.
///
/// Clones share the transport, session, and refresh gate.
#[derive(Debug)]
pub struct AuthenticatedClient<T> {
    transport: Arc<T>,
    session: SessionHandle,
    refresh_gate: Arc<Mutex<()>>,
}

impl<T> Clone for AuthenticatedClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            session: self.session.clone(),
            refresh_gate: Arc::clone(&self.refresh_gate),
        }
    }
}

fn into_result(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::status(response.status, response.message()))
    }
}

impl<T: ApiTransport> AuthenticatedClient<T> {
    /// Wrap `transport`, authenticating with `session`.
    pub fn new(transport: Arc<T>, session: SessionHandle) -> Self {
        Self {
            transport,
            session,
            refresh_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Session this client reads tokens from.
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Send `request` with the current bearer token.
    ///
    /// A 401 triggers at most one refresh and one retry. A 401 on the retry
    /// is returned as is.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Status`] for non-2xx responses, including the original
    ///   401 when no refresh token is held.
    /// - The refresh failure when the refresh call itself fails; the session
    ///   is cleared in both cases.
    /// - [`ApiError::Transport`] when no response was received.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let sent_with = self.session.access_token();
        let response = self
            .transport
            .send(request, sent_with.as_deref().map(String::as_str))
            .await?;
        if !response.is_unauthorized() {
            return into_result(response);
        }

        debug!(method = %request.method, path = %request.path, "access token rejected");
        let fresh = self
            .refresh_after_unauthorized(sent_with.as_deref().map(String::as_str), response)
            .await?;
        let retried = self.transport.send(request, Some(fresh.as_str())).await?;
        into_result(retried)
    }

    /// Send `request` without a bearer token or the refresh interceptor.
    ///
    /// Used for login, registration, and refresh.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] for non-2xx responses and
    /// [`ApiError::Transport`] when no response was received.
    pub async fn send_unauthenticated(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        into_result(self.transport.send(request, None).await?)
    }

    async fn refresh_after_unauthorized(
        &self,
        stale: Option<&str>,
        rejected: ApiResponse,
    ) -> Result<Zeroizing<String>, ApiError> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self
            .session
            .access_token()
            .filter(|current| Some(current.as_str()) != stale)
        {
            debug!("access token already refreshed by a concurrent request");
            return Ok(current);
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            info!("no refresh token held; ending session");
            self.end_session();
            return Err(ApiError::status(rejected.status, rejected.message()));
        };

        match self.refresh(refresh_token.as_str()).await {
            Ok(access_token) => {
                if let Err(err) = self.session.replace_access_token(access_token.as_str()) {
                    warn!(error = %err, "failed to persist refreshed access token");
                }
                info!("access token refreshed");
                Ok(access_token)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed; ending session");
                self.end_session();
                Err(err)
            }
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Zeroizing<String>, ApiError> {
        let request =
            ApiRequest::post(REFRESH_PATH).with_body(json!({ "refreshToken": refresh_token }));
        let response = self.send_unauthenticated(&request).await?;
        let body: RefreshResponse = response.json().map_err(ApiError::decode)?;
        if body.access_token.trim().is_empty() {
            return Err(ApiError::decode("refresh response carried an empty access token"));
        }
        Ok(Zeroizing::new(body.access_token))
    }

    fn end_session(&self) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "failed to clear persisted session");
        }
    }
}
