//! Authenticated request gateway with single-flight token refresh.
//!
//! Every request goes out with the stored bearer token attached. When the
//! backend answers 401, exactly one request (the leader) exchanges the stored
//! refresh token for a new pair while every other 401 of the same burst waits
//! in a queue; once the refresh settles, all of them replay with the new token
//! or fail with the refresh error. Refresh tokens rotate on every use, so the
//! rotated pair is persisted before any replay is released.

use crate::paths;
use dwello_config::ClientConfig;
use dwello_types::{
    ApiError, ApiResponse, AuthSession, CredentialStore, RefreshTokenRequest, SessionResponse,
    TokenPair,
};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// Result alias for gateway calls: the response envelope or the normalized error.
pub type ApiResult<T> = std::result::Result<ApiResponse<T>, ApiError>;

/// What a settled refresh hands to each queued request: the new access token,
/// or the refresh failure.
type RefreshOutcome = std::result::Result<String, ApiError>;

/// Coordination state for the refresh protocol. `refreshing` is the
/// single-flight guard; `waiters` are the requests queued behind the
/// in-flight refresh, released as one batch while the lock is held.
struct RefreshState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// A request in replayable form. The body is captured as JSON so the same
/// request can be re-sent with a different bearer token.
struct RequestSpec {
    method: Method,
    path: String,
    query: Option<serde_json::Value>,
    body: Option<serde_json::Value>,
}

struct Inner {
    http: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    refresh: Mutex<RefreshState>,
}

/// HTTP client for the Dwello backend.
///
/// Injects the stored bearer token into every request and transparently
/// recovers from credential expiry via a single coordinated refresh. Cheap to
/// clone; clones share the credential store and refresh coordination.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    /// Creates a client from configuration and a credential store.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should never happen with
    /// default TLS).
    #[must_use]
    pub fn new(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .expect("failed to create HTTP client");
        Self::with_http(http, &config.base_url, store)
    }

    /// Creates a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(http: Client, base_url: &str, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                store,
                refresh: Mutex::new(RefreshState {
                    refreshing: false,
                    waiters: Vec::new(),
                }),
            }),
        }
    }

    /// The credential store this client reads tokens from.
    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    /// The backend base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // ── HTTP surface ──────────────────────────────────────────────────────

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on transport failure or any
    /// unrecovered HTTP error status.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::GET, path, None, None).await
    }

    /// Sends a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on transport failure or any
    /// unrecovered HTTP error status.
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(Method::GET, path, Some(encode(query)?), None)
            .await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on transport failure or any
    /// unrecovered HTTP error status.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, None, Some(encode(body)?))
            .await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on transport failure or any
    /// unrecovered HTTP error status.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, None, Some(encode(body)?))
            .await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on transport failure or any
    /// unrecovered HTTP error status.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PATCH, path, None, Some(encode(body)?))
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on transport failure or any
    /// unrecovered HTTP error status.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::DELETE, path, None, None).await
    }

    // ── Request lifecycle ─────────────────────────────────────────────────

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<serde_json::Value>,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let spec = RequestSpec {
            method,
            path: path.to_string(),
            query,
            body,
        };

        let token = self.access_token().await?;
        let resp = self.send(&spec, token.as_deref()).await?;

        let resp = if resp.status() == StatusCode::UNAUTHORIZED && !paths::skips_refresh(&spec.path)
        {
            // The replayed response is final: a second 401 surfaces as-is.
            self.recover_unauthorized(&spec).await?
        } else {
            resp
        };

        Self::finish(resp).await
    }

    /// Reads the stored access token; requests without a session go out
    /// without credentials.
    async fn access_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self
            .inner
            .store
            .load()
            .await?
            .map(|s| s.tokens.access_token))
    }

    async fn send(
        &self,
        spec: &RequestSpec,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.inner.base_url, spec.path);
        let mut req = self.inner.http.request(spec.method.clone(), &url);
        if let Some(query) = &spec.query {
            req = req.query(query);
        }
        if let Some(body) = &spec.body {
            req = req.json(body);
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        tracing::debug!(method = %spec.method, path = %spec.path, "sending request");
        req.send().await.map_err(|e| transport_error(&e))
    }

    /// Parses a final response: the envelope on success, the normalized error
    /// otherwise. Performs no recovery.
    async fn finish<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        let status = resp.status();
        if status.is_success() {
            resp.json::<ApiResponse<T>>()
                .await
                .map_err(|e| transport_error(&e))
        } else {
            Err(Self::error_from_response(resp).await)
        }
    }

    async fn error_from_response(resp: reqwest::Response) -> ApiError {
        let status = resp.status().as_u16();
        let body = resp.bytes().await.unwrap_or_default();
        ApiError::from_status_body(status, &body)
    }

    // ── Refresh protocol ──────────────────────────────────────────────────

    /// Handles a 401 on a refresh-eligible path: join the in-flight refresh
    /// as a waiter, or become the leader and perform it. Either way the
    /// request is replayed exactly once with the new token on success.
    async fn recover_unauthorized(
        &self,
        spec: &RequestSpec,
    ) -> Result<reqwest::Response, ApiError> {
        let waiter = {
            let mut state = self.inner.refresh.lock().unwrap();
            if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.refreshing = true;
                None
            }
        };

        let outcome = match waiter {
            Some(rx) => rx
                .await
                .map_err(|_| ApiError::transport("token refresh was interrupted"))?,
            None => {
                let outcome = self.perform_refresh().await;
                // Clear the flag and drain the queue in one critical section:
                // the release batch is atomic with respect to new arrivals.
                let waiters = {
                    let mut state = self.inner.refresh.lock().unwrap();
                    state.refreshing = false;
                    std::mem::take(&mut state.waiters)
                };
                for tx in waiters {
                    // Receiver gone means the waiting caller was aborted.
                    let _ = tx.send(outcome.clone());
                }
                outcome
            }
        };

        let token = outcome?;
        self.send(spec, Some(&token)).await
    }

    /// Runs the refresh call and applies its failure semantics: a failed
    /// refresh is fatal to the session, so the whole stored session goes.
    async fn perform_refresh(&self) -> RefreshOutcome {
        match self.refresh_session().await {
            Ok(token) => Ok(token),
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, clearing stored session");
                if let Err(clear_err) = self.inner.store.clear().await {
                    tracing::error!(error = %clear_err, "failed to clear credential store");
                }
                Err(err)
            }
        }
    }

    /// Exchanges the stored refresh token for a new pair and persists the
    /// rotation. The call goes straight to the transport, bypassing the
    /// interception path, and carries no bearer header.
    async fn refresh_session(&self) -> RefreshOutcome {
        let refresh_token = self
            .inner
            .store
            .load()
            .await?
            .map(|s| s.tokens.refresh_token)
            .ok_or_else(|| ApiError::transport("no refresh token available"))?;

        let url = format!("{}{}", self.inner.base_url, paths::AUTH_REFRESH);
        let resp = self
            .inner
            .http
            .post(&url)
            .json(&RefreshTokenRequest { refresh_token })
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        let envelope: ApiResponse<SessionResponse> =
            resp.json().await.map_err(|e| transport_error(&e))?;
        let data = envelope.into_data()?;

        let session = AuthSession::new(TokenPair::new(
            data.access_token.clone(),
            data.refresh_token,
        ))
        .with_user(data.user);
        self.inner.store.save(&session).await?;

        tracing::debug!("token refresh succeeded, credential pair rotated");
        Ok(data.access_token)
    }
}

/// Maps a transport-level failure into the normalized error shape.
fn transport_error(err: &reqwest::Error) -> ApiError {
    let mut api_err = ApiError::transport(err.to_string());
    api_err.status_code = err.status().map(|s| s.as_u16());
    api_err
}

fn encode<B: Serialize + ?Sized>(value: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::transport(format!("failed to encode request: {e}")))
}
