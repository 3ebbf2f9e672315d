//! OTP-based authentication flow.
//!
//! Login is phone-first: request an OTP, verify it, and hold the returned
//! session (token pair plus user) in the credential store. From then on the
//! gateway keeps the session alive; this service only handles the explicit
//! entry and exit points.

use dwello_client::{ApiClient, paths};
use dwello_types::{
    ApiError, AuthSession, LogoutRequest, RefreshTokenRequest, RequestOtp, RequestOtpResponse,
    SessionResponse, TokenPair, User, VerifyOtp,
};

/// Authentication operations against the `/auth` endpoints.
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Requests an OTP for login or registration.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the backend reports
    /// an unsuccessful envelope.
    pub async fn request_otp(&self, req: &RequestOtp) -> Result<RequestOtpResponse, ApiError> {
        let data = self
            .client
            .post::<RequestOtpResponse, _>(paths::AUTH_REQUEST_OTP, req)
            .await?
            .into_data()?;
        tracing::info!(new_user = data.is_new_user, "otp requested");
        Ok(data)
    }

    /// Verifies an OTP and persists the issued session.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if verification fails or the session cannot
    /// be stored.
    pub async fn verify_otp(&self, req: &VerifyOtp) -> Result<SessionResponse, ApiError> {
        let data = self
            .client
            .post::<SessionResponse, _>(paths::AUTH_VERIFY_OTP, req)
            .await?
            .into_data()?;
        self.persist(&data).await?;
        tracing::info!(user_id = %data.user.id, "otp verified");
        Ok(data)
    }

    /// Explicitly refreshes the session using the stored refresh token.
    ///
    /// The gateway already refreshes on demand; this is for callers that want
    /// to renew ahead of time (e.g. on app start). A failed refresh ends the
    /// session: the store is cleared and the caller must re-authenticate.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when no session is stored, the refresh call
    /// fails, or persistence fails.
    pub async fn refresh(&self) -> Result<SessionResponse, ApiError> {
        let refresh_token = self
            .client
            .credentials()
            .load()
            .await?
            .map(|s| s.tokens.refresh_token)
            .ok_or_else(|| ApiError::transport("no refresh token available"))?;

        let result = self
            .client
            .post::<SessionResponse, _>(paths::AUTH_REFRESH, &RefreshTokenRequest { refresh_token })
            .await
            .and_then(dwello_types::ApiResponse::into_data);

        match result {
            Ok(data) => {
                self.persist(&data).await?;
                tracing::info!("session refreshed");
                Ok(data)
            }
            Err(err) => {
                tracing::warn!(error = %err, "explicit refresh failed, clearing session");
                if let Err(clear_err) = self.client.credentials().clear().await {
                    tracing::error!(error = %clear_err, "failed to clear credential store");
                }
                Err(err)
            }
        }
    }

    /// Logs out: revokes the refresh token (all sessions when `all_devices`),
    /// then clears the local session regardless of the revoke outcome.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] only if the local session cannot be cleared;
    /// revoke-call failures are logged and swallowed.
    pub async fn logout(&self, all_devices: bool) -> Result<(), ApiError> {
        let refresh_token = self
            .client
            .credentials()
            .load()
            .await?
            .map(|s| s.tokens.refresh_token);

        let body = if all_devices {
            // Omitting the token revokes every session for the user.
            Some(LogoutRequest::default())
        } else {
            refresh_token.map(|token| LogoutRequest {
                refresh_token: Some(token),
            })
        };

        if let Some(body) = body {
            if let Err(err) = self
                .client
                .post::<serde_json::Value, _>(paths::AUTH_LOGOUT, &body)
                .await
            {
                tracing::warn!(error = %err, "logout revoke failed, clearing local session anyway");
            }
        }

        self.client.credentials().clear().await?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Whether a session is stored. Keyed on the refresh token, which
    /// outlives the access token.
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.client.credentials().load().await, Ok(Some(_)))
    }

    /// The cached user record from the stored session, if any.
    pub async fn stored_user(&self) -> Option<User> {
        self.client
            .credentials()
            .load()
            .await
            .ok()
            .flatten()
            .and_then(|s| s.user)
    }

    async fn persist(&self, data: &SessionResponse) -> Result<(), ApiError> {
        let session = AuthSession::new(TokenPair::new(
            data.access_token.clone(),
            data.refresh_token.clone(),
        ))
        .with_user(data.user.clone());
        self.client.credentials().save(&session).await?;
        Ok(())
    }
}
