use chrono::Utc;
use reqwest::Client;
use tokio::sync::{Mutex, RwLock};

use crate::error::{self, GmapError, Result};

use super::types::{AuthRequest, AuthResponse, TokenState};

/// Token manager
/// Owns the credential exchange and the cached bearer token
pub struct TokenManager {
    /// Full URL of the auth endpoint
    auth_url: String,

    /// Credentials for the exchange
    credentials: AuthRequest,

    /// Current token state
    state: RwLock<TokenState>,

    /// Serializes credential exchanges: concurrent callers that miss the
    /// cache queue here and re-check instead of issuing duplicate auth
    /// calls.
    exchange: Mutex<()>,

    /// HTTP client for auth requests
    client: Client,
}

impl TokenManager {
    pub fn new(client: Client, api_url: &str, username: String, password: String) -> Self {
        Self {
            auth_url: format!("{}/auth/", api_url),
            credentials: AuthRequest { username, password },
            state: RwLock::new(TokenState::Unauthenticated),
            exchange: Mutex::new(()),
            client,
        }
    }

    /// Returns a token valid at the time of the call, performing the
    /// credential exchange only when the cached one is absent or expired.
    pub async fn ensure_token(&self) -> Result<String> {
        {
            let state = self.state.read().await;
            if let Some(token) = state.valid_token_at(Utc::now()) {
                return Ok(token.to_string());
            }
        }

        let _flight = self.exchange.lock().await;

        // Another caller may have finished the exchange while we waited.
        {
            let state = self.state.read().await;
            if let Some(token) = state.valid_token_at(Utc::now()) {
                return Ok(token.to_string());
            }
        }

        // Expired or absent: clear before exchanging so a failure never
        // leaves a stale token behind.
        *self.state.write().await = TokenState::Unauthenticated;

        let auth = self.exchange_credentials().await?;
        *self.state.write().await = TokenState::Valid {
            token: auth.token.clone(),
            expires_at: auth.expires_at,
        };

        tracing::debug!(
            expires_at = %auth.expires_at.to_rfc3339(),
            "token acquired"
        );

        Ok(auth.token)
    }

    async fn exchange_credentials(&self) -> Result<AuthResponse> {
        tracing::debug!(url = %self.auth_url, username = %self.credentials.username, "authenticating");

        let response = self
            .client
            .post(&self.auth_url)
            .json(&self.credentials)
            .send()
            .await
            .map_err(|e| GmapError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GmapError::Auth(error::response_detail(response).await));
        }

        response
            .json::<AuthResponse>()
            .await
            .map_err(|e| GmapError::Auth(format!("unexpected auth response: {}", e)))
    }
}
