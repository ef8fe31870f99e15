//! Client-credentials access token cache.
//!
//! Readers share a `RwLock`; refreshes go through a separate gate so at most one
//! token request is in flight. A caller that finds the cache empty waits on the
//! gate and re-reads the cache before issuing its own request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::spotify::models::AccessToken;
use crate::spotify::{ensure_success, UpstreamError, OBJECT_TIMEOUT};

/// Tokens are treated as expired this long before upstream says they are.
const EXPIRY_SKEW: Duration = Duration::from_secs(60);
/// Upper bound on how long a token is cached, whatever `expires_in` says.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Supplies a bearer token for upstream requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self) -> Result<String, UpstreamError>;
}

/// Performs the actual token exchange. Swappable so the cache can be tested
/// without an auth server.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn request_token(&self) -> Result<AccessToken, UpstreamError>;
}

/// `POST` to the accounts service with `grant_type=client_credentials`.
pub struct ClientCredentialsIssuer {
    client: Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentialsIssuer {
    pub fn new(client: Client, auth_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            client,
            auth_url,
            client_id,
            client_secret,
        }
    }
}

#[async_trait]
impl TokenIssuer for ClientCredentialsIssuer {
    async fn request_token(&self) -> Result<AccessToken, UpstreamError> {
        info!("Requesting new access token");

        let response = self
            .client
            .post(&self.auth_url)
            .timeout(OBJECT_TIMEOUT)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| UpstreamError::from_transport(e, "token request"))?;

        let body = ensure_success(response)
            .await?
            .text()
            .await
            .map_err(|e| UpstreamError::from_transport(e, "token request"))?;

        Ok(serde_json::from_str(&body)?)
    }
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

pub struct SpotifyTokenService {
    issuer: Arc<dyn TokenIssuer>,
    current: RwLock<Option<CachedToken>>,
    refresh_gate: Mutex<()>,
}

impl SpotifyTokenService {
    pub fn new(issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            issuer,
            current: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    async fn cached(&self) -> Option<String> {
        let now = Instant::now();
        self.current
            .read()
            .await
            .as_ref()
            .filter(|t| t.is_fresh(now))
            .map(|t| t.value.clone())
    }

    /// Replaces the cached token unconditionally.
    pub async fn refresh(&self) -> Result<String, UpstreamError> {
        let _gate = self.refresh_gate.lock().await;
        self.issue_and_store().await
    }

    /// Caller must hold `refresh_gate`.
    async fn issue_and_store(&self) -> Result<String, UpstreamError> {
        let token = self.issuer.request_token().await?;
        if token.access_token.trim().is_empty() {
            return Err(UpstreamError::Token(
                "token endpoint returned an empty access token".to_string(),
            ));
        }

        let lifetime = Duration::from_secs(token.expires_in)
            .min(MAX_TOKEN_LIFETIME)
            .saturating_sub(EXPIRY_SKEW);
        let now = Instant::now();
        let expires_at = now.checked_add(lifetime).unwrap_or(now);
        let value = token.access_token;
        *self.current.write().await = Some(CachedToken {
            value: value.clone(),
            expires_at,
        });

        info!(
            expires_in = token.expires_in,
            token_type = %token.token_type,
            "Access token refreshed"
        );
        Ok(value)
    }

    /// Refreshes the token every `period`, starting immediately.
    /// Failures are logged and retried on the next tick.
    pub fn spawn_refresh_task(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                debug!("Scheduled token refresh starting");
                if let Err(e) = self.refresh().await {
                    error!("Scheduled token refresh failed: {e}");
                }
            }
        })
    }
}

#[async_trait]
impl TokenProvider for SpotifyTokenService {
    async fn get_token(&self) -> Result<String, UpstreamError> {
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        let _gate = self.refresh_gate.lock().await;
        // Another caller may have refreshed while we waited for the gate.
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        info!("No valid access token cached, fetching a new one");
        self.issue_and_store().await
    }
}
