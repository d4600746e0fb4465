//! Directory API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{DirectoryApi, OrgUnit};
use crate::auth::OauthClient;
use crate::config::StoredToken;
use crate::error::{ApiError, AuthError, Result};

/// Admin SDK base URL
const API_BASE_URL: &str = "https://admin.googleapis.com";

/// Directory API quota headroom: 10 requests per second
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Google Directory API client
pub struct GoogleDirectoryClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    oauth: OauthClient,
    token: Arc<RwLock<StoredToken>>,
}

impl GoogleDirectoryClient {
    /// Create a client against the production Admin SDK
    pub fn new(oauth: OauthClient, token: StoredToken) -> Result<Self> {
        Self::with_base_url(oauth, token, API_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL (used in tests)
    pub fn with_base_url(oauth: OauthClient, token: StoredToken, base_url: String) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url,
            rate_limiter,
            oauth,
            token: Arc::new(RwLock::new(token)),
        })
    }

    /// Current token state, for persisting a mid-run refresh
    pub async fn token(&self) -> StoredToken {
        self.token.read().await.clone()
    }

    /// Check if the access token is expired or expires within 1 minute
    async fn is_token_expired(&self) -> bool {
        let token = self.token.read().await;
        let buffer = chrono::Duration::minutes(1);
        token.expires_at - buffer < Utc::now()
    }

    /// Refresh the access token through the OAuth refresh grant
    async fn refresh_token(&self) -> Result<()> {
        let refresh_token = {
            let token = self.token.read().await;
            token
                .refresh_token
                .clone()
                .ok_or(AuthError::NotAuthorized)?
        };

        let refreshed = self.oauth.refresh(&refresh_token).await?;
        *self.token.write().await = refreshed;
        Ok(())
    }

    /// Get a valid access token, refreshing first if necessary
    async fn get_valid_access_token(&self) -> Result<String> {
        if self.is_token_expired().await {
            log::debug!("cached access token expired, refreshing");
            self.refresh_token().await?;
        }

        Ok(self.token.read().await.access_token.clone())
    }

    /// Make an authenticated GET request
    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T> {
        self.request_inner(path, true).await
    }

    async fn request_inner<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        retry_on_unauthorized: bool,
    ) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let access_token = self.get_valid_access_token().await?;

        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => {
                // The token may have been revoked since the expiry check;
                // force one refresh and retry
                if retry_on_unauthorized {
                    self.refresh_token().await?;
                    return Box::pin(self.request_inner(path, false)).await;
                }
                Err(ApiError::Unauthorized.into())
            }
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl DirectoryApi for GoogleDirectoryClient {
    async fn list_org_units(&self, customer_id: &str) -> Result<Vec<OrgUnit>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct OrgUnitsResponse {
            // The API omits the array entirely for a tenant with no OUs
            #[serde(default)]
            organization_units: Vec<OrgUnit>,
        }

        let path = format!(
            "/admin/directory/v1/customer/{}/orgunits?type=all&orgUnitPath=/",
            customer_id
        );
        let response: OrgUnitsResponse = self.get(&path).await?;

        log::debug!(
            "fetched {} organizational units for customer {}",
            response.organization_units.len(),
            customer_id
        );
        Ok(response.organization_units)
    }
}
