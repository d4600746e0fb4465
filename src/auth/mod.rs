//! OAuth2 authorization for the Google Workspace Admin SDK
//!
//! Implements the installed-app flow: a cached token is reused while valid,
//! refreshed via the refresh grant when one is available, and otherwise the
//! operator is sent to an authorization URL and pastes back a code.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client as HttpClient, Url};
use serde::Deserialize;

use crate::config::StoredToken;
use crate::error::{AuthError, Result};

/// Directory API scopes required to read the OU tree
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/admin.directory.orgunit",
    "https://www.googleapis.com/auth/admin.directory.orgunit.readonly",
];

/// Google OAuth2 authorization endpoint
const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";

/// Google OAuth2 token endpoint
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// OAuth client descriptor parsed from a Google Cloud credentials file
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl ClientCredentials {
    /// Load credentials from a Google Cloud console "installed app" JSON file
    pub fn load(path: &Path) -> Result<Self> {
        #[derive(Deserialize)]
        struct Installed {
            client_id: String,
            client_secret: String,
            redirect_uris: Vec<String>,
        }

        #[derive(Deserialize)]
        struct CredentialsFile {
            installed: Installed,
        }

        if !path.exists() {
            return Err(AuthError::MissingCredentials(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let file: CredentialsFile = serde_json::from_str(&contents)
            .map_err(|e| AuthError::InvalidCredentials(e.to_string()))?;

        let redirect_uri = file
            .installed
            .redirect_uris
            .into_iter()
            .next()
            .ok_or_else(|| {
                AuthError::InvalidCredentials("credentials file has no redirect URIs".to_string())
            })?;

        Ok(Self {
            client_id: file.installed.client_id,
            client_secret: file.installed.client_secret,
            redirect_uri,
        })
    }

    /// Build the URL the operator must visit to authorize this client
    pub fn authorization_url(&self) -> String {
        // Url::parse_with_params handles the query encoding
        let url = Url::parse_with_params(
            AUTH_ENDPOINT,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("access_type", "offline"),
                ("scope", SCOPES.join(" ").as_str()),
            ],
        )
        .expect("static auth endpoint URL is valid");

        url.to_string()
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Lifetime in seconds
    expires_in: i64,
}

impl TokenResponse {
    fn into_stored(self) -> StoredToken {
        StoredToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: Utc::now() + chrono::Duration::seconds(self.expires_in),
        }
    }
}

/// OAuth2 token client
pub struct OauthClient {
    http: HttpClient,
    credentials: ClientCredentials,
    token_endpoint: String,
}

impl OauthClient {
    /// Create a token client against the production Google endpoint
    pub fn new(credentials: ClientCredentials) -> Result<Self> {
        Self::with_token_endpoint(credentials, TOKEN_ENDPOINT.to_string())
    }

    /// Create a token client against a custom endpoint (used in tests)
    pub fn with_token_endpoint(
        credentials: ClientCredentials,
        token_endpoint: String,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

        Ok(Self {
            http,
            credentials,
            token_endpoint,
        })
    }

    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Exchange an authorization code for an access/refresh token pair
    pub async fn exchange_code(&self, code: &str) -> Result<StoredToken> {
        let params = [
            ("code", code),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::ExchangeFailed(format!("{status}: {body}")).into());
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::ExchangeFailed(format!("unexpected token response: {e}")))?;

        log::debug!("authorization code exchanged, token expires in {}s", token.expires_in);
        Ok(token.into_stored())
    }

    /// Refresh an expired access token.
    ///
    /// The refresh response does not repeat the refresh token, so the
    /// existing one is carried over into the returned token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<StoredToken> {
        let params = [
            ("refresh_token", refresh_token),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::RefreshFailed(format!("{status}: {body}")).into());
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::RefreshFailed(format!("unexpected token response: {e}")))?;

        let mut stored = token.into_stored();
        if stored.refresh_token.is_none() {
            stored.refresh_token = Some(refresh_token.to_string());
        }

        log::debug!("access token refreshed");
        Ok(stored)
    }
}
